//! Unified archive context - build once, pass everywhere
//!
//! `ArchiveContext` loads archive.toml and resolves every configured directory
//! to an absolute path a single time in main.rs; commands and checks then take
//! `&ArchiveContext`.
//!
//! ```text
//! main.rs:
//!   ArchiveContext::build() -> &ArchiveContext
//!   |
//!   v
//! commands/run.rs, release.rs, etc:
//!   fn run_*(ctx: &ArchiveContext, ...)
//! ```

use crate::core::config::ArchiveConfig;
use crate::core::error::{ArchiveResult, ConfigError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Absolute locations of the archive areas
#[derive(Debug, Clone)]
pub struct ArchiveDirs {
  pub working: PathBuf,
  pub staging: PathBuf,
  pub final_dir: PathBuf,
  pub kernels: PathBuf,
}

/// Shared run-level state: configuration plus resolved directories.
#[derive(Debug, Clone)]
pub struct ArchiveContext {
  /// Directory relative paths are resolved against
  pub root: PathBuf,

  /// Validated configuration (archive.toml)
  pub config: Arc<ArchiveConfig>,

  /// Directories from [directories], made absolute
  pub dirs: ArchiveDirs,
}

impl ArchiveContext {
  /// Load configuration and check that the archive areas exist.
  ///
  /// Working, final and kernels directories are required. The staging area
  /// may be created later by the archive generation, so a missing one only
  /// warns.
  pub fn build(root: &Path, config_path: Option<&Path>) -> ArchiveResult<Self> {
    let config = ArchiveConfig::load(root, config_path)?;
    Self::from_config(root, config)
  }

  /// Build from an already loaded configuration
  pub fn from_config(root: &Path, config: ArchiveConfig) -> ArchiveResult<Self> {
    let dirs = resolve_dirs(root, &config)?;
    Ok(Self {
      root: root.to_path_buf(),
      config: Arc::new(config),
      dirs,
    })
  }

  /// Mission acronym (convenience)
  pub fn mission(&self) -> &str {
    &self.config.mission.acronym
  }
}

fn absolute(root: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}

fn require_dir(role: &str, path: PathBuf) -> Result<PathBuf, ConfigError> {
  if path.is_dir() {
    Ok(path)
  } else {
    Err(ConfigError::DirectoryNotFound {
      role: role.to_string(),
      path,
    })
  }
}

/// Staging content always lives below `<staging>/<acronym>_spice`
pub(crate) fn staging_dir(root: &Path, configured: &Path, acronym: &str) -> PathBuf {
  let suffix = format!("{}_spice", acronym);
  let staging = absolute(root, configured);
  if staging.file_name().is_some_and(|n| n.to_string_lossy() == suffix) {
    staging
  } else {
    staging.join(suffix)
  }
}

fn resolve_dirs(root: &Path, config: &ArchiveConfig) -> Result<ArchiveDirs, ConfigError> {
  let dirs = &config.directories;
  let working = require_dir("working", absolute(root, &dirs.working))?;
  let final_dir = require_dir("final", absolute(root, &dirs.final_dir))?;
  let kernels = require_dir("kernels", absolute(root, &dirs.kernels))?;

  let staging = staging_dir(root, &dirs.staging, &config.mission.acronym);
  if !staging.is_dir() {
    warn!("Staging directory does not exist yet: {}", staging.display());
  }

  Ok(ArchiveDirs {
    working,
    staging,
    final_dir,
    kernels,
  })
}
