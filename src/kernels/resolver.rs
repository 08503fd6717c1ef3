//! Kernel resolution
//!
//! Each pattern of a request is either a literal path to an existing file,
//! used as is, or a regular expression searched (unanchored) among the entries
//! of `<kernels>/<category>/`. When a search finds several candidates the
//! lexicographically last one wins: kernel names carry zero-padded versions, so
//! that is the most recent one.

use super::{Cardinality, KernelRequest, ResolvedKernelSet, merge_requests};
use crate::core::error::{ArchiveResult, KernelError, ResultExt};
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read-only view of the filesystem used during resolution
pub trait KernelSource: Send + Sync {
  /// Whether `path` names an existing file
  fn is_file(&self, path: &Path) -> bool;

  /// Entry names of `dir`, or `None` when the directory does not exist
  fn list(&self, dir: &Path) -> ArchiveResult<Option<Vec<String>>>;
}

/// `KernelSource` over the real filesystem; relative literal paths resolve against `base`
#[derive(Debug, Clone)]
pub struct FsKernelSource {
  base: PathBuf,
}

impl FsKernelSource {
  pub fn new(base: impl Into<PathBuf>) -> Self {
    Self { base: base.into() }
  }

  fn absolute(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.base.join(path)
    }
  }
}

impl KernelSource for FsKernelSource {
  fn is_file(&self, path: &Path) -> bool {
    self.absolute(path).is_file()
  }

  fn list(&self, dir: &Path) -> ArchiveResult<Option<Vec<String>>> {
    let entries = match fs::read_dir(dir) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e).with_context(|| format!("Failed to list {}", dir.display())),
    };

    let mut names = Vec::new();
    for entry in entries {
      let entry = entry?;
      names.push(entry.file_name().to_string_lossy().to_string());
    }
    Ok(Some(names))
  }
}

/// Resolves kernel requests below a kernels directory
pub struct KernelTypeResolver<S: KernelSource> {
  source: S,
  search_root: PathBuf,
}

impl<S: KernelSource> KernelTypeResolver<S> {
  pub fn new(source: S, search_root: impl Into<PathBuf>) -> Self {
    Self {
      source,
      search_root: search_root.into(),
    }
  }

  /// Resolve one request and apply its category's cardinality rule
  pub fn resolve(&self, request: &KernelRequest) -> ArchiveResult<ResolvedKernelSet> {
    let category = request.category;
    let mut kernels: Vec<PathBuf> = Vec::new();

    for pattern in &request.patterns {
      let selected = if self.source.is_file(Path::new(pattern)) {
        Some(PathBuf::from(pattern))
      } else {
        self.search(request, pattern)?
      };

      match selected {
        Some(path) if !kernels.contains(&path) => kernels.push(path),
        Some(_) => {}
        None => debug!(category = %category, pattern = %pattern, "no kernel matches pattern"),
      }
    }

    let resolved = ResolvedKernelSet { category, kernels };

    match category.cardinality() {
      Cardinality::ExactlyOne => {
        if resolved.is_empty() {
          return Err(
            KernelError::MissingMandatory {
              category: category.dir_name().to_string(),
            }
            .into(),
          );
        }
        if resolved.kernels.len() > 1 {
          return Err(
            KernelError::Ambiguous {
              category: category.dir_name().to_string(),
              candidates: resolved.names(),
            }
            .into(),
          );
        }
      }
      Cardinality::Optional => {
        if resolved.is_empty() {
          warn!("-- {} not found.", category);
        }
      }
      Cardinality::Configured => {
        if resolved.is_empty() && request.required {
          return Err(
            KernelError::MissingMandatory {
              category: category.dir_name().to_string(),
            }
            .into(),
          );
        }
      }
    }

    if !resolved.is_empty() {
      info!("-- {} loaded: {:?}", category, resolved.names());
    }

    Ok(resolved)
  }

  /// Resolve every request; same-category requests are merged first.
  ///
  /// Requests are independent, so they run in parallel. Results keep the
  /// configured order and the first failing request (in that order) is reported.
  pub fn resolve_all(&self, requests: &[KernelRequest]) -> ArchiveResult<Vec<ResolvedKernelSet>> {
    let merged = merge_requests(requests);
    let results: Vec<ArchiveResult<ResolvedKernelSet>> = merged.par_iter().map(|r| self.resolve(r)).collect();
    results.into_iter().collect()
  }

  fn search(&self, request: &KernelRequest, pattern: &str) -> ArchiveResult<Option<PathBuf>> {
    let regex = Regex::new(pattern).map_err(|e| KernelError::InvalidPattern {
      pattern: pattern.to_string(),
      reason: e.to_string(),
    })?;

    let dir = self.search_root.join(request.category.dir_name());
    let Some(mut candidates) = self.source.list(&dir)? else {
      debug!(dir = %dir.display(), "kernel directory does not exist");
      return Ok(None);
    };

    candidates.retain(|name| regex.is_match(name));
    candidates.sort();

    Ok(candidates.pop().map(|name| dir.join(name)))
  }
}
