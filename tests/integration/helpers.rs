//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Mission configuration shared by most tests
pub const INSIGHT_CONFIG: &str = r#"[mission]
acronym = "insight"
date_format = "makelbl"
mission_start = "2018-05-05T11:05:00Z"
mission_finish = "2050-01-01T00:00:00Z"
increment_start = "2021-04-03T20:53:00Z"
increment_finish = "2021-04-23T20:53:00Z"
release_date = "2021-04-04"

[directories]
working = "working"
staging = "staging"
final = "final"
kernels = "kernels"

[[kernels_to_load]]
category = "lsk"
patterns = ['naif[0-9]{4}\.tls']

[[kernels_to_load]]
category = "pck"
patterns = ['pck[0-9]{5}\.tpc']

[[kernels_to_load]]
category = "fk"
patterns = ['insight_v[0-9]{2}\.tf']

[[kernels_to_load]]
category = "sclk"
patterns = ['nsy_sclkscet_[0-9]{5}\.tsc']

[meta_kernels]
inputs = ["working/insight_2021_v08.tm"]

[[meta_kernels.templates]]
name = "insight_$YEAR_v$VERSION.tm"
fields = [{ name = "YEAR", length = 4 }, { name = "VERSION", length = 2 }]
"#;

/// A temporary archive tree: working, final, kernels and staging areas
pub struct TestArchive {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestArchive {
  /// Create the archive areas and write `config` as archive.toml
  pub fn new(config: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    for dir in ["working", "final/insight_spice", "kernels", "staging/insight_spice"] {
      std::fs::create_dir_all(path.join(dir))?;
    }
    std::fs::write(path.join("archive.toml"), config)?;

    Ok(Self { _root: root, path })
  }

  /// Archive with the default insight configuration
  pub fn insight() -> Result<Self> {
    Self::new(INSIGHT_CONFIG)
  }

  /// Create an empty file (and its parent directories) below the archive root
  pub fn touch(&self, relative: &str) -> Result<PathBuf> {
    let file = self.path.join(relative);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file, "").with_context(|| format!("Failed to create {}", file.display()))?;
    Ok(file)
  }

  /// Add a kernel file to `kernels/<category>/`
  pub fn add_kernel(&self, category: &str, name: &str) -> Result<PathBuf> {
    self.touch(&format!("kernels/{}/{}", category, name))
  }

  /// Add a final-area bundle label for `release`
  pub fn add_bundle_label(&self, release: u32) -> Result<PathBuf> {
    self.touch(&format!("final/insight_spice/bundle_insight_spice_v{:03}.xml", release))
  }

  /// Add a working-area kernel list for `release`
  pub fn add_kernel_list(&self, release: u32) -> Result<PathBuf> {
    self.touch(&format!("working/insight_release_{:02}.kernel_list", release))
  }

  /// Minimal kernel set satisfying every configured category
  pub fn add_default_kernels(&self) -> Result<()> {
    self.add_kernel("lsk", "naif0012.tls")?;
    self.add_kernel("pck", "pck00010.tpc")?;
    self.add_kernel("fk", "insight_v05.tf")?;
    self.add_kernel("sclk", "nsy_sclkscet_00023.tsc")?;
    Ok(())
  }
}

fn spice_archive(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_spice-archive");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run spice-archive")
}

/// Run spice-archive and fail unless it exits successfully
pub fn run_spice_archive(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = spice_archive(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "spice-archive command failed: spice-archive {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run spice-archive expecting failure; returns (exit code, stderr)
pub fn run_spice_archive_failing(cwd: &Path, args: &[&str]) -> Result<(i32, String)> {
  let output = spice_archive(cwd, args)?;
  if output.status.success() {
    anyhow::bail!(
      "spice-archive {} unexpectedly succeeded\nstdout: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout)
    );
  }

  let code = output.status.code().context("spice-archive terminated by signal")?;
  Ok((code, String::from_utf8_lossy(&output.stderr).to_string()))
}

/// Parse stdout of a `--json` invocation
pub fn json_output(output: &Output) -> Result<serde_json::Value> {
  serde_json::from_slice(&output.stdout).context("stdout is not valid JSON")
}
