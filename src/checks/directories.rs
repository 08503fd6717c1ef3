//! Archive directory checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::context::staging_dir;
use crate::core::error::ArchiveResult;

/// Validates that the configured archive areas exist
pub struct DirectoriesCheck;

impl Check for DirectoriesCheck {
  fn name(&self) -> &str {
    "directories"
  }

  fn description(&self) -> &str {
    "Validates that working, final, kernels and staging directories exist"
  }

  fn run(&self, ctx: &CheckContext) -> ArchiveResult<CheckResult> {
    let dirs = &ctx.config.directories;
    let missing: Vec<String> = [
      ("working", &dirs.working),
      ("final", &dirs.final_dir),
      ("kernels", &dirs.kernels),
    ]
    .into_iter()
    .filter(|(_, path)| !ctx.resolve(path).is_dir())
    .map(|(role, path)| format!("{} ({})", role, ctx.resolve(path).display()))
    .collect();

    if !missing.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Missing directories: {}", missing.join(", ")),
        Some("Create them or fix [directories] in archive.toml"),
      ));
    }

    let staging = staging_dir(&ctx.root, &dirs.staging, &ctx.config.mission.acronym);
    if !staging.is_dir() {
      return Ok(CheckResult::warning(
        self.name(),
        format!("Staging directory does not exist yet: {}", staging.display()),
        Some("It is created when the first release is staged"),
      ));
    }

    Ok(CheckResult::pass(self.name(), "All archive directories exist"))
  }
}
