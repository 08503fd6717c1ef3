//! Kernel availability checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ArchiveResult;
use crate::kernels::{Cardinality, FsKernelSource, KernelTypeResolver, merge_requests};

/// Validates that every configured kernel request can be satisfied
pub struct MandatoryKernelsCheck;

impl Check for MandatoryKernelsCheck {
  fn name(&self) -> &str {
    "mandatory-kernels"
  }

  fn description(&self) -> &str {
    "Validates that exactly one LSK and every required kernel resolve"
  }

  fn run(&self, ctx: &CheckContext) -> ArchiveResult<CheckResult> {
    let kernels_dir = ctx.resolve(&ctx.config.directories.kernels);
    let resolver = KernelTypeResolver::new(FsKernelSource::new(&ctx.root), kernels_dir);

    let mut errors = Vec::new();
    let mut missing_optional = Vec::new();
    let mut loaded = 0;

    for request in merge_requests(&ctx.config.kernels_to_load) {
      match resolver.resolve(&request) {
        Ok(set) if set.is_empty() && request.category.cardinality() == Cardinality::Optional => {
          missing_optional.push(request.category.to_string());
        }
        Ok(set) => loaded += set.kernels.len(),
        Err(e) => errors.push(e.to_string()),
      }
    }

    if !errors.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        errors.join("; "),
        Some("Fix [[kernels_to_load]] patterns or add the kernels to the kernels directory"),
      ));
    }

    if !missing_optional.is_empty() {
      return Ok(CheckResult::warning(
        self.name(),
        format!("Optional kernels not found: {}", missing_optional.join(", ")),
        None::<String>,
      ));
    }

    Ok(CheckResult::pass(self.name(), format!("{} kernel(s) resolved", loaded)))
  }
}
