//! Meta-kernel name checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ArchiveResult;
use crate::pattern::metakernel::match_input;

/// Validates meta-kernel name templates and the user-provided meta-kernels
pub struct MetaKernelNamesCheck;

impl Check for MetaKernelNamesCheck {
  fn name(&self) -> &str {
    "meta-kernel-names"
  }

  fn description(&self) -> &str {
    "Validates meta-kernel name templates and matches provided meta-kernels"
  }

  fn run(&self, ctx: &CheckContext) -> ArchiveResult<CheckResult> {
    let config = &ctx.config.meta_kernels;
    if config.templates.is_empty() && config.inputs.is_empty() {
      return Ok(CheckResult::pass(self.name(), "No meta-kernels configured"));
    }

    let mut issues: Vec<String> = config
      .templates
      .iter()
      .filter_map(|t| t.validate().err())
      .map(|e| e.to_string())
      .collect();

    issues.extend(
      config
        .inputs
        .iter()
        .filter_map(|input| match_input(input, &config.templates).err())
        .map(|e| e.to_string()),
    );

    if issues.is_empty() {
      Ok(CheckResult::pass(
        self.name(),
        format!(
          "{} template(s) valid, {} meta-kernel(s) matched",
          config.templates.len(),
          config.inputs.len()
        ),
      ))
    } else {
      Ok(
        CheckResult::error(
          self.name(),
          format!("{} meta-kernel issue(s) found", issues.len()),
          Some("Every $FIELD of a template needs a declared field and every provided meta-kernel a template"),
        )
        .with_details(serde_json::json!({ "issues": issues })),
      )
    }
  }
}
