//! Check runner for executing health checks

use super::trait_def::{Check, CheckContext, CheckResult};
use std::sync::Arc;

/// Check runner that executes multiple checks
pub struct CheckRunner {
  checks: Vec<Arc<dyn Check>>,
}

impl CheckRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Arc<dyn Check>) {
    self.checks.push(check);
  }

  /// Run all checks and collect results
  pub fn run_all(&self, ctx: &CheckContext) -> Vec<CheckResult> {
    self
      .checks
      .iter()
      .map(|check| match check.run(ctx) {
        Ok(result) => result,
        // A check that cannot run is reported, not propagated
        Err(err) => CheckResult::error(
          check.name(),
          format!("Check failed to run: {}", err),
          err.help_message(),
        ),
      })
      .collect()
  }

  /// Get all registered checks
  pub fn checks(&self) -> &[Arc<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Arc::new(super::directories::DirectoriesCheck));
  runner.add_check(Arc::new(super::metakernel_names::MetaKernelNamesCheck));
  runner.add_check(Arc::new(super::coverage::ArchiveCoverageCheck));
  runner.add_check(Arc::new(super::kernels::MandatoryKernelsCheck));

  runner
}
