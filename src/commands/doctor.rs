//! Health check command for diagnosing archive configuration issues
//!
//! Unlike `run`, which stops at the first fatal error, doctor runs every check
//! and reports all of them.

use crate::checks::{CheckContext, Severity, create_default_runner};
use crate::core::config::ArchiveConfig;
use crate::core::error::{ArchiveResult, ExitCode};
use std::path::Path;
use std::sync::Arc;

/// Run the doctor command
///
/// Exits with the validation exit code when an error-severity check fails,
/// or any check fails with `strict`.
pub fn run_doctor(root: &Path, config: ArchiveConfig, json: bool, strict: bool) -> ArchiveResult<()> {
  let ctx = CheckContext {
    root: root.to_path_buf(),
    config: Arc::new(config),
  };

  let runner = create_default_runner();
  let results = runner.run_all(&ctx);
  let failed = results.iter().any(|r| r.is_failure(strict));

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    println!("🏥 Running archive health checks...\n");

    println!("📋 Registered checks:");
    for check in runner.checks() {
      println!("   • {}: {}", check.name(), check.description());
    }
    println!();

    for result in &results {
      let icon = match (result.passed, result.severity) {
        (true, _) => "✅",
        (false, Severity::Warning) => "⚠️ ",
        (false, _) => "❌",
      };
      println!("{} {}: {}", icon, result.check_name, result.message);

      if !result.passed {
        if let Some(issues) = result.details.as_ref().and_then(|d| d["issues"].as_array()) {
          for issue in issues {
            println!("   - {}", issue.as_str().unwrap_or_default());
          }
        }
        if let Some(ref suggestion) = result.suggestion {
          println!("   💡 Fix: {}", suggestion);
        }
      }
      println!();
    }

    let passed_count = results.iter().filter(|r| r.passed).count();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary: {}/{} checks passed", passed_count, results.len());

    if failed {
      println!("\n⚠️  Issues found. Fix them before generating the release.");
    } else if passed_count < results.len() {
      println!("\n⚠️  Some warnings found. Consider addressing them.");
    } else {
      println!("\n✨ All checks passed! The archive setup looks healthy.");
    }
  }

  if failed {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}
