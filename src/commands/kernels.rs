//! Kernel resolution for every configured category

use crate::core::context::ArchiveContext;
use crate::core::error::ArchiveResult;
use crate::core::session::ArchiveSession;

pub fn run_kernels(ctx: &ArchiveContext, json: bool) -> ArchiveResult<()> {
  let sets = ArchiveSession::new(ctx).kernels()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&sets)?);
    return Ok(());
  }

  if sets.is_empty() {
    println!("No kernels configured in [[kernels_to_load]]");
    return Ok(());
  }

  for set in &sets {
    if set.is_empty() {
      println!("⚠️  {}: not found", set.category);
      continue;
    }
    println!("✅ {}:", set.category);
    for kernel in &set.kernels {
      println!("   {}", kernel.display());
    }
  }

  Ok(())
}
