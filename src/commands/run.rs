//! Full resolution run for the next increment

use crate::core::context::ArchiveContext;
use crate::core::error::ArchiveResult;
use crate::core::session::{ArchiveSession, WorkingState};

/// Run every resolution step and print the working state
pub fn run_resolve(ctx: &ArchiveContext, json: bool) -> ArchiveResult<()> {
  let state = ArchiveSession::new(ctx).run()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&state)?);
  } else {
    print_state(&state);
  }

  Ok(())
}

fn print_state(state: &WorkingState) {
  println!("🛰️  {} release {} ({})", state.mission, state.release.release, state.release_date);
  if state.release.is_increment {
    println!("   Increment of release {}", state.release.previous_release);
  } else {
    println!("   First release");
  }
  println!("   Staging: {}", state.staging.display());
  println!();

  println!("📦 Kernels:");
  for set in &state.kernels {
    if set.is_empty() {
      println!("   {}: -", set.category);
    } else {
      println!("   {}: {}", set.category, set.names().join(", "));
    }
  }
  println!();

  if !state.meta_kernels.is_empty() {
    println!("📝 Meta-kernel templates:");
    for name in &state.meta_kernels {
      println!("   • {}", name);
    }
    for input in &state.mk_inputs {
      println!("   ✅ {} -> {}", input.path.display(), input.template);
    }
    println!();
  }

  println!("🕒 Coverage:");
  println!(
    "   mission   {} - {}",
    state.mission_window.start, state.mission_window.finish
  );
  if let Some(inc) = &state.increment_window {
    println!("   increment {} - {}", inc.start, inc.finish);
  }
}
