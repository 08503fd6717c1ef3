//! Release number of the next increment

use crate::core::context::ArchiveContext;
use crate::core::error::ArchiveResult;
use crate::core::session::ArchiveSession;

pub fn run_release(ctx: &ArchiveContext, json: bool) -> ArchiveResult<()> {
  let state = ArchiveSession::new(ctx).release()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&state)?);
  } else if state.is_increment {
    println!(
      "Next release: {} (previous: {})",
      state.release, state.previous_release
    );
  } else {
    println!("Next release: {} (first release)", state.release);
  }

  Ok(())
}
