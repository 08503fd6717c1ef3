//! Archive coverage checks

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ArchiveResult;
use crate::coverage::{CoverageWindow, TemporalConsistencyChecker, TimeConverter, UtcConverter};

/// Validates that mission and increment bounds parse and are ordered
pub struct ArchiveCoverageCheck;

impl ArchiveCoverageCheck {
  fn windows(ctx: &CheckContext) -> Result<(CoverageWindow, Option<CoverageWindow>), String> {
    let mission = &ctx.config.mission;
    let epoch = |field: &str, value: &str| UtcConverter.to_epoch(field, value).map_err(|e| e.to_string());

    let window = CoverageWindow::new(
      epoch("mission_start", &mission.mission_start)?,
      epoch("mission_finish", &mission.mission_finish)?,
    );
    let increment = match mission.increment() {
      Some((start, finish)) => Some(CoverageWindow::new(
        epoch("increment_start", start)?,
        epoch("increment_finish", finish)?,
      )),
      None => None,
    };
    Ok((window, increment))
  }
}

impl Check for ArchiveCoverageCheck {
  fn name(&self) -> &str {
    "archive-coverage"
  }

  fn description(&self) -> &str {
    "Validates mission and increment start/finish times"
  }

  fn run(&self, ctx: &CheckContext) -> ArchiveResult<CheckResult> {
    let (mission, increment) = match Self::windows(ctx) {
      Ok(windows) => windows,
      Err(message) => {
        return Ok(CheckResult::error(
          self.name(),
          message,
          Some("Use ISO-8601 UTC times such as 2021-04-03T20:53:00Z"),
        ));
      }
    };

    match TemporalConsistencyChecker::check(&mission, increment.as_ref()) {
      Ok(()) => Ok(CheckResult::pass(
        self.name(),
        match increment {
          Some(inc) => format!("Increment {} - {} lies within the mission", inc.start, inc.finish),
          None => format!("Mission {} - {} (no increment configured)", mission.start, mission.finish),
        },
      )),
      Err(e) => Ok(CheckResult::error(self.name(), e.to_string(), Some("Check the archive coverage"))),
    }
  }
}
