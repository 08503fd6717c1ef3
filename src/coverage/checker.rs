//! Ordering invariants between mission and increment coverage

use super::time::Epoch;
use crate::core::error::CoverageError;
use serde::Serialize;

/// A start/finish pair; ordering is only enforced by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageWindow {
  pub start: Epoch,
  pub finish: Epoch,
}

impl CoverageWindow {
  pub fn new(start: Epoch, finish: Epoch) -> Self {
    Self { start, finish }
  }
}

fn require(violations: &mut Vec<String>, holds: bool, relation: &str, left: Epoch, right: Epoch) {
  if !holds {
    violations.push(format!("{} failed ({} vs {})", relation, left, right));
  }
}

/// Validate the four archive coverage bounds.
///
/// All comparisons are evaluated; every failing one is named in a single
/// `Incoherent` error.
pub fn check_coverage(
  mission_start: Epoch,
  mission_finish: Epoch,
  increment_start: Epoch,
  increment_finish: Epoch,
) -> Result<(), CoverageError> {
  let mut violations = Vec::new();
  require(
    &mut violations,
    mission_start < increment_start,
    "mission_start < increment_start",
    mission_start,
    increment_start,
  );
  require(
    &mut violations,
    increment_start <= increment_finish,
    "increment_start <= increment_finish",
    increment_start,
    increment_finish,
  );
  require(
    &mut violations,
    increment_finish <= mission_finish,
    "increment_finish <= mission_finish",
    increment_finish,
    mission_finish,
  );
  require(
    &mut violations,
    mission_start < mission_finish,
    "mission_start < mission_finish",
    mission_start,
    mission_finish,
  );

  if violations.is_empty() {
    Ok(())
  } else {
    Err(CoverageError::Incoherent { violations })
  }
}

/// Coverage checks for a mission and its (optional) increment
pub struct TemporalConsistencyChecker;

impl TemporalConsistencyChecker {
  /// Without increment bounds only `mission_start < mission_finish` applies
  pub fn check(mission: &CoverageWindow, increment: Option<&CoverageWindow>) -> Result<(), CoverageError> {
    match increment {
      Some(inc) => check_coverage(mission.start, mission.finish, inc.start, inc.finish),
      None => {
        let mut violations = Vec::new();
        require(
          &mut violations,
          mission.start < mission.finish,
          "mission_start < mission_finish",
          mission.start,
          mission.finish,
        );
        if violations.is_empty() {
          Ok(())
        } else {
          Err(CoverageError::Incoherent { violations })
        }
      }
    }
  }
}
