//! Conversion of configured UTC strings into comparable time values

use crate::core::error::CoverageError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// 2000-01-01T12:00:00Z in Unix milliseconds
const J2000_UNIX_MS: i64 = 946_728_000_000;

/// Opaque, totally ordered time value: milliseconds from J2000 (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(i64);

impl Epoch {
  #[cfg(test)]
  pub fn from_millis(ms: i64) -> Self {
    Self(ms)
  }

  #[cfg(test)]
  pub fn as_millis(&self) -> i64 {
    self.0
  }
}

impl fmt::Display for Epoch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match DateTime::<Utc>::from_timestamp_millis(J2000_UNIX_MS.saturating_add(self.0)) {
      Some(utc) => write!(f, "{}", utc.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
      None => write!(f, "J2000{:+}ms", self.0),
    }
  }
}

impl Serialize for Epoch {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// Turns a configured time string into an `Epoch`
pub trait TimeConverter {
  fn to_epoch(&self, field: &str, value: &str) -> Result<Epoch, CoverageError>;
}

/// ISO-8601 UTC (`YYYY-MM-DDThh:mm:ss[.fff][Z]`) converter
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcConverter;

impl TimeConverter for UtcConverter {
  fn to_epoch(&self, field: &str, value: &str) -> Result<Epoch, CoverageError> {
    let trimmed = value.trim();
    let text = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| {
      CoverageError::UnparsableTime {
        field: field.to_string(),
        value: value.to_string(),
      }
    })?;

    Ok(Epoch(parsed.and_utc().timestamp_millis() - J2000_UNIX_MS))
  }
}
