//! Mission and increment coverage
//!
//! - **time**: converts configured UTC strings into ordered `Epoch` values
//! - **checker**: enforces the ordering between mission and increment bounds

pub mod checker;
pub mod time;

pub use checker::{CoverageWindow, TemporalConsistencyChecker};
pub use time::{TimeConverter, UtcConverter};
