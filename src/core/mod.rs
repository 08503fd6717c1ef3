//! Core engine for spice-archive
//!
//! - **config**: archive configuration (archive.toml) parsing and validation
//! - **context**: configuration plus absolute archive directories, built once per run
//! - **error**: error types with contextual help messages and exit codes
//! - **session**: sequences release tracking, kernel resolution and coverage checks

pub mod config;
pub mod context;
pub mod error;
pub mod session;
