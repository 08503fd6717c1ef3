//! Health checks and validation infrastructure
//!
//! `doctor` runs every check and reports all findings at once, where a full
//! run stops at the first fatal error.
//!
//! # Built-in Checks
//!
//! - **directories**: working, final and kernels directories exist; staging is optional
//! - **meta-kernel-names**: name templates validate and provided meta-kernels match one
//! - **archive-coverage**: mission and increment bounds parse and are ordered
//! - **mandatory-kernels**: exactly one LSK and every required category resolve

mod coverage;
mod directories;
mod kernels;
mod metakernel_names;
mod runner;
mod trait_def;

pub use runner::create_default_runner;
pub use trait_def::{CheckContext, Severity};
