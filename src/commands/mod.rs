//! CLI commands for spice-archive
//!
//! - **run**: full resolution of the next increment (release, kernels, meta-kernels, coverage)
//! - **release**: next release number from the final and working areas
//! - **kernels**: kernel resolution for every configured category
//! - **matching**: match a filename against the meta-kernel templates
//! - **doctor**: run every health check and report all findings
//!
//! Commands that touch the archive directories take `&ArchiveContext`.

pub mod doctor;
pub mod kernels;
pub mod matching;
pub mod release;
pub mod run;

pub use doctor::run_doctor;
pub use kernels::run_kernels;
pub use matching::run_match;
pub use release::run_release;
pub use run::run_resolve;
