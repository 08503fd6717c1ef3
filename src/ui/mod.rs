//! Terminal output helpers
//!
//! - **logging**: global `tracing` subscriber writing to stderr

pub mod logging;
