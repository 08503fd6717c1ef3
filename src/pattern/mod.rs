//! Filename templates with fixed-length `$NAME` placeholders
//!
//! - **matcher**: decomposes a concrete filename against a template
//! - **metakernel**: checks meta-kernel name templates against their declared fields
//!   and matches user-provided meta-kernel files

pub mod matcher;
pub mod metakernel;

pub use metakernel::{MetaKernelInput, MetaKernelTemplate};
