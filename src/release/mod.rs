//! Archive release numbering
//!
//! Every delivery of the archive is a numbered release. The next number is
//! derived from what earlier runs left behind:
//!
//! 1. bundle labels in the final area: `<final>/<mission>_spice/bundle_<mission>_spice_v<NNN>.xml`
//! 2. otherwise kernel lists in the working area: `<working>/<mission>_release_<NNN>.kernel_list`
//! 3. otherwise this is release `001`, the first one
//!
//! Release numbers are compared as integers; the three-digit padding is only
//! how they are written.

pub mod tracker;

pub use tracker::{ReleaseState, ReleaseTracker};
