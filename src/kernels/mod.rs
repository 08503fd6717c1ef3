//! Kernel categories, requests and their resolution against the kernels directory
//!
//! - **resolver**: picks the file(s) satisfying each configured request and
//!   enforces per-category cardinality

pub mod resolver;

pub use resolver::{FsKernelSource, KernelSource, KernelTypeResolver};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// SPICE kernel category; also the name of its subdirectory under the kernels directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelCategory {
  /// Leapseconds
  Lsk,
  /// Planetary constants
  Pck,
  /// Frames
  Fk,
  /// Spacecraft clock
  Sclk,
  /// Ephemeris
  Spk,
  /// Orientation
  Ck,
  /// Instrument
  Ik,
  /// Shape
  Dsk,
  /// Meta-kernel
  Mk,
}

/// How many resolved kernels a category accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
  /// Exactly one file, anything else is fatal
  ExactlyOne,
  /// Any number; none is worth a warning
  Optional,
  /// Decided by the request's `required` flag
  Configured,
}

impl KernelCategory {
  pub fn dir_name(&self) -> &'static str {
    match self {
      KernelCategory::Lsk => "lsk",
      KernelCategory::Pck => "pck",
      KernelCategory::Fk => "fk",
      KernelCategory::Sclk => "sclk",
      KernelCategory::Spk => "spk",
      KernelCategory::Ck => "ck",
      KernelCategory::Ik => "ik",
      KernelCategory::Dsk => "dsk",
      KernelCategory::Mk => "mk",
    }
  }

  pub fn cardinality(&self) -> Cardinality {
    match self {
      KernelCategory::Lsk => Cardinality::ExactlyOne,
      KernelCategory::Pck | KernelCategory::Fk | KernelCategory::Sclk => Cardinality::Optional,
      _ => Cardinality::Configured,
    }
  }
}

impl fmt::Display for KernelCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.dir_name().to_uppercase())
  }
}

/// Literal paths and/or regular expressions for one kernel category
///
/// ```toml
/// [[kernels_to_load]]
/// category = "fk"
/// patterns = ["insight_v[0-9]{2}\\.tf", "kernels/fk/insight_struct_v01.tf"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelRequest {
  pub category: KernelCategory,
  #[serde(default)]
  pub patterns: Vec<String>,
  /// Only consulted for categories without a built-in cardinality rule
  #[serde(default)]
  pub required: bool,
}

impl KernelRequest {
  #[cfg(test)]
  pub fn new(category: KernelCategory, patterns: &[&str]) -> Self {
    Self {
      category,
      patterns: patterns.iter().map(|p| p.to_string()).collect(),
      required: false,
    }
  }
}

/// Files selected for one category, in pattern order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedKernelSet {
  pub category: KernelCategory,
  pub kernels: Vec<PathBuf>,
}

impl ResolvedKernelSet {
  pub fn is_empty(&self) -> bool {
    self.kernels.is_empty()
  }

  /// Kernel basenames, for log lines and text output
  pub fn names(&self) -> Vec<String> {
    self
      .kernels
      .iter()
      .map(|k| {
        k.file_name()
          .map(|n| n.to_string_lossy().to_string())
          .unwrap_or_else(|| k.display().to_string())
      })
      .collect()
  }
}

/// Fold requests of the same category together, keeping first-seen order.
///
/// An LSK is always resolved: without a configured `lsk` entry an empty one is
/// put first, which then fails as missing.
pub fn merge_requests(requests: &[KernelRequest]) -> Vec<KernelRequest> {
  let mut merged: Vec<KernelRequest> = Vec::new();
  for request in requests {
    match merged.iter_mut().find(|m| m.category == request.category) {
      Some(existing) => {
        existing.patterns.extend(request.patterns.iter().cloned());
        existing.required |= request.required;
      }
      None => merged.push(request.clone()),
    }
  }
  if !merged.iter().any(|m| m.category == KernelCategory::Lsk) {
    merged.insert(
      0,
      KernelRequest {
        category: KernelCategory::Lsk,
        patterns: Vec::new(),
        required: true,
      },
    );
  }
  merged
}
