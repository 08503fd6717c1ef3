//! Release tracking from prior final-area and working-area artifacts

use crate::core::error::{ArchiveResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Release number of the run being prepared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
  /// Three-digit zero-padded release number, e.g. "008"
  pub release: String,
  /// Previous release number, empty for the first release
  pub previous_release: String,
  /// Whether this release increments an existing archive
  pub is_increment: bool,
}

impl ReleaseState {
  pub fn first() -> Self {
    Self {
      release: format_release(1),
      previous_release: String::new(),
      is_increment: false,
    }
  }

  fn after(previous: u32) -> Self {
    Self {
      release: format_release(previous + 1),
      previous_release: format_release(previous),
      is_increment: true,
    }
  }
}

fn format_release(number: u32) -> String {
  format!("{:03}", number)
}

/// Release digits as a number. A number without a successor cannot be
/// incremented, so it does not count as a release.
fn release_number(digits: &str) -> Option<u32> {
  digits.parse::<u32>().ok().filter(|n| n.checked_add(1).is_some())
}

/// Number of a final-area `<prefix><NNN>...` bundle label name
fn bundle_label_number(name: &str, prefix: &str) -> Option<u32> {
  let rest = name.strip_prefix(prefix)?;
  let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
  release_number(&rest[..end])
}

/// Number of a working-area `<prefix><NNN>.<ext>` name
fn kernel_list_number(name: &str, prefix: &str) -> Option<u32> {
  let rest = name.strip_prefix(prefix)?;
  let (digits, ext) = rest.split_once('.')?;
  if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) || ext.is_empty() || ext.contains('.') {
    return None;
  }
  release_number(digits)
}

/// Compute the next release from listings of the final and working areas.
///
/// Final-area bundle labels take precedence; working-area kernel lists are
/// only consulted when no label is found.
pub fn determine_release(final_listing: &[String], working_listing: &[String], mission: &str) -> ReleaseState {
  let marker = format!("bundle_{}_spice_v", mission);
  if let Some(previous) = final_listing.iter().filter_map(|n| bundle_label_number(n, &marker)).max() {
    return ReleaseState::after(previous);
  }

  let prefix = format!("{}_release_", mission);
  if let Some(previous) = working_listing.iter().filter_map(|n| kernel_list_number(n, &prefix)).max() {
    return ReleaseState::after(previous);
  }

  ReleaseState::first()
}

/// Scans the archive areas of one mission for prior releases
pub struct ReleaseTracker<'a> {
  mission: &'a str,
}

impl<'a> ReleaseTracker<'a> {
  pub fn new(mission: &'a str) -> Self {
    Self { mission }
  }

  /// Bundle label names below `<final>/<mission>_spice/`
  pub fn final_listing(&self, final_dir: &Path) -> ArchiveResult<Vec<String>> {
    let bundle_dir = final_dir.join(format!("{}_spice", self.mission));
    let pattern = format!(
      "{}/bundle_{}_spice_v*",
      glob::Pattern::escape(&bundle_dir.to_string_lossy()),
      glob::Pattern::escape(self.mission)
    );
    glob_names(&pattern)
  }

  /// Kernel list names in the working area
  pub fn working_listing(&self, working_dir: &Path) -> ArchiveResult<Vec<String>> {
    let pattern = format!(
      "{}/{}_release_*",
      glob::Pattern::escape(&working_dir.to_string_lossy()),
      glob::Pattern::escape(self.mission)
    );
    glob_names(&pattern)
  }

  /// Determine the release from the filesystem, logging which source decided it
  pub fn scan(&self, final_dir: &Path, working_dir: &Path) -> ArchiveResult<ReleaseState> {
    info!("-- Checking existence of previous release.");

    let final_listing = self.final_listing(final_dir)?;
    let state = determine_release(&final_listing, &[], self.mission);
    if state.is_increment {
      info!("     Generating release {}.", state.release);
      return Ok(state);
    }

    warn!("-- Bundle label not found. Checking previous kernel list.");
    let working_listing = self.working_listing(working_dir)?;
    let state = determine_release(&[], &working_listing, self.mission);
    if state.is_increment {
      info!("     Generating release {}.", state.release);
    } else {
      warn!("     This is the first release.");
    }
    Ok(state)
  }
}

fn glob_names(pattern: &str) -> ArchiveResult<Vec<String>> {
  let mut names = Vec::new();
  for entry in glob::glob(pattern)? {
    let path = entry
      .map_err(std::io::Error::from)
      .with_context(|| format!("Failed to read entries for {}", pattern))?;
    if let Some(name) = path.file_name() {
      names.push(name.to_string_lossy().to_string());
    }
  }
  Ok(names)
}
