//! Integration tests for `spice-archive release`

use crate::helpers::{TestArchive, json_output, run_spice_archive};
use anyhow::Result;

#[test]
fn test_first_release() -> Result<()> {
  let archive = TestArchive::insight()?;

  let output = run_spice_archive(&archive.path, &["release", "--json"])?;
  let state = json_output(&output)?;

  assert_eq!(state["release"], "001");
  assert_eq!(state["previous_release"], "");
  assert_eq!(state["is_increment"], false);
  Ok(())
}

#[test]
fn test_release_from_bundle_labels() -> Result<()> {
  let archive = TestArchive::insight()?;
  for release in 1..=7 {
    archive.add_bundle_label(release)?;
  }

  let output = run_spice_archive(&archive.path, &["release", "--json"])?;
  let state = json_output(&output)?;

  assert_eq!(state["release"], "008");
  assert_eq!(state["previous_release"], "007");
  assert_eq!(state["is_increment"], true);
  Ok(())
}

#[test]
fn test_release_from_working_kernel_lists() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_kernel_list(9)?;
  archive.add_kernel_list(10)?;

  let output = run_spice_archive(&archive.path, &["release"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Next release: 011"), "got: {}", stdout);
  assert!(stdout.contains("previous: 010"), "got: {}", stdout);
  Ok(())
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<()> {
  let archive = TestArchive::insight()?;

  let output = run_spice_archive(&archive.path, &["release", "--json", "--verbose"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(stderr.contains("This is the first release"), "got: {}", stderr);
  // stdout stays machine-readable
  json_output(&output)?;
  Ok(())
}
