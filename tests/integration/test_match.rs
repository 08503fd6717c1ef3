//! Integration tests for `spice-archive match`

use crate::helpers::{TestArchive, json_output, run_spice_archive, run_spice_archive_failing};
use anyhow::Result;

#[test]
fn test_match_decomposes_fields() -> Result<()> {
  let archive = TestArchive::insight()?;

  let output = run_spice_archive(&archive.path, &["match", "insight_2021_v02.tm", "--json"])?;
  let input = json_output(&output)?;

  assert_eq!(input["template"], "insight_$YEAR_v$VERSION.tm");
  assert_eq!(input["fields"]["YEAR"], "2021");
  assert_eq!(input["fields"]["VERSION"], "02");
  Ok(())
}

#[test]
fn test_match_uses_file_name_only() -> Result<()> {
  let archive = TestArchive::insight()?;

  let output = run_spice_archive(&archive.path, &["match", "some/dir/insight_2019_v11.tm"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("YEAR = 2019"), "got: {}", stdout);
  Ok(())
}

#[test]
fn test_unmatched_name() -> Result<()> {
  let archive = TestArchive::insight()?;

  let (code, stderr) = run_spice_archive_failing(&archive.path, &["match", "insight_21_v02.tm"])?;

  assert_eq!(code, 3);
  assert!(stderr.contains("has not been matched in configuration"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_match_without_archive_directories() -> Result<()> {
  let archive = TestArchive::insight()?;
  std::fs::remove_dir_all(archive.path.join("final"))?;

  run_spice_archive(&archive.path, &["match", "insight_2021_v02.tm"])?;
  Ok(())
}
