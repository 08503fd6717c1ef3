//! Integration tests for `spice-archive doctor`

use crate::helpers::{INSIGHT_CONFIG, TestArchive, json_output, run_spice_archive, run_spice_archive_failing};
use anyhow::Result;

#[test]
fn test_healthy_archive() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;

  let output = run_spice_archive(&archive.path, &["doctor", "--json"])?;
  let results = json_output(&output)?;
  let results = results.as_array().expect("array of check results");

  assert_eq!(results.len(), 4);
  assert!(results.iter().all(|r| r["passed"] == true), "got: {:?}", results);
  Ok(())
}

#[test]
fn test_reports_every_problem() -> Result<()> {
  let config = INSIGHT_CONFIG
    .replace("insight_2021_v08.tm", "insight_v08.tm")
    .replace("2021-04-23T20:53:00Z", "2021-04-01T00:00:00Z");
  let archive = TestArchive::new(&config)?;

  let (code, _) = run_spice_archive_failing(&archive.path, &["doctor"])?;
  assert_eq!(code, 3);

  let output = std::process::Command::new(env!("CARGO_BIN_EXE_spice-archive"))
    .current_dir(&archive.path)
    .args(["doctor", "--json"])
    .output()?;
  let results = json_output(&output)?;
  let failed: Vec<&str> = results
    .as_array()
    .into_iter()
    .flatten()
    .filter(|r| r["passed"] == false)
    .filter_map(|r| r["check_name"].as_str())
    .collect();

  assert!(failed.contains(&"meta-kernel-names"), "got: {:?}", failed);
  assert!(failed.contains(&"archive-coverage"), "got: {:?}", failed);
  assert!(failed.contains(&"mandatory-kernels"), "got: {:?}", failed);
  Ok(())
}

#[test]
fn test_strict_fails_on_warnings() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_kernel("lsk", "naif0012.tls")?;

  run_spice_archive(&archive.path, &["doctor"])?;
  let (code, _) = run_spice_archive_failing(&archive.path, &["doctor", "--strict"])?;
  assert_eq!(code, 3);
  Ok(())
}

#[test]
fn test_staging_checked_below_mission_directory() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;
  std::fs::remove_dir(archive.path.join("staging/insight_spice"))?;

  let output = run_spice_archive(&archive.path, &["doctor", "--json"])?;
  let results = json_output(&output)?;
  let directories = results
    .as_array()
    .into_iter()
    .flatten()
    .find(|r| r["check_name"] == "directories")
    .cloned()
    .unwrap_or_default();

  assert_eq!(directories["passed"], false, "got: {}", directories);
  assert_eq!(directories["severity"], "Warning", "got: {}", directories);
  assert!(
    directories["message"].as_str().unwrap_or_default().contains("insight_spice"),
    "got: {}",
    directories
  );
  Ok(())
}
