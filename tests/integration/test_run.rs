//! Integration tests for `spice-archive run`

use crate::helpers::{INSIGHT_CONFIG, TestArchive, json_output, run_spice_archive, run_spice_archive_failing};
use anyhow::Result;

#[test]
fn test_full_run() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;
  archive.add_bundle_label(7)?;

  let output = run_spice_archive(&archive.path, &["run", "--json"])?;
  let state = json_output(&output)?;

  assert_eq!(state["mission"], "insight");
  assert_eq!(state["release"]["release"], "008");
  assert_eq!(state["release_date"], "2021-04-04");
  assert_eq!(state["kernels"].as_array().map(|k| k.len()), Some(4));
  assert_eq!(state["mk_inputs"][0]["fields"]["VERSION"], "08");
  assert_eq!(state["increment_window"]["start"], "2021-04-03T20:53:00.000Z");
  Ok(())
}

#[test]
fn test_text_output() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;

  let output = run_spice_archive(&archive.path, &["run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("insight release 001"), "got: {}", stdout);
  assert!(stdout.contains("First release"), "got: {}", stdout);
  Ok(())
}

#[test]
fn test_incoherent_coverage() -> Result<()> {
  let config = INSIGHT_CONFIG.replace("2021-04-23T20:53:00Z", "2060-01-01T00:00:00Z");
  let archive = TestArchive::new(&config)?;
  archive.add_default_kernels()?;

  let (code, stderr) = run_spice_archive_failing(&archive.path, &["run"])?;

  assert_eq!(code, 3);
  assert!(stderr.contains("increment_finish <= mission_finish"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_unpaired_increment_is_a_config_error() -> Result<()> {
  let config = INSIGHT_CONFIG.replace("increment_finish = \"2021-04-23T20:53:00Z\"\n", "");
  let archive = TestArchive::new(&config)?;

  let (code, stderr) = run_spice_archive_failing(&archive.path, &["run"])?;

  assert_eq!(code, 1);
  assert!(stderr.contains("need to be provided together"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_missing_final_directory() -> Result<()> {
  let archive = TestArchive::insight()?;
  std::fs::remove_dir_all(archive.path.join("final"))?;

  let (code, stderr) = run_spice_archive_failing(&archive.path, &["run"])?;

  assert_eq!(code, 1);
  assert!(stderr.contains("final directory does not exist"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;
  std::fs::rename(archive.path.join("archive.toml"), archive.path.join("insight.toml"))?;

  run_spice_archive_failing(&archive.path, &["run"])?;
  run_spice_archive(&archive.path, &["run", "--config", "insight.toml"])?;
  Ok(())
}
