//! Integration tests for `spice-archive kernels`

use crate::helpers::{TestArchive, json_output, run_spice_archive, run_spice_archive_failing};
use anyhow::Result;

#[test]
fn test_latest_kernel_selected() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_default_kernels()?;
  archive.add_kernel("lsk", "naif0011.tls")?;
  archive.add_kernel("fk", "insight_v04.tf")?;

  let output = run_spice_archive(&archive.path, &["kernels", "--json"])?;
  let sets = json_output(&output)?;
  let sets = sets.as_array().expect("array of kernel sets");

  assert_eq!(sets.len(), 4);
  assert_eq!(sets[0]["category"], "lsk");
  let lsk = sets[0]["kernels"][0].as_str().unwrap_or_default();
  assert!(lsk.ends_with("naif0012.tls"), "got: {}", lsk);
  let fk = sets[2]["kernels"][0].as_str().unwrap_or_default();
  assert!(fk.ends_with("insight_v05.tf"), "got: {}", fk);
  Ok(())
}

#[test]
fn test_missing_lsk_fails_with_validation_code() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_kernel("pck", "pck00010.tpc")?;

  let (code, stderr) = run_spice_archive_failing(&archive.path, &["kernels"])?;

  assert_eq!(code, 3);
  assert!(stderr.contains("LSK not found"), "got: {}", stderr);
  Ok(())
}

#[test]
fn test_missing_optional_kernels_are_tolerated() -> Result<()> {
  let archive = TestArchive::insight()?;
  archive.add_kernel("lsk", "naif0012.tls")?;

  let output = run_spice_archive(&archive.path, &["kernels"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("PCK: not found"), "got: {}", stdout);
  assert!(stdout.contains("naif0012.tls"), "got: {}", stdout);
  Ok(())
}

#[test]
fn test_literal_kernel_path() -> Result<()> {
  let config = crate::helpers::INSIGHT_CONFIG.replace(r"naif[0-9]{4}\.tls", "extra/naif0010.tls");
  let archive = TestArchive::new(&config)?;
  archive.touch("extra/naif0010.tls")?;
  archive.add_kernel("lsk", "naif0012.tls")?;

  let output = run_spice_archive(&archive.path, &["kernels", "--json"])?;
  let sets = json_output(&output)?;

  assert_eq!(sets[0]["kernels"][0], "extra/naif0010.tls");
  Ok(())
}

#[test]
fn test_unconfigured_lsk_still_required() -> Result<()> {
  let config = crate::helpers::INSIGHT_CONFIG.replace("[[kernels_to_load]]\ncategory = \"lsk\"\npatterns = ['naif[0-9]{4}\\.tls']\n\n", "");
  assert!(!config.contains("\"lsk\""));
  let archive = TestArchive::new(&config)?;
  archive.add_default_kernels()?;

  for command in ["kernels", "run"] {
    let (code, stderr) = run_spice_archive_failing(&archive.path, &[command])?;
    assert_eq!(code, 3, "{}", command);
    assert!(stderr.contains("LSK not found"), "{}: {}", command, stderr);
  }

  let (code, _) = run_spice_archive_failing(&archive.path, &["doctor"])?;
  assert_eq!(code, 3);
  Ok(())
}
