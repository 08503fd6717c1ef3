//! Archive resolution session
//!
//! Sequences the resolution steps for one increment against an
//! [`ArchiveContext`]:
//!
//! 1. Setup: meta-kernel name templates, user-provided meta-kernels, release number
//! 2. Kernels: LSK, PCK, FK, SCLK and any other configured category
//! 3. Coverage: mission and increment bounds
//!
//! The first failing step aborts the session; no partial `WorkingState` is
//! handed out.

use crate::core::context::ArchiveContext;
use crate::core::error::ArchiveResult;
use crate::coverage::{CoverageWindow, TemporalConsistencyChecker, TimeConverter, UtcConverter};
use crate::kernels::{FsKernelSource, KernelSource, KernelTypeResolver, ResolvedKernelSet};
use crate::pattern::MetaKernelInput;
use crate::pattern::metakernel::match_inputs;
use crate::release::{ReleaseState, ReleaseTracker};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Everything resolved for the increment being prepared
#[derive(Debug, Clone, Serialize)]
pub struct WorkingState {
  pub mission: String,
  pub release_date: String,
  pub release: ReleaseState,
  /// Where the increment is staged (`<staging>/<acronym>_spice`)
  pub staging: PathBuf,
  pub kernels: Vec<ResolvedKernelSet>,
  /// Validated meta-kernel name templates
  pub meta_kernels: Vec<String>,
  pub mk_inputs: Vec<MetaKernelInput>,
  pub mission_window: CoverageWindow,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub increment_window: Option<CoverageWindow>,
}

/// Coverage windows after a successful consistency check
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coverage {
  pub mission: CoverageWindow,
  pub increment: Option<CoverageWindow>,
}

/// One resolution run over an archive
pub struct ArchiveSession<'a, S: KernelSource = FsKernelSource, T: TimeConverter = UtcConverter> {
  ctx: &'a ArchiveContext,
  resolver: KernelTypeResolver<S>,
  converter: T,
  step: usize,
}

impl<'a> ArchiveSession<'a> {
  /// Session over the real filesystem with ISO-8601 UTC times
  pub fn new(ctx: &'a ArchiveContext) -> Self {
    Self::with_parts(ctx, FsKernelSource::new(&ctx.root), UtcConverter)
  }
}

impl<'a, S: KernelSource, T: TimeConverter> ArchiveSession<'a, S, T> {
  pub fn with_parts(ctx: &'a ArchiveContext, source: S, converter: T) -> Self {
    Self {
      ctx,
      resolver: KernelTypeResolver::new(source, &ctx.dirs.kernels),
      converter,
      step: 1,
    }
  }

  fn header(&mut self, title: &str) {
    let line = format!("Step {} - {}", self.step, title);
    info!("{}", line);
    info!("{}", "-".repeat(line.len()));
    self.step += 1;
  }

  /// Run every step and collect the working state
  pub fn run(&mut self) -> ArchiveResult<WorkingState> {
    self.header("Setup the archive generation");
    let meta_kernels = self.meta_kernels()?;
    let mk_inputs = self.mk_inputs()?;
    let release = self.release()?;

    self.header("Load LSK, PCK, FK and SCLK kernels");
    let kernels = self.kernels()?;

    self.header("Check the archive coverage");
    let coverage = self.coverage()?;

    Ok(WorkingState {
      mission: self.ctx.mission().to_string(),
      release_date: self.ctx.config.mission.release_date(),
      release,
      staging: self.ctx.dirs.staging.clone(),
      kernels,
      meta_kernels,
      mk_inputs,
      mission_window: coverage.mission,
      increment_window: coverage.increment,
    })
  }

  /// Validate every configured meta-kernel name template
  pub fn meta_kernels(&self) -> ArchiveResult<Vec<String>> {
    let templates = &self.ctx.config.meta_kernels.templates;
    for template in templates {
      template.validate()?;
    }
    if !templates.is_empty() {
      info!("-- Meta-kernel name templates are consistent with their fields.");
    }
    Ok(templates.iter().map(|t| t.name.clone()).collect())
  }

  /// Match user-provided meta-kernels against the configured templates
  pub fn mk_inputs(&self) -> ArchiveResult<Vec<MetaKernelInput>> {
    let config = &self.ctx.config.meta_kernels;
    let inputs = match_inputs(&config.inputs, &config.templates)?;
    for input in &inputs {
      info!("-- Meta-kernel {} matches {}.", input.path.display(), input.template);
    }
    Ok(inputs)
  }

  pub fn release(&self) -> ArchiveResult<ReleaseState> {
    ReleaseTracker::new(self.ctx.mission()).scan(&self.ctx.dirs.final_dir, &self.ctx.dirs.working)
  }

  pub fn kernels(&self) -> ArchiveResult<Vec<ResolvedKernelSet>> {
    self.resolver.resolve_all(&self.ctx.config.kernels_to_load)
  }

  /// Convert the configured bounds and check their ordering
  pub fn coverage(&self) -> ArchiveResult<Coverage> {
    let mission = &self.ctx.config.mission;
    let window = CoverageWindow::new(
      self.converter.to_epoch("mission_start", &mission.mission_start)?,
      self.converter.to_epoch("mission_finish", &mission.mission_finish)?,
    );
    let increment = match mission.increment() {
      Some((start, finish)) => Some(CoverageWindow::new(
        self.converter.to_epoch("increment_start", start)?,
        self.converter.to_epoch("increment_finish", finish)?,
      )),
      None => None,
    };
    info!("-- Provided dates are loadable with current setup.");

    TemporalConsistencyChecker::check(&window, increment.as_ref())?;

    Ok(Coverage {
      mission: window,
      increment,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::ArchiveConfig;
  use crate::core::error::{ArchiveError, CoverageError, KernelError, PatternError};
  use std::fs;
  use std::path::Path;

  const CONFIG: &str = r#"
[mission]
acronym = "insight"
date_format = "makelbl"
mission_start = "2018-05-05T11:05:00Z"
mission_finish = "2050-01-01T00:00:00Z"
increment_start = "2021-04-03T20:53:00Z"
increment_finish = "2021-04-23T20:53:00Z"
release_date = "2021-04-04"

[directories]
working = "working"
staging = "staging"
final = "final"
kernels = "kernels"

[[kernels_to_load]]
category = "lsk"
patterns = ['naif[0-9]{4}\.tls']

[[kernels_to_load]]
category = "fk"
patterns = ['insight_v[0-9]{2}\.tf']

[meta_kernels]
inputs = ["working/insight_2021_v08.tm"]

[[meta_kernels.templates]]
name = "insight_$YEAR_v$VERSION.tm"
fields = [{ name = "YEAR", length = 4 }, { name = "VERSION", length = 2 }]
"#;

  fn archive(root: &Path) {
    for dir in ["working", "final/insight_spice", "kernels/lsk", "kernels/fk"] {
      fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("kernels/lsk/naif0012.tls"), "").unwrap();
    fs::write(root.join("kernels/fk/insight_v05.tf"), "").unwrap();
    fs::write(root.join("final/insight_spice/bundle_insight_spice_v007.xml"), "").unwrap();
  }

  fn context(root: &Path, content: &str) -> ArchiveContext {
    let config = ArchiveConfig::parse(content).unwrap();
    ArchiveContext::from_config(root, config).unwrap()
  }

  #[test]
  fn test_run_collects_working_state() {
    let root = tempfile::tempdir().unwrap();
    archive(root.path());
    let ctx = context(root.path(), CONFIG);

    let state = ArchiveSession::new(&ctx).run().unwrap();
    assert_eq!(state.release.release, "008");
    assert_eq!(state.release_date, "2021-04-04");
    assert_eq!(state.staging, root.path().join("staging/insight_spice"));
    assert_eq!(state.kernels.len(), 2);
    assert_eq!(state.kernels[0].names(), vec!["naif0012.tls".to_string()]);
    assert_eq!(state.meta_kernels, vec!["insight_$YEAR_v$VERSION.tm".to_string()]);
    assert_eq!(state.mk_inputs[0].fields.get("YEAR"), Some("2021"));
    assert!(state.increment_window.is_some());
  }

  #[test]
  fn test_unmatched_meta_kernel_aborts() {
    let root = tempfile::tempdir().unwrap();
    archive(root.path());
    let ctx = context(root.path(), &CONFIG.replace("insight_2021_v08.tm", "insight_v08.tm"));

    let err = ArchiveSession::new(&ctx).run().unwrap_err();
    assert!(matches!(
      err,
      ArchiveError::Pattern(PatternError::MetaKernelNotMatched { .. })
    ));
  }

  #[test]
  fn test_kernels_without_lsk_entry_abort() {
    let root = tempfile::tempdir().unwrap();
    archive(root.path());
    let content = CONFIG.replace("[[kernels_to_load]]\ncategory = \"lsk\"\npatterns = ['naif[0-9]{4}\\.tls']\n", "");
    assert!(!content.contains("\"lsk\""));
    let ctx = context(root.path(), &content);

    let err = ArchiveSession::new(&ctx).run().unwrap_err();
    assert!(matches!(
      err,
      ArchiveError::Kernel(KernelError::MissingMandatory { ref category }) if category == "lsk"
    ));
  }

  #[test]
  fn test_reversed_increment_aborts() {
    let root = tempfile::tempdir().unwrap();
    archive(root.path());
    let content = CONFIG.replace("2021-04-23T20:53:00Z", "2021-04-01T00:00:00Z");
    let ctx = context(root.path(), &content);

    let err = ArchiveSession::new(&ctx).run().unwrap_err();
    assert!(matches!(err, ArchiveError::Coverage(CoverageError::Incoherent { .. })));
  }

  #[test]
  fn test_coverage_without_increment() {
    let root = tempfile::tempdir().unwrap();
    archive(root.path());
    let content = CONFIG
      .replace("increment_start = \"2021-04-03T20:53:00Z\"\n", "")
      .replace("increment_finish = \"2021-04-23T20:53:00Z\"\n", "");
    let ctx = context(root.path(), &content);

    let coverage = ArchiveSession::new(&ctx).coverage().unwrap();
    assert!(coverage.increment.is_none());
  }
}
