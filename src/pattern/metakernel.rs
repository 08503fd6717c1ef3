//! Meta-kernel name templates
//!
//! A meta-kernel name such as `insight_$YEAR_v$VERSION.tm` is only usable when
//! every placeholder it contains is declared and every declared field occurs in
//! it. That self-consistency is checked here before any real file is matched.

use super::matcher::{Field, MatchResult, match_pattern};
use crate::core::error::PatternError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Check that `template` and its declared `fields` describe each other exactly.
///
/// Each declared field removes one `$NAME` occurrence from a working copy of
/// the template. A field with nothing left to remove is `PatternNotPresent`;
/// any `$` surviving all removals is `UnresolvedPattern`.
pub fn validate_name(template: &str, fields: &[Field]) -> Result<(), PatternError> {
  let mut remainder = template.to_string();

  for field in fields {
    let token = format!("${}", field.name);
    match remainder.find(&token) {
      Some(pos) => remainder.replace_range(pos..pos + token.len(), ""),
      None => {
        return Err(PatternError::PatternNotPresent {
          template: template.to_string(),
          field: field.name.clone(),
        });
      }
    }
  }

  if remainder.contains('$') {
    return Err(PatternError::UnresolvedPattern {
      template: template.to_string(),
      remainder,
    });
  }

  Ok(())
}

/// A configured meta-kernel name template
///
/// ```toml
/// [[meta_kernels.templates]]
/// name = "insight_$YEAR_v$VERSION.tm"
/// fields = [{ name = "YEAR", length = 4 }, { name = "VERSION", length = 2 }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaKernelTemplate {
  pub name: String,
  #[serde(default)]
  pub fields: Vec<Field>,
}

impl MetaKernelTemplate {
  pub fn validate(&self) -> Result<(), PatternError> {
    validate_name(&self.name, &self.fields)
  }

  /// Decompose a meta-kernel filename against this template
  pub fn match_name(&self, filename: &str) -> Result<MatchResult, PatternError> {
    match_pattern(filename, &self.name, &self.fields)
  }
}

/// A user-provided meta-kernel that matched a configured template
#[derive(Debug, Clone, Serialize)]
pub struct MetaKernelInput {
  pub path: PathBuf,
  pub template: String,
  pub fields: MatchResult,
}

/// Find the first template matching the basename of `path`
pub fn match_input(path: &Path, templates: &[MetaKernelTemplate]) -> Result<MetaKernelInput, PatternError> {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| path.to_string_lossy().to_string());

  templates
    .iter()
    .find_map(|t| {
      t.match_name(&name).ok().map(|fields| MetaKernelInput {
        path: path.to_path_buf(),
        template: t.name.clone(),
        fields,
      })
    })
    .ok_or(PatternError::MetaKernelNotMatched { name })
}

/// Match every input, failing on the first that no template accepts
pub fn match_inputs(inputs: &[PathBuf], templates: &[MetaKernelTemplate]) -> Result<Vec<MetaKernelInput>, PatternError> {
  inputs.iter().map(|p| match_input(p, templates)).collect()
}
