use crate::core::error::{ArchiveResult, ConfigError, ResultExt};
use crate::kernels::KernelRequest;
use crate::pattern::MetaKernelTemplate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static INFOMOD2_TIME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z$").expect("valid infomod2 time pattern")
});

static MAKELBL_TIME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$").expect("valid makelbl time pattern")
});

static RELEASE_DATE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid release date pattern"));

/// Configuration for spice-archive
/// Searched in order: archive.toml, .archive.toml, .config/archive.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
  pub mission: MissionConfig,
  pub directories: DirectoriesConfig,
  #[serde(default)]
  pub kernels_to_load: Vec<KernelRequest>,
  #[serde(default)]
  pub meta_kernels: MetaKernelsConfig,
}

/// Mission identity and archive coverage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionConfig {
  /// Mission acronym used in every archive name, e.g. "insight"
  pub acronym: String,

  #[serde(default)]
  pub date_format: DateFormat,

  pub mission_start: String,
  pub mission_finish: String,

  /// Increment bounds are optional but must be given together
  #[serde(default)]
  pub increment_start: Option<String>,
  #[serde(default)]
  pub increment_finish: Option<String>,

  /// YYYY-MM-DD; today when absent
  #[serde(default)]
  pub release_date: Option<String>,
}

/// Accepted layout of configured times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
  /// YYYY-MM-DDThh:mm:ss.sssZ
  #[default]
  Infomod2,
  /// YYYY-MM-DDThh:mm:ssZ
  Makelbl,
}

impl DateFormat {
  pub fn description(&self) -> &'static str {
    match self {
      DateFormat::Infomod2 => "YYYY-MM-DDThh:mm:ss.sssZ",
      DateFormat::Makelbl => "YYYY-MM-DDThh:mm:ssZ",
    }
  }

  pub fn accepts(&self, value: &str) -> bool {
    match self {
      DateFormat::Infomod2 => INFOMOD2_TIME.is_match(value),
      DateFormat::Makelbl => MAKELBL_TIME.is_match(value),
    }
  }
}

/// Archive areas; relative paths resolve against the current directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoriesConfig {
  pub working: PathBuf,
  pub staging: PathBuf,
  #[serde(rename = "final")]
  pub final_dir: PathBuf,
  pub kernels: PathBuf,
}

/// Meta-kernel name templates and user-provided meta-kernel files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetaKernelsConfig {
  #[serde(default)]
  pub templates: Vec<MetaKernelTemplate>,
  #[serde(default)]
  pub inputs: Vec<PathBuf>,
}

impl MissionConfig {
  /// Check time formats, the increment pairing rule and the release date
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.acronym.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "mission.acronym".to_string(),
      });
    }

    let times = [
      ("mission_start", Some(&self.mission_start)),
      ("mission_finish", Some(&self.mission_finish)),
      ("increment_start", self.increment_start.as_ref()),
      ("increment_finish", self.increment_finish.as_ref()),
    ];
    for (field, value) in times {
      if let Some(value) = value
        && !self.date_format.accepts(value)
      {
        return Err(ConfigError::InvalidDate {
          field: field.to_string(),
          value: value.clone(),
          format: self.date_format.description().to_string(),
        });
      }
    }

    if self.increment_start.is_some() != self.increment_finish.is_some() {
      return Err(ConfigError::UnpairedIncrement);
    }

    if let Some(date) = &self.release_date
      && !RELEASE_DATE.is_match(date)
    {
      return Err(ConfigError::InvalidDate {
        field: "release_date".to_string(),
        value: date.clone(),
        format: "YYYY-MM-DD".to_string(),
      });
    }

    Ok(())
  }

  /// Configured release date, or today
  pub fn release_date(&self) -> String {
    self
      .release_date
      .clone()
      .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
  }

  /// Both increment bounds, when configured
  pub fn increment(&self) -> Option<(&str, &str)> {
    match (&self.increment_start, &self.increment_finish) {
      (Some(start), Some(finish)) => Some((start.as_str(), finish.as_str())),
      _ => None,
    }
  }
}

impl ArchiveConfig {
  /// Find config file in search order: archive.toml, .archive.toml, .config/archive.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("archive.toml"),
      path.join(".archive.toml"),
      path.join(".config").join("archive.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load from an explicit file, or search `search_root`
  pub fn load(search_root: &Path, explicit: Option<&Path>) -> ArchiveResult<Self> {
    let config_path = match explicit {
      Some(path) => path.to_path_buf(),
      None => Self::find_config_path(search_root).ok_or_else(|| ConfigError::NotFound {
        search_root: search_root.to_path_buf(),
      })?,
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content)?;

    config.validate()?;

    Ok(config)
  }

  /// Deserialize without validating
  pub fn parse(content: &str) -> ArchiveResult<Self> {
    Ok(toml_edit::de::from_str(content)?)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    self.mission.validate()?;

    for template in &self.meta_kernels.templates {
      for field in &template.fields {
        if field.length == 0 {
          return Err(ConfigError::InvalidValue {
            field: format!("meta_kernels.templates[{}].fields.{}.length", template.name, field.name),
            value: "0".to_string(),
            reason: "field lengths must be positive".to_string(),
          });
        }
      }
    }

    Ok(())
  }
}
