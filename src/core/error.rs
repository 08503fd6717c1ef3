//! Error types for spice-archive with contextual messages and exit codes
//!
//! Every failure of the resolution engine is terminal for the current run: the
//! errors below describe configuration or input-data defects, never transient
//! conditions, so nothing is retried. Each category carries an optional help
//! message printed under the error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for spice-archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (patterns, kernels, coverage, failed checks)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for spice-archive
#[derive(Debug)]
pub enum ArchiveError {
  /// Configuration errors
  Config(ConfigError),

  /// Filename template errors
  Pattern(PatternError),

  /// Kernel resolution errors
  Kernel(KernelError),

  /// Archive coverage errors
  Coverage(CoverageError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl ArchiveError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ArchiveError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ArchiveError::Message { message, context } => ArchiveError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ArchiveError::Io(e) => ArchiveError::Message {
        message: format!("I/O error: {}", e),
        context: Some(ctx_str),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ArchiveError::Config(_) => ExitCode::User,
      ArchiveError::Pattern(_) => ExitCode::Validation,
      ArchiveError::Kernel(_) => ExitCode::Validation,
      ArchiveError::Coverage(_) => ExitCode::Validation,
      ArchiveError::Io(_) => ExitCode::System,
      ArchiveError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ArchiveError::Config(e) => e.help_message(),
      ArchiveError::Pattern(e) => e.help_message(),
      ArchiveError::Kernel(e) => e.help_message(),
      ArchiveError::Coverage(e) => e.help_message(),
      ArchiveError::Io(_) | ArchiveError::Message { .. } => None,
    }
  }
}

impl fmt::Display for ArchiveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArchiveError::Config(e) => write!(f, "{}", e),
      ArchiveError::Pattern(e) => write!(f, "{}", e),
      ArchiveError::Kernel(e) => write!(f, "{}", e),
      ArchiveError::Coverage(e) => write!(f, "{}", e),
      ArchiveError::Io(e) => write!(f, "I/O error: {}", e),
      ArchiveError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ArchiveError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ArchiveError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ArchiveError {
  fn from(err: io::Error) -> Self {
    ArchiveError::Io(err)
  }
}

impl From<String> for ArchiveError {
  fn from(msg: String) -> Self {
    ArchiveError::message(msg)
  }
}

impl From<&str> for ArchiveError {
  fn from(msg: &str) -> Self {
    ArchiveError::message(msg)
  }
}

impl From<ConfigError> for ArchiveError {
  fn from(err: ConfigError) -> Self {
    ArchiveError::Config(err)
  }
}

impl From<PatternError> for ArchiveError {
  fn from(err: PatternError) -> Self {
    ArchiveError::Pattern(err)
  }
}

impl From<KernelError> for ArchiveError {
  fn from(err: KernelError) -> Self {
    ArchiveError::Kernel(err)
  }
}

impl From<CoverageError> for ArchiveError {
  fn from(err: CoverageError) -> Self {
    ArchiveError::Coverage(err)
  }
}

impl From<toml_edit::de::Error> for ArchiveError {
  fn from(err: toml_edit::de::Error) -> Self {
    ArchiveError::Config(ConfigError::Parse {
      reason: err.to_string(),
    })
  }
}

impl From<serde_json::Error> for ArchiveError {
  fn from(err: serde_json::Error) -> Self {
    ArchiveError::message(format!("JSON error: {}", err))
  }
}

impl From<glob::PatternError> for ArchiveError {
  fn from(err: glob::PatternError) -> Self {
    ArchiveError::message(format!("Glob pattern error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// archive.toml not found
  NotFound { search_root: PathBuf },

  /// archive.toml could not be deserialized
  Parse { reason: String },

  /// Missing required field
  MissingField { field: String },

  /// Field present but with an unusable value
  InvalidValue { field: String, value: String, reason: String },

  /// Date or time string not in the configured format
  InvalidDate { field: String, value: String, format: String },

  /// Only one of increment_start / increment_finish was provided
  UnpairedIncrement,

  /// A required directory does not exist
  DirectoryNotFound { role: String, path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create archive.toml in the current directory or pass --config <PATH>.".to_string())
      }
      ConfigError::InvalidDate { format, .. } => Some(format!("Use the {} format.", format)),
      ConfigError::UnpairedIncrement => {
        Some("Set both increment_start and increment_finish under [mission], or neither.".to_string())
      }
      ConfigError::DirectoryNotFound { role, .. } => Some(format!(
        "Create the {} directory or fix [directories] {} in archive.toml.",
        role, role
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No spice-archive configuration found.\nExpected file: {}/archive.toml",
          search_root.display()
        )
      }
      ConfigError::Parse { reason } => write!(f, "Failed to parse configuration: {}", reason),
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidValue { field, value, reason } => {
        write!(f, "Invalid value '{}' for {}: {}", value, field, reason)
      }
      ConfigError::InvalidDate { field, value, format } => {
        write!(f, "{} parameter '{}' does not match the required format: {}", field, value, format)
      }
      ConfigError::UnpairedIncrement => write!(
        f,
        "If provided via configuration, increment_start and increment_finish need to be provided together"
      ),
      ConfigError::DirectoryNotFound { role, path } => {
        write!(f, "{} directory does not exist: {}", role, path.display())
      }
    }
  }
}

/// Filename template errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
  /// A `$NAME` placeholder has no declared field
  UndefinedField { template: String, field: String },

  /// Filename length differs from the template's substituted length
  LengthMismatch {
    template: String,
    filename: String,
    expected: usize,
    actual: usize,
  },

  /// A literal character of the template does not match the filename
  LiteralMismatch {
    template: String,
    filename: String,
    offset: usize,
    expected: char,
    found: char,
  },

  /// A repeated placeholder bound two different values
  InconsistentField {
    template: String,
    field: String,
    first: String,
    second: String,
  },

  /// A `$` token remains after removing every declared field
  UnresolvedPattern { template: String, remainder: String },

  /// A declared field does not occur in the name template
  PatternNotPresent { template: String, field: String },

  /// A meta-kernel file matches no configured template
  MetaKernelNotMatched { name: String },
}

impl PatternError {
  fn help_message(&self) -> Option<String> {
    match self {
      PatternError::UndefinedField { field, .. } => Some(format!(
        "Declare a field named '{}' with its length under the meta-kernel template.",
        field
      )),
      PatternError::LengthMismatch { .. } => {
        Some("Check the declared field lengths against the real filename.".to_string())
      }
      PatternError::UnresolvedPattern { .. } => {
        Some("Every $PLACEHOLDER in a meta-kernel name needs a declared field.".to_string())
      }
      PatternError::PatternNotPresent { field, .. } => Some(format!(
        "Remove field '{}' or add ${} to the meta-kernel name.",
        field, field
      )),
      PatternError::MetaKernelNotMatched { .. } => {
        Some("Rename the meta-kernel or add a matching [[meta_kernels.templates]] entry.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for PatternError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PatternError::UndefinedField { template, field } => {
        write!(f, "Field '{}' used in template '{}' is not defined", field, template)
      }
      PatternError::LengthMismatch {
        template,
        filename,
        expected,
        actual,
      } => write!(
        f,
        "'{}' has {} characters but template '{}' expects {}",
        filename, actual, template, expected
      ),
      PatternError::LiteralMismatch {
        template,
        filename,
        offset,
        expected,
        found,
      } => write!(
        f,
        "'{}' does not match template '{}' at position {}: expected '{}', found '{}'",
        filename, template, offset, expected, found
      ),
      PatternError::InconsistentField {
        template,
        field,
        first,
        second,
      } => write!(
        f,
        "Field '{}' of template '{}' has conflicting values '{}' and '{}'",
        field, template, first, second
      ),
      PatternError::UnresolvedPattern { template, remainder } => write!(
        f,
        "The meta-kernel patterns of '{}' are not all defined via configuration (unresolved: '{}')",
        template, remainder
      ),
      PatternError::PatternNotPresent { template, field } => {
        write!(f, "The meta-kernel pattern {} is not present in '{}'", field, template)
      }
      PatternError::MetaKernelNotMatched { name } => {
        write!(f, "Meta-kernel {} has not been matched in configuration", name)
      }
    }
  }
}

/// Kernel resolution errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
  /// A mandatory kernel category resolved to nothing
  MissingMandatory { category: String },

  /// A single-kernel category resolved to several files
  Ambiguous { category: String, candidates: Vec<String> },

  /// A search pattern is not a valid regular expression
  InvalidPattern { pattern: String, reason: String },
}

impl KernelError {
  fn help_message(&self) -> Option<String> {
    match self {
      KernelError::MissingMandatory { category } => Some(format!(
        "Add the {} kernel to the kernels directory or fix its pattern in [[kernels_to_load]].",
        category.to_uppercase()
      )),
      KernelError::Ambiguous { .. } => Some("Only one LSK should be obtained; narrow the patterns.".to_string()),
      KernelError::InvalidPattern { .. } => Some("Kernel patterns are regular expressions.".to_string()),
    }
  }
}

impl fmt::Display for KernelError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KernelError::MissingMandatory { category } => {
        write!(f, "{} not found", category.to_uppercase())
      }
      KernelError::Ambiguous { category, candidates } => write!(
        f,
        "Only one {} should be obtained, found {}: {}",
        category.to_uppercase(),
        candidates.len(),
        candidates.join(", ")
      ),
      KernelError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid kernel pattern '{}': {}", pattern, reason)
      }
    }
  }
}

/// Archive coverage errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
  /// One or more ordering invariants between mission and increment bounds failed
  Incoherent { violations: Vec<String> },

  /// A time string could not be converted
  UnparsableTime { field: String, value: String },
}

impl CoverageError {
  fn help_message(&self) -> Option<String> {
    match self {
      CoverageError::Incoherent { .. } => Some(
        "Mission start must precede the increment, which must end no later than the mission finish.".to_string(),
      ),
      CoverageError::UnparsableTime { .. } => {
        Some("Provided dates must be ISO-8601 UTC, e.g. 2021-04-03T20:53:00Z.".to_string())
      }
    }
  }
}

impl fmt::Display for CoverageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CoverageError::Incoherent { violations } => {
        write!(f, "Incoherent archive coverage: {}", violations.join("; "))
      }
      CoverageError::UnparsableTime { field, value } => {
        write!(f, "Provided {} '{}' is not loadable", field, value)
      }
    }
  }
}

/// Result type alias for spice-archive
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ArchiveResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ArchiveError>,
{
  fn with_context<F>(self, f: F) -> ArchiveResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ArchiveError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
