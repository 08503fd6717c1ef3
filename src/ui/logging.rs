//! Log subscriber setup
//!
//! Logs go to stderr so that stdout only carries command output (text or
//! `--json`). `RUST_LOG` overrides the level chosen from the command line.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default level: `warn`, or `info` with `--verbose`
pub fn level_for(verbose: bool) -> Level {
  if verbose { Level::INFO } else { Level::WARN }
}

/// Install the global subscriber; later calls are ignored.
///
/// `json` emits newline-delimited JSON log lines instead of plain text.
pub fn init_logging(verbose: bool, json: bool) {
  let level = level_for(verbose);
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  if json {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
      .try_init()
      .ok();
  } else {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init()
      .ok();
  }
}
