mod checks;
mod commands;
mod core;
mod coverage;
mod kernels;
mod pattern;
mod release;
mod ui;

use clap::{Parser, Subcommand};
use crate::core::config::ArchiveConfig;
use crate::core::context::ArchiveContext;
use crate::core::error::{ArchiveError, print_error};
use std::path::{Path, PathBuf};

/// Resolve the release, kernels and coverage of the next SPICE archive increment
#[derive(Parser)]
#[command(name = "spice-archive")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Configuration file (default: archive.toml, .archive.toml or .config/archive.toml)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Log every resolution step to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Emit log lines as JSON
  #[arg(long, global = true)]
  log_json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve everything needed to generate the next release
  Run {
    /// Output the working state in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the next release number
  Release {
    /// Output the release state in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Resolve the configured kernels
  Kernels {
    /// Output resolved kernels in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Match a meta-kernel filename against the configured templates
  Match {
    /// Meta-kernel filename (or path; only the file name is matched)
    filename: String,
    /// Output the matched fields in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Run every health check and report all issues
  Doctor {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  ui::logging::init_logging(cli.verbose, cli.log_json);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  if let Err(err) = dispatch(&root, cli.config.as_deref(), cli.command) {
    handle_error(err);
  }
}

fn dispatch(root: &Path, config_path: Option<&Path>, command: Commands) -> Result<(), ArchiveError> {
  match command {
    // Configuration only: these must work before the archive areas exist
    Commands::Match { filename, json } => {
      let config = ArchiveConfig::load(root, config_path)?;
      commands::run_match(&config, &filename, json)
    }
    Commands::Doctor { json, strict } => {
      let config = ArchiveConfig::load(root, config_path)?;
      commands::run_doctor(root, config, json, strict)
    }

    Commands::Run { json } => commands::run_resolve(&ArchiveContext::build(root, config_path)?, json),
    Commands::Release { json } => commands::run_release(&ArchiveContext::build(root, config_path)?, json),
    Commands::Kernels { json } => commands::run_kernels(&ArchiveContext::build(root, config_path)?, json),
  }
}

fn handle_error(err: ArchiveError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
