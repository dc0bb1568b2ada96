use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for seokit
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "seokit: per-route static pages and SEO metadata for single-page sites"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the seokit CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new seokit configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "seokit.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Write one pre-rendered page per configured route from the built
  /// HTML document.
  Materialize {
    /// Built HTML document to clone for every route.
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Directory receiving `<route>/index.html`.
    #[arg(short, long)]
    output_root: Option<PathBuf>,

    /// Render every page but write nothing.
    #[arg(short = 'n', long)]
    dry_run: bool,
  },

  /// Apply heading and metadata settings to the configured page sources.
  Rewrite {
    /// Directory page files are resolved against.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Report what would change but write nothing.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Like --dry-run, but fail if any file would change.
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
