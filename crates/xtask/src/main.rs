use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use seokit::cli::Cli;
use seokit_config::templates::{DEFAULT_JSON_TEMPLATE, DEFAULT_TOML_TEMPLATE};

const BIN_NAME: &str = "seokit";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the seokit CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "target/dist")]
    output_dir: PathBuf,

    /// Only generate the given artifact kind (may be repeated).
    #[arg(long, value_enum, action = clap::ArgAction::Append)]
    only: Vec<Artifact>,
  },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Artifact {
  /// Shell completions for bash, zsh, fish and PowerShell
  Completions,
  /// The seokit.1 manpage
  Manpage,
  /// Sample configuration files
  Config,
}

fn main() -> Result<()> {
  let xtask = Xtask::parse();

  match xtask.command {
    Commands::Dist { output_dir, only } => {
      let wanted = |artifact| only.is_empty() || only.contains(&artifact);

      if wanted(Artifact::Completions) {
        generate_completions(&output_dir)?;
      }
      if wanted(Artifact::Manpage) {
        generate_manpage(&output_dir)?;
      }
      if wanted(Artifact::Config) {
        write_sample_configs(&output_dir)?;
      }
    },
  }

  Ok(())
}

/// Generate shell completions for every supported shell.
fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;
  let mut cmd = Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
  }
  println!(
    "Shell completions generated in {}",
    completions_dir.display()
  );
  Ok(())
}

/// Generate the `seokit.1` manpage.
fn generate_manpage(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;
  let file_path = man_dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  Man::new(Cli::command())
    .render(&mut file)
    .context("Failed to render manpage")?;
  println!("Manpage generated in {}", man_dir.display());
  Ok(())
}

/// Ship the `seokit init` templates alongside the binary.
fn write_sample_configs(output_dir: &Path) -> Result<()> {
  let config_dir = output_dir.join("config");
  fs::create_dir_all(&config_dir)?;
  for (name, contents) in [
    ("seokit.example.toml", DEFAULT_TOML_TEMPLATE),
    ("seokit.example.json", DEFAULT_JSON_TEMPLATE),
  ] {
    let path = config_dir.join(name);
    fs::write(&path, contents)
      .with_context(|| format!("Failed to write {}", path.display()))?;
  }
  println!("Sample configuration written to {}", config_dir.display());
  Ok(())
}
