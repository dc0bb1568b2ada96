use color_eyre::eyre::Result;
use seokit::{
  cli::{Cli, Commands},
  commands,
  logging,
};
use seokit_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  logging::init(cli.verbose);

  // Init runs before any config is loaded, there may not be one yet
  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return commands::init(output, format, *force);
  }

  let config = Config::load(&cli.config_files, &cli.config_overrides)?;
  commands::configure_thread_pool(config.jobs)?;

  match cli.command {
    Commands::Materialize {
      base,
      output_root,
      dry_run,
    } => {
      commands::materialize(&config, base, output_root, dry_run)?;
    },
    Commands::Rewrite {
      root,
      dry_run,
      check,
    } => {
      commands::rewrite(&config, root, dry_run, check)?;
    },
    Commands::Init { .. } => {},
  }

  Ok(())
}
