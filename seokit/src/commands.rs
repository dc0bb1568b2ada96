use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{info, warn};
use seokit_config::Config;
use seokit_html::{MaterializeOptions, MaterializeReport};
use seokit_source::{RewriteReport, Rewriter};

/// Size the global rayon pool from `jobs`, or the CPU count when unset.
///
/// # Errors
///
/// Returns an error if the global pool was already built.
pub fn configure_thread_pool(jobs: Option<usize>) -> Result<()> {
  let thread_count = jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()?;
  log::debug!("Using {thread_count} worker thread(s)");
  Ok(())
}

/// Write a default configuration file.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn init(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Add your routes and pages to \
     it."
  );
  Ok(())
}

/// Generate one page per configured route.
///
/// Per-route failures are logged and counted in the report. Only a missing
/// or unreadable base document is an error.
///
/// # Errors
///
/// Returns an error if the base document cannot be read.
pub fn materialize(
  config: &Config,
  base: Option<PathBuf>,
  output_root: Option<PathBuf>,
  dry_run: bool,
) -> Result<MaterializeReport> {
  let settings = config.materialize();
  let base = base.unwrap_or(settings.base_document);
  let output_root = output_root.unwrap_or(settings.output_root);

  if config.routes.is_empty() {
    warn!("No routes configured, nothing to materialize");
  }

  let options = MaterializeOptions {
    site: config.site(),
    dry_run,
  };
  seokit_html::materialize(&base, &config.routes, &output_root, &options)
    .wrap_err("Cannot materialize route pages")
}

/// Rewrite every configured page source.
///
/// With `check`, nothing is written and the run fails if any file would
/// change.
///
/// # Errors
///
/// Returns an error if the component name is unusable, or in check mode
/// when a file is out of date.
pub fn rewrite(
  config: &Config,
  root: Option<PathBuf>,
  dry_run: bool,
  check: bool,
) -> Result<RewriteReport> {
  let settings = config.rewrite();
  let rewriter =
    Rewriter::new(&settings).wrap_err("Invalid rewrite configuration")?;
  let root = root.unwrap_or_else(|| settings.root.clone());

  if config.pages.is_empty() {
    warn!("No pages configured, nothing to rewrite");
  }

  let report = rewriter.rewrite_all(&root, &config.pages, dry_run || check);

  if check {
    let changed = report.changed();
    if !changed.is_empty() {
      bail!(
        "{} page source(s) are out of date: {}",
        changed.len(),
        changed
          .iter()
          .map(|path| path.display().to_string())
          .collect::<Vec<_>>()
          .join(", ")
      );
    }
  }

  Ok(report)
}
