use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::{debug, error, info, warn};
use rayon::prelude::*;
use seokit_config::{MetaSpec, PageSpec, RewriteConfig};
use seokit_utils::{Tally, write_if_changed};

use crate::{error::RewriteError, scan::Scanner, stages};

/// What happened to one page source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStatus {
  /// The file was (or in a dry run, would be) rewritten.
  Updated,
  /// The rewrite produced identical text; nothing was written.
  Unchanged,
  /// The file does not exist.
  Missing,
}

/// Outcome of rewriting every configured page.
#[derive(Debug, Default)]
pub struct RewriteReport {
  /// Per-file outcome, in page order.
  pub results: Vec<(PathBuf, Result<RewriteStatus, RewriteError>)>,
}

impl RewriteReport {
  #[must_use]
  pub fn tally(&self) -> Tally {
    let mut tally = Tally::default();
    for (_, result) in &self.results {
      match result {
        Ok(RewriteStatus::Updated) => tally.changed += 1,
        Ok(RewriteStatus::Unchanged) => tally.unchanged += 1,
        Ok(RewriteStatus::Missing) => tally.skipped += 1,
        Err(_) => tally.failed += 1,
      }
    }
    tally
  }

  /// Files that were, or would be, changed.
  #[must_use]
  pub fn changed(&self) -> Vec<&Path> {
    self
      .results
      .iter()
      .filter(|(_, result)| matches!(result, Ok(RewriteStatus::Updated)))
      .map(|(path, _)| path.as_path())
      .collect()
  }

  /// One-line run summary.
  #[must_use]
  pub fn summary(&self) -> String {
    let tally = self.tally();
    format!(
      "Done. Files changed: {} (unchanged: {}, skipped: {}, failed: {})",
      tally.changed, tally.unchanged, tally.skipped, tally.failed
    )
  }
}

/// Applies page metadata to component source files.
#[derive(Debug, Clone)]
pub struct Rewriter {
  scanner:   Scanner,
  component: String,
  import:    String,
  level:     u8,
}

impl Rewriter {
  /// # Errors
  ///
  /// Returns [`RewriteError::Pattern`] if the component name cannot be
  /// turned into a match pattern.
  pub fn new(config: &RewriteConfig) -> Result<Self, RewriteError> {
    Ok(Self {
      scanner:   Scanner::new(&config.component)?,
      component: config.component.clone(),
      import:    config.import.clone(),
      level:     config.heading_level,
    })
  }

  /// Run every stage over `text`.
  ///
  /// Each stage rescans the output of the previous one, so the result is the
  /// same whether the stages run once or again over their own output.
  #[must_use]
  pub fn rewrite_text(&self, text: &str, spec: &MetaSpec) -> String {
    if spec.is_noop() {
      return text.to_string();
    }

    let mut text = stages::ensure_import(text, &self.scanner, &self.import);
    if spec.promote_subheading {
      text = stages::promote_subheading(&text, &self.scanner, self.level);
    }
    text = stages::upsert_metadata_block(
      &text,
      &self.scanner,
      &self.component,
      self.level,
      spec,
    );
    stages::set_primary_heading(&text, &self.scanner, self.level, spec)
  }

  /// Rewrite one file in place, writing only when its content changes.
  ///
  /// # Errors
  ///
  /// Returns [`RewriteError::Read`] or [`RewriteError::Write`] on I/O
  /// failure. A missing file is not an error.
  pub fn rewrite_file(
    &self,
    path: &Path,
    spec: &MetaSpec,
    dry_run: bool,
  ) -> Result<RewriteStatus, RewriteError> {
    let before = match fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Ok(RewriteStatus::Missing);
      },
      Err(e) => {
        return Err(RewriteError::Read {
          path:   path.to_path_buf(),
          source: e,
        });
      },
    };

    let after = self.rewrite_text(&before, spec);
    if before == after {
      return Ok(RewriteStatus::Unchanged);
    }
    if dry_run {
      debug!("{}: {} -> {} bytes", path.display(), before.len(), after.len());
      return Ok(RewriteStatus::Updated);
    }

    write_if_changed(path, &before, &after).map_err(|e| {
      RewriteError::Write {
        path:   path.to_path_buf(),
        source: e,
      }
    })?;
    Ok(RewriteStatus::Updated)
  }

  /// Rewrite every page, resolving relative files against `root`.
  ///
  /// Files are processed in parallel and reported in page order. One
  /// failing file does not stop the others.
  #[must_use]
  pub fn rewrite_all(
    &self,
    root: &Path,
    pages: &[PageSpec],
    dry_run: bool,
  ) -> RewriteReport {
    info!("Rewriting {} page source(s) under {}", pages.len(), root.display());

    let results: Vec<Result<RewriteStatus, RewriteError>> = pages
      .par_iter()
      .map(|page| self.rewrite_file(&root.join(&page.file), &page.meta, dry_run))
      .collect();

    let mut report = RewriteReport::default();
    for (page, result) in pages.iter().zip(results) {
      let name = page.file.display();
      match &result {
        Ok(RewriteStatus::Updated) if dry_run => info!("Would update: {name}"),
        Ok(RewriteStatus::Updated) => info!("Updated: {name}"),
        Ok(RewriteStatus::Unchanged) => info!("No change needed: {name}"),
        Ok(RewriteStatus::Missing) => warn!("Skip (missing): {name}"),
        Err(e) => error!("Failed: {name}: {e}"),
      }
      report.results.push((page.file.clone(), result));
    }

    info!("{}", report.summary());
    report
  }
}
