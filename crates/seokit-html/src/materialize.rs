use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::{debug, error, info};
use rayon::prelude::*;
use seokit_config::{RouteDescriptor, SiteConfig};
use seokit_utils::{Tally, write_output};

use crate::{document, error::MaterializeError};

/// Which route value a head anchor receives.
#[derive(Debug, Clone, Copy)]
enum RouteValue {
  Description,
  CanonicalUrl,
  SocialTitle,
}

/// `<meta>` anchors rewritten for every route, in application order.
const META_ANCHORS: [(&str, &str, RouteValue); 6] = [
  ("name", "description", RouteValue::Description),
  ("property", "og:url", RouteValue::CanonicalUrl),
  ("property", "og:title", RouteValue::SocialTitle),
  ("property", "og:description", RouteValue::Description),
  ("name", "twitter:title", RouteValue::SocialTitle),
  ("name", "twitter:description", RouteValue::Description),
];

/// Settings shared by every route of one run.
#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
  pub site:    SiteConfig,
  /// Render every route but write nothing.
  pub dry_run: bool,
}

/// A route whose page could not be produced.
#[derive(Debug)]
pub struct RouteFailure {
  /// The route's path, as configured.
  pub path:  String,
  pub error: MaterializeError,
}

/// Outcome of a materialization run.
#[derive(Debug, Default)]
pub struct MaterializeReport {
  /// Files written (or that would be written in a dry run), in route order.
  pub created:  Vec<PathBuf>,
  /// Routes that failed, in route order.
  pub failures: Vec<RouteFailure>,
}

impl MaterializeReport {
  #[must_use]
  pub const fn tally(&self) -> Tally {
    Tally {
      changed:   self.created.len(),
      unchanged: 0,
      skipped:   0,
      failed:    self.failures.len(),
    }
  }

  /// One-line run summary.
  #[must_use]
  pub fn summary(&self) -> String {
    let tally = self.tally();
    format!(
      "Done. Pages created: {}, failed: {}",
      tally.changed, tally.failed
    )
  }
}

/// Render the page for one route from the base document text.
///
/// The base text is parsed afresh, so no route ever observes another route's
/// edits. Anchors missing from the base document are skipped.
///
/// # Errors
///
/// Returns an error only if the edited document cannot be serialized.
pub fn render_route(
  base_html: &str,
  route: &RouteDescriptor,
  site: &SiteConfig,
) -> Result<String, MaterializeError> {
  let doc = document::parse(base_html);
  let canonical_url = site.canonical_url(&route.path);

  if !document::set_title(&doc, &site.page_title(&route.title)) {
    debug!("{}: base document has no <title>", route.path);
  }

  for (attr, value, source) in META_ANCHORS {
    let content = match source {
      RouteValue::Description => route.description.as_str(),
      RouteValue::CanonicalUrl => canonical_url.as_str(),
      RouteValue::SocialTitle => route.social_title(),
    };
    if !document::set_meta_content(&doc, attr, value, content) {
      debug!("{}: no <meta {attr}=\"{value}\"> to update", route.path);
    }
  }

  // Canonical insertion is additive only: a canonical link already present
  // in the template is kept as-is for every route.
  if document::has_canonical(&doc) {
    debug!(
      "{}: keeping template canonical link ({})",
      route.path,
      document::canonical_href(&doc).as_deref().unwrap_or("no href")
    );
  } else if !document::append_canonical(&doc, &canonical_url) {
    debug!("{}: no <head> to receive a canonical link", route.path);
  }

  document::serialize(&doc)
}

/// Output file for a route under `output_root`.
#[must_use]
pub fn route_output_path(output_root: &Path, route: &RouteDescriptor) -> PathBuf {
  output_root.join(&route.path).join("index.html")
}

/// Materialize one page per route from the base document.
///
/// Routes are rendered in parallel and are independent of each other. A
/// failing route is recorded in the report and does not stop the others.
/// The base document itself is never modified.
///
/// # Errors
///
/// Returns [`MaterializeError::MissingInput`] if the base document does not
/// exist, or [`MaterializeError::Read`] if it cannot be read. Nothing is
/// written in either case.
pub fn materialize(
  base_document: &Path,
  routes: &[RouteDescriptor],
  output_root: &Path,
  options: &MaterializeOptions,
) -> Result<MaterializeReport, MaterializeError> {
  let base_html = fs::read_to_string(base_document).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      MaterializeError::MissingInput(base_document.to_path_buf())
    } else {
      MaterializeError::Read {
        path:   base_document.to_path_buf(),
        source: e,
      }
    }
  })?;

  info!(
    "Generating {} static page(s) from {}",
    routes.len(),
    base_document.display()
  );

  let outcomes: Vec<Result<PathBuf, MaterializeError>> = routes
    .par_iter()
    .map(|route| materialize_route(&base_html, route, output_root, options))
    .collect();

  let mut report = MaterializeReport::default();
  for (route, outcome) in routes.iter().zip(outcomes) {
    match outcome {
      Ok(path) => {
        if options.dry_run {
          info!("Would create: /{}/index.html", route.path);
        } else {
          info!("Created: /{}/index.html", route.path);
        }
        report.created.push(path);
      },
      Err(e) => {
        error!("Failed: /{}/index.html: {e}", route.path);
        report.failures.push(RouteFailure {
          path:  route.path.clone(),
          error: e,
        });
      },
    }
  }

  info!("{}", report.summary());
  Ok(report)
}

fn materialize_route(
  base_html: &str,
  route: &RouteDescriptor,
  output_root: &Path,
  options: &MaterializeOptions,
) -> Result<PathBuf, MaterializeError> {
  let html = render_route(base_html, route, &options.site)?;
  let path = route_output_path(output_root, route);

  if !options.dry_run {
    write_output(&path, &html).map_err(|e| {
      MaterializeError::Write {
        path:   path.clone(),
        source: e,
      }
    })?;
  }

  Ok(path)
}
