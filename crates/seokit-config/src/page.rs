use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Desired heading and metadata for one page source file.
///
/// Every value is supplied by the caller. Absent values leave the matching
/// part of the file untouched, so a spec with nothing set is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaSpec {
  /// Text for the first top-level heading.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub heading: Option<String>,

  /// `title` attribute of the metadata declaration block.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub seo_title: Option<String>,

  /// `description` attribute of the metadata declaration block.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub seo_description: Option<String>,

  /// Keep the second top-level heading as-is instead of demoting it.
  pub keep_second_heading: bool,

  /// Promote the first subheading when the file has no top-level heading.
  pub promote_subheading: bool,
}

impl MetaSpec {
  /// Whether the metadata declaration block should be touched at all.
  #[must_use]
  pub const fn has_seo(&self) -> bool {
    self.seo_title.is_some() || self.seo_description.is_some()
  }

  /// Whether applying this spec can never change a file.
  #[must_use]
  pub const fn is_noop(&self) -> bool {
    self.heading.is_none() && !self.has_seo() && !self.promote_subheading
  }
}

/// A [`MetaSpec`] bound to the file it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
  /// Source file, relative to the rewrite root.
  pub file: PathBuf,

  #[serde(flatten)]
  pub meta: MetaSpec,
}

impl PageSpec {
  #[must_use]
  pub fn new(file: impl Into<PathBuf>, meta: MetaSpec) -> Self {
    Self {
      file: file.into(),
      meta,
    }
  }
}
