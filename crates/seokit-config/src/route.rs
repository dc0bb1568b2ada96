use serde::{Deserialize, Serialize};

/// One site route to materialize as `<output_root>/<path>/index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
  /// Relative URL segment without leading or trailing slash, e.g. `pricing`
  /// or `contact-enterprise`.
  pub path: String,

  /// Plain-text page title, suffixed with the site name in `<title>`.
  pub title: String,

  /// Meta, Open Graph and Twitter description.
  pub description: String,

  /// Social preview title. Falls back to [`Self::title`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub og_title: Option<String>,
}

impl RouteDescriptor {
  #[must_use]
  pub fn new(
    path: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      path:        path.into(),
      title:       title.into(),
      description: description.into(),
      og_title:    None,
    }
  }

  #[must_use]
  pub fn with_og_title(mut self, og_title: impl Into<String>) -> Self {
    self.og_title = Some(og_title.into());
    self
  }

  /// Title used for `og:title` and `twitter:title`.
  #[must_use]
  pub fn social_title(&self) -> &str {
    self.og_title.as_deref().unwrap_or(&self.title)
  }

  /// Check the path shape, pushing one message per problem found.
  pub(crate) fn validate(&self, index: usize, errors: &mut Vec<String>) {
    let path = &self.path;
    if path.is_empty() {
      errors.push(format!("Route {} has an empty path", index + 1));
      return;
    }
    if path.starts_with('/') || path.ends_with('/') {
      errors.push(format!(
        "Route path must not start or end with '/': '{path}'"
      ));
    }
    if path
      .trim_matches('/')
      .split('/')
      .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
      errors.push(format!(
        "Route path contains an empty or relative segment: '{path}'"
      ));
    }
  }
}
