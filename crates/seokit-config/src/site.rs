use seokit_macros::Configurable;
use serde::{Deserialize, Serialize};

/// Site identity shared by every generated page.
///
/// Neither value is derived per route: `name` is the brand suffix appended to
/// every `<title>`, and `origin` is the absolute scheme + host that canonical
/// and `og:url` values are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct SiteConfig {
  /// Site name appended to page titles (`"{title} | {name}"`).
  #[config(key = "name")]
  pub name: String,

  /// Absolute origin such as `https://example.com`.
  #[config(key = "origin")]
  pub origin: String,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      name:   "My Site".to_string(),
      origin: "https://example.com".to_string(),
    }
  }
}

impl SiteConfig {
  /// Absolute URL of a route, joining origin and path with exactly one slash.
  ///
  /// ```
  /// use seokit_config::SiteConfig;
  ///
  /// let site = SiteConfig {
  ///   name:   "All Done Sites".into(),
  ///   origin: "https://alldonesites.com/".into(),
  /// };
  /// assert_eq!(site.canonical_url("/pricing/"), "https://alldonesites.com/pricing");
  /// ```
  #[must_use]
  pub fn canonical_url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.origin.trim_end_matches('/'),
      path.trim_matches('/')
    )
  }

  /// Document title for a route.
  #[must_use]
  pub fn page_title(&self, title: &str) -> String {
    format!("{title} | {}", self.name)
  }

  pub(crate) fn validate(&self, errors: &mut Vec<String>) {
    if !(self.origin.starts_with("https://")
      || self.origin.starts_with("http://"))
    {
      errors.push(format!(
        "Site origin must be an absolute http(s) URL: '{}'",
        self.origin
      ));
    }
    if self.name.trim().is_empty() {
      errors.push("Site name must not be empty".to_string());
    }
  }
}
