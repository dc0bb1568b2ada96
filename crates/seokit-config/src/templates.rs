use thiserror::Error;

/// Error type for template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),
}

/// Default configuration template in TOML, commented so that a fresh
/// `seokit init` explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# seokit configuration file

# Number of threads for per-route / per-file work (defaults to CPU count)
# jobs = 4

[site]
# Appended to every page title as "{title} | {name}"
name = "My Site"
# Absolute origin used for canonical and og:url values
origin = "https://example.com"

[materialize]
# Built HTML document cloned for every route
base_document = "dist/index.html"
# Each route is written to <output_root>/<path>/index.html
output_root = "dist"

[rewrite]
# Directory that page files below are resolved against
root = "."
# Metadata component tag name and the import that provides it
component = "Seo"
import = 'import Seo from "@/components/Seo";'
# Rank of the page's primary heading (1 means <h1>)
heading_level = 1

# One table per route to materialize
[[routes]]
path = "pricing"
title = "Pricing"
description = "Simple, transparent pricing."
# Social preview title, defaults to `title`
og_title = "Pricing - My Site"

# One table per page source file to rewrite
[[pages]]
file = "src/pages/Pricing.tsx"
# Text of the first top-level heading (omit to leave headings alone)
heading = "Simple monthly pricing"
# Metadata block values (omit both to leave the block alone)
seo_title = "Simple Monthly Pricing | My Site"
seo_description = "Pick a monthly plan that includes design, hosting and updates."
# Keep a second top-level heading instead of demoting it
keep_second_heading = false
# Promote the first subheading when the page has no top-level heading
promote_subheading = false
"#;

/// Default configuration template in JSON. JSON has no comments, see the TOML
/// template for field descriptions.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "site": {
    "name": "My Site",
    "origin": "https://example.com"
  },
  "materialize": {
    "base_document": "dist/index.html",
    "output_root": "dist"
  },
  "rewrite": {
    "root": ".",
    "component": "Seo",
    "import": "import Seo from \"@/components/Seo\";",
    "heading_level": 1
  },
  "routes": [
    {
      "path": "pricing",
      "title": "Pricing",
      "description": "Simple, transparent pricing.",
      "og_title": "Pricing - My Site"
    }
  ],
  "pages": [
    {
      "file": "src/pages/Pricing.tsx",
      "heading": "Simple monthly pricing",
      "seo_title": "Simple Monthly Pricing | My Site",
      "seo_description": "Pick a monthly plan that includes design, hosting and updates.",
      "keep_second_heading": false,
      "promote_subheading": false
    }
  ]
}
"#;

/// Get the default configuration template for a format.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for anything but `toml` and
/// `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_ascii_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
