//! Route page materialization.
//!
//! One built HTML document is cloned once per configured route. Each clone
//! gets its own `<title>`, description, Open Graph and Twitter values and,
//! when the template has none, a canonical link, and is written to
//! `<output_root>/<path>/index.html`. Static hosts such as GitHub Pages then
//! answer deep links with a real page instead of a 404 fallback.
//!
//! ```rust
//! use seokit_config::{RouteDescriptor, SiteConfig};
//! use seokit_html::render_route;
//!
//! let base = r#"<html><head><title>Old</title></head><body></body></html>"#;
//! let site = SiteConfig {
//!   name:   "Example".into(),
//!   origin: "https://example.com".into(),
//! };
//! let route = RouteDescriptor::new("faq", "FAQ", "Questions");
//!
//! let html = render_route(base, &route, &site).unwrap();
//! assert!(html.contains("<title>FAQ | Example</title>"));
//! ```

pub mod document;
pub mod error;
pub mod materialize;

pub use error::MaterializeError;
pub use materialize::{
  MaterializeOptions,
  MaterializeReport,
  RouteFailure,
  materialize,
  render_route,
  route_output_path,
};
