//! Page source rewriting.
//!
//! Each configured page source gets three passes: the metadata component is
//! imported, exactly one metadata block carries the page's title and
//! description, and the first top-level heading is set while later ones are
//! demoted. Files are only written when their content changes, and running
//! the rewrite twice leaves the output of the first run untouched.
//!
//! ```rust
//! use seokit_config::{MetaSpec, RewriteConfig};
//! use seokit_source::Rewriter;
//!
//! let rewriter = Rewriter::new(&RewriteConfig::default()).unwrap();
//! let spec = MetaSpec {
//!   heading: Some("Pricing".into()),
//!   ..Default::default()
//! };
//!
//! let out = rewriter.rewrite_text("<h1>Old</h1><h1>Plans</h1>", &spec);
//! assert_eq!(
//!   out,
//!   "import Seo from \"@/components/Seo\";\n<h1>Pricing</h1><h2>Plans</h2>"
//! );
//! ```

pub mod error;
pub mod rewrite;
pub mod scan;
pub mod stages;

pub use error::RewriteError;
pub use rewrite::{RewriteReport, RewriteStatus, Rewriter};
pub use scan::{HeadingMatch, Scanner};
