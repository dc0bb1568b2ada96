pub mod config;
pub mod error;
pub mod page;
pub mod route;
pub mod site;
pub mod templates;

pub use config::{Config, MaterializeConfig, RewriteConfig};
pub use error::ConfigError;
pub use page::{MetaSpec, PageSpec};
pub use route::RouteDescriptor;
pub use site::SiteConfig;
