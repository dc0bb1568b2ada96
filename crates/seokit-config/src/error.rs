use std::{io, path::PathBuf};

use thiserror::Error;

use crate::templates::TemplateError;

/// Errors raised while loading, overriding or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse JSON config from {}: {source}", path.display())]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to parse TOML config from {}: {source}", path.display())]
  Toml {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },

  /// The file extension is neither `.toml` nor `.json`.
  #[error("Unsupported config file format: {}", .0.display())]
  UnsupportedFormat(PathBuf),

  /// A malformed `KEY=VALUE` override, unknown key or unparsable value.
  #[error("{0}")]
  Override(String),

  /// Every validation failure found, in discovery order.
  #[error("Configuration validation errors:\n{}", .0.join("\n"))]
  Invalid(Vec<String>),

  #[error(transparent)]
  Template(#[from] TemplateError),
}
