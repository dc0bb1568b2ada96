use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while materializing route pages.
#[derive(Debug, Error)]
pub enum MaterializeError {
  /// The base document does not exist. Nothing can be generated without it.
  #[error("Base document not found: {}. Build the site first.", .0.display())]
  MissingInput(PathBuf),

  #[error("Failed to read {}: {source}", path.display())]
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

  #[error("Failed to serialize document: {0}")]
  Serialize(#[from] io::Error),

  #[error("Serialized document is not valid UTF-8: {0}")]
  Encoding(#[from] std::string::FromUtf8Error),
}
