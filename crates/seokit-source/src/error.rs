use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while rewriting page sources.
#[derive(Debug, Error)]
pub enum RewriteError {
  #[error("Invalid match pattern: {0}")]
  Pattern(#[from] regex::Error),

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
}
