//! Error type for `foodrank-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("input file not found: {}", path.display())]
  MissingInput { path: PathBuf },

  #[error("{}: missing required column {column:?}", path.display())]
  MissingColumn { path: PathBuf, column: &'static str },

  #[error("{}: malformed CSV: {source}", path.display())]
  MalformedInput {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },

  /// The ranked store is missing, unreadable or has the wrong shape. It is
  /// never rebuilt implicitly.
  #[error("ranked store {} is corrupt: {reason}", path.display())]
  CorruptStore { path: PathBuf, reason: String },

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv write error on {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },

  #[error("failed to move temporary file to {}: {source}", path.display())]
  Persist {
    path:   PathBuf,
    #[source]
    source: tempfile::PersistError,
  },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
