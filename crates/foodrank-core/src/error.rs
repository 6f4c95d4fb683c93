//! Error types for `foodrank-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no content rows with source_type {0:?} found after filtering")]
  EmptyRelevantSet(&'static str),

  #[error(
    "no data found for requested compounds [{}]; available compounds: [{}]",
    requested.join(", "),
    available.join(", ")
  )]
  NoMatchingCompounds {
    requested: Vec<String>,
    available: Vec<String>,
  },

  #[error("compound list is empty; enter at least one compound")]
  EmptyCompoundList,

  #[error("top_n must be at least 1, got {0}")]
  InvalidTopN(usize),

  #[error("backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure, keeping it reachable through `source()`.
  pub fn backend<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Backend(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
