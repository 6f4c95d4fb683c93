//! Backend traits for the pipeline and their supporting types.
//!
//! Concrete backends (e.g. `foodrank-store-csv`) implement these; the
//! pipeline in [`crate::pipeline`] depends only on the abstractions.

use crate::{fact::RankedTable, query::QueryResult, table::RawTables};

/// Source of the three raw input tables.
pub trait TableSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load foods, compounds and content rows. Either all three tables load or
  /// the call fails; there is no partial result.
  fn load(&self) -> Result<RawTables, Self::Error>;
}

/// Persisted cache of the full ranked table.
///
/// Existence alone decides whether the table is rebuilt; there is no
/// versioning against the raw inputs.
pub trait RankedStore {
  type Error: std::error::Error + Send + Sync + 'static;

  fn exists(&self) -> bool;

  /// Replace the stored table. Readers never observe a partial write.
  fn write(&self, table: &RankedTable) -> Result<(), Self::Error>;

  /// Read the stored table back, in stored order.
  fn read(&self) -> Result<RankedTable, Self::Error>;
}

/// Destination for query results.
pub trait ReportSink {
  type Error: std::error::Error + Send + Sync + 'static;
  /// Identifies the emitted report, e.g. a file path.
  type Output;

  /// Write `result` in full and return where it went.
  fn emit(&self, result: &QueryResult) -> Result<Self::Output, Self::Error>;
}
