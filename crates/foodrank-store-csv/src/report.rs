//! [`CsvReportSink`] — writes query results as named CSV reports.

use std::path::PathBuf;

use foodrank_core::{QueryResult, report::report_file_name, store::ReportSink};
use tracing::debug;

use crate::{Error, Result, io::write_fact_rows};

/// Writes each report into a results directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
  dir: PathBuf,
}

impl CsvReportSink {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }
}

impl ReportSink for CsvReportSink {
  type Error = Error;
  type Output = PathBuf;

  fn emit(&self, result: &QueryResult) -> Result<PathBuf> {
    let path = self.dir.join(report_file_name(&result.requested, result.top_n));
    write_fact_rows(&path, &result.rows)?;
    debug!(path = %path.display(), rows = result.rows.len(), "wrote report");
    Ok(path)
  }
}
