//! [`CsvRankedStore`] — the ranked table persisted as a single CSV file.

use std::path::{Path, PathBuf};

use foodrank_core::{
  RankedTable,
  fact::FACT_COLUMNS,
  store::RankedStore,
};
use tracing::debug;

use crate::{
  Error, Result,
  encode::RawFactRow,
  io::{read_rows, write_fact_rows},
};

pub const RANKED_STORE_FILE: &str = "ranked_compounds.csv";

/// A ranked store at a fixed path. Whether the file exists is the only thing
/// that decides a rebuild.
#[derive(Debug, Clone)]
pub struct CsvRankedStore {
  path: PathBuf,
}

impl CsvRankedStore {
  /// The store file `ranked_compounds.csv` inside `dir`.
  pub fn new(dir: impl AsRef<Path>) -> Self {
    Self { path: dir.as_ref().join(RANKED_STORE_FILE) }
  }

  pub fn path(&self) -> &Path { &self.path }

  fn corrupt(&self, reason: impl ToString) -> Error {
    Error::CorruptStore { path: self.path.clone(), reason: reason.to_string() }
  }
}

impl RankedStore for CsvRankedStore {
  type Error = Error;

  fn exists(&self) -> bool { self.path.is_file() }

  fn write(&self, table: &RankedTable) -> Result<()> {
    write_fact_rows(&self.path, table.rows())?;
    debug!(path = %self.path.display(), rows = table.len(), "wrote ranked store");
    Ok(())
  }

  fn read(&self) -> Result<RankedTable> {
    let raws = read_rows::<RawFactRow>(&self.path, &FACT_COLUMNS).map_err(|e| match e {
      Error::MissingInput { .. } => self.corrupt("file not found"),
      Error::MissingColumn { column, .. } => {
        self.corrupt(format!("missing column {column:?}"))
      }
      Error::MalformedInput { source, .. } => self.corrupt(source),
      Error::Io { source, .. } => self.corrupt(source),
      other => other,
    })?;

    let rows = raws
      .into_iter()
      .map(RawFactRow::into_fact_row)
      .collect::<Result<Vec<_>, String>>()
      .map_err(|reason| self.corrupt(reason))?;

    debug!(path = %self.path.display(), rows = rows.len(), "read ranked store");
    Ok(RankedTable::from_rows(rows))
  }
}
