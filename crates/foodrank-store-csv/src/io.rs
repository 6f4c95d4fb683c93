//! Shared CSV reading and atomic writing helpers.

use std::{
  fs::{self, File},
  io::ErrorKind,
  path::Path,
};

use foodrank_core::{FactRow, fact::FACT_COLUMNS};
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Open `path` as a headed CSV reader. A missing file maps to
/// [`Error::MissingInput`].
pub fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
  let file = File::open(path).map_err(|source| match source.kind() {
    ErrorKind::NotFound => Error::MissingInput { path: path.to_path_buf() },
    _ => Error::io(path, source),
  })?;
  Ok(
    csv::ReaderBuilder::new()
      .trim(csv::Trim::Headers)
      .from_reader(file),
  )
}

/// Fail with [`Error::MissingColumn`] unless every column is in the header.
pub fn require_columns(
  reader: &mut csv::Reader<File>,
  path: &Path,
  columns: &[&'static str],
) -> Result<()> {
  let headers = reader.headers().map_err(|source| Error::MalformedInput {
    path: path.to_path_buf(),
    source,
  })?;
  for &column in columns {
    if !headers.iter().any(|h| h == column) {
      return Err(Error::MissingColumn { path: path.to_path_buf(), column });
    }
  }
  Ok(())
}

/// Read every row of a headed CSV file after checking its columns.
pub fn read_rows<T: DeserializeOwned>(
  path: &Path,
  columns: &[&'static str],
) -> Result<Vec<T>> {
  let mut reader = open_reader(path)?;
  require_columns(&mut reader, path, columns)?;
  reader
    .deserialize()
    .collect::<Result<Vec<T>, csv::Error>>()
    .map_err(|source| Error::MalformedInput { path: path.to_path_buf(), source })
}

/// Write fact rows (header first, even when empty) to `path`, creating the
/// parent directory. The file only appears once fully written.
pub fn write_fact_rows(path: &Path, rows: &[FactRow]) -> Result<()> {
  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or(Path::new("."));
  fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

  let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
  let write_err = |source: csv::Error| Error::Write { path: path.to_path_buf(), source };
  {
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(tmp.as_file_mut());
    writer.write_record(FACT_COLUMNS).map_err(write_err)?;
    for row in rows {
      writer.serialize(row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
  }
  tmp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
  tmp
    .persist(path)
    .map_err(|source| Error::Persist { path: path.to_path_buf(), source })?;
  Ok(())
}
