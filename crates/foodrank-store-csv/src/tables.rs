//! [`CsvTables`] — loads the raw tables from a directory of CSV files.

use std::path::PathBuf;

use foodrank_core::{store::TableSource, table::RawTables};
use tracing::debug;

use crate::{
  Error, Result,
  encode::{
    COMPOUND_COLUMNS, CONTENT_COLUMNS, FOOD_COLUMNS, RawCompound, RawContent,
    RawFood,
  },
  io::read_rows,
};

pub const FOODS_FILE: &str = "foods.csv";
pub const COMPOUNDS_FILE: &str = "compounds.csv";
pub const CONTENTS_FILE: &str = "contents.csv";

/// The raw input directory holding `foods.csv`, `compounds.csv` and
/// `contents.csv`.
#[derive(Debug, Clone)]
pub struct CsvTables {
  dir: PathBuf,
}

impl CsvTables {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }
}

impl TableSource for CsvTables {
  type Error = Error;

  fn load(&self) -> Result<RawTables> {
    let foods_path = self.dir.join(FOODS_FILE);
    let compounds_path = self.dir.join(COMPOUNDS_FILE);
    let contents_path = self.dir.join(CONTENTS_FILE);

    // Check all three up front so a missing file fails before any parsing.
    for path in [&foods_path, &compounds_path, &contents_path] {
      if !path.is_file() {
        return Err(Error::MissingInput { path: path.clone() });
      }
    }

    let foods = read_rows::<RawFood>(&foods_path, FOOD_COLUMNS)?
      .into_iter()
      .map(RawFood::into_food)
      .collect();
    let compounds = read_rows::<RawCompound>(&compounds_path, COMPOUND_COLUMNS)?
      .into_iter()
      .map(RawCompound::into_compound)
      .collect();
    let contents = read_rows::<RawContent>(&contents_path, CONTENT_COLUMNS)?
      .into_iter()
      .map(RawContent::into_content)
      .collect();

    debug!(dir = %self.dir.display(), "loaded raw tables");
    Ok(RawTables { foods, compounds, contents })
  }
}
