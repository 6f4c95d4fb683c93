//! CSV backend for the foodrank pipeline.
//!
//! Implements the `foodrank-core` backend traits over flat files:
//! [`CsvTables`] reads the raw tables, [`CsvRankedStore`] persists the ranked
//! table and [`CsvReportSink`] writes query reports. Every write goes to a
//! temporary file in the target directory and is renamed into place.

mod encode;
mod io;
mod report;
mod store;
mod tables;

pub mod error;

pub use error::{Error, Result};
pub use report::CsvReportSink;
pub use store::{CsvRankedStore, RANKED_STORE_FILE};
pub use tables::{COMPOUNDS_FILE, CONTENTS_FILE, CsvTables, FOODS_FILE};

#[cfg(test)]
mod tests;
