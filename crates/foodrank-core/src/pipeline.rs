//! Build-or-read pipeline driving the query state machine:
//!
//! ```text
//! START → (store missing ? BUILD : READ) → VALIDATE → FILTER → TRUNCATE → EMIT
//! ```
//!
//! Every failure aborts before the report is emitted.

use std::collections::BTreeSet;

use tracing::info;

use crate::{
  Error, Result,
  build::build,
  fact::RankedTable,
  query::{QueryResult, query},
  store::{RankedStore, ReportSink, TableSource},
};

/// A finished query together with the identifier of its emitted report.
#[derive(Debug)]
pub struct QueryOutcome<O> {
  pub result: QueryResult,
  pub output: O,
}

/// Return the stored ranked table, building and persisting it first if the
/// store does not exist yet.
pub fn load_or_build<T, S>(tables: &T, store: &S) -> Result<RankedTable>
where
  T: TableSource,
  S: RankedStore,
{
  if store.exists() {
    info!("reading ranked store");
    return store.read().map_err(Error::backend);
  }
  info!("ranked store does not exist; building it");
  rebuild(tables, store)
}

/// Build the ranked table from the raw tables and overwrite the store.
///
/// Nothing is written if loading or building fails.
pub fn rebuild<T, S>(tables: &T, store: &S) -> Result<RankedTable>
where
  T: TableSource,
  S: RankedStore,
{
  let raw = tables.load().map_err(Error::backend)?;
  info!(
    foods = raw.foods.len(),
    compounds = raw.compounds.len(),
    contents = raw.contents.len(),
    "loaded raw tables"
  );

  let table = build(&raw.foods, &raw.compounds, &raw.contents)?;
  store.write(&table).map_err(Error::backend)?;
  info!(rows = table.len(), "ranked store created");
  Ok(table)
}

/// Run one query end to end: load or build the ranked table, filter it to
/// `requested` compounds, keep the top `top_n` ranks and emit the report.
pub fn run_query<T, S, R>(
  tables: &T,
  store: &S,
  sink: &R,
  requested: &BTreeSet<String>,
  top_n: usize,
) -> Result<QueryOutcome<R::Output>>
where
  T: TableSource,
  S: RankedStore,
  R: ReportSink,
{
  let table = load_or_build(tables, store)?;

  info!(
    compounds = %requested.iter().cloned().collect::<Vec<_>>().join(", "),
    top_n,
    "searching ranked store"
  );
  let result = query(&table, requested, top_n)?;

  let output = sink.emit(&result).map_err(Error::backend)?;
  info!(rows = result.rows.len(), "report emitted");
  Ok(QueryOutcome { result, output })
}
