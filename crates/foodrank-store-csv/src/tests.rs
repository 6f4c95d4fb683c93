//! Integration tests for the CSV backend against temporary directories.

use std::{collections::BTreeSet, fs, path::Path};

use foodrank_core::{
  FactRow, RankedTable,
  pipeline::{load_or_build, rebuild, run_query},
  store::{RankedStore, ReportSink, TableSource},
};
use tempfile::TempDir;

use crate::{CsvRankedStore, CsvReportSink, CsvTables, Error, RANKED_STORE_FILE};

const FOODS: &str = "id,name,name_scientific\n1,Spinach,Spinacia oleracea\n2,Almond,Prunus dulcis\n";
const COMPOUNDS: &str = "id,name\n10,Iron\n";
const CONTENTS: &str = "\
id,source_id,source_type,food_id,orig_content,orig_unit
1,10,Compound,1,2.7,mg/100g
2,10,Compound,2,3.7,mg/100g
3,10,Nutrient,2,99.0,mg/100g
";

fn write(dir: &Path, name: &str, contents: &str) {
  fs::write(dir.join(name), contents).expect("write fixture");
}

fn raw_dir(contents: &str) -> TempDir {
  let dir = TempDir::new().expect("tempdir");
  write(dir.path(), "foods.csv", FOODS);
  write(dir.path(), "compounds.csv", COMPOUNDS);
  write(dir.path(), "contents.csv", contents);
  dir
}

fn set(names: &[&str]) -> BTreeSet<String> {
  names.iter().map(|s| s.to_string()).collect()
}

fn scenario_a_table() -> RankedTable {
  RankedTable::from_rows(vec![
    FactRow::new("Iron", 1, "Almond", 3.7),
    FactRow::new("Iron", 2, "Spinach", 2.7),
  ])
}

fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .expect("read_dir")
    .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}

// ─── Table loader ────────────────────────────────────────────────────────────

#[test]
fn loads_all_three_tables() {
  let raw = raw_dir(CONTENTS);
  let tables = CsvTables::new(raw.path()).load().unwrap();
  assert_eq!(tables.foods.len(), 2);
  assert_eq!(tables.compounds.len(), 1);
  assert_eq!(tables.contents.len(), 3);
  assert_eq!(tables.foods[1].name, "Almond");
  assert_eq!(tables.contents[2].source_type, "Nutrient");
}

#[test]
fn missing_table_file_is_reported_by_path() {
  let raw = raw_dir(CONTENTS);
  fs::remove_file(raw.path().join("compounds.csv")).unwrap();

  let err = CsvTables::new(raw.path()).load().unwrap_err();
  match err {
    Error::MissingInput { path } => assert!(path.ends_with("compounds.csv")),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn missing_column_is_reported() {
  let raw = raw_dir("source_id,source_type,food_id\n10,Compound,1\n");
  let err = CsvTables::new(raw.path()).load().unwrap_err();
  assert!(matches!(
    err,
    Error::MissingColumn { column: "orig_content", .. }
  ));
}

#[test]
fn empty_concentration_cells_load_as_none() {
  let raw = raw_dir(
    "source_id,source_type,food_id,orig_content\n10,Compound,1,\n10,Compound,2,n/a\n",
  );
  let tables = CsvTables::new(raw.path()).load().unwrap();
  assert!(tables.contents.iter().all(|c| c.orig_content.is_none()));
}

// ─── Ranked store ────────────────────────────────────────────────────────────

#[test]
fn store_round_trip() {
  let dir = TempDir::new().unwrap();
  let store = CsvRankedStore::new(dir.path().join("database"));
  assert!(!store.exists());

  store.write(&scenario_a_table()).unwrap();
  assert!(store.exists());
  assert_eq!(store.read().unwrap(), scenario_a_table());
}

#[test]
fn store_round_trip_preserves_awkward_values() {
  let dir = TempDir::new().unwrap();
  let store = CsvRankedStore::new(dir.path());
  let table = RankedTable::from_rows(vec![
    FactRow::new("Vitamin B12, cyanocobalamin", 1, "Clams, \"raw\"", f64::MAX),
    FactRow::new("Vitamin B12, cyanocobalamin", 2, "Liver\nbeef", 0.1 + 0.2),
    FactRow::new("Vitamin B12, cyanocobalamin", 3, " padded ", f64::MIN_POSITIVE),
    FactRow::new("Zinc", u32::MAX, "Oyster", 1e-300),
  ]);

  store.write(&table).unwrap();
  assert_eq!(store.read().unwrap(), table);
}

#[test]
fn store_file_has_canonical_header() {
  let dir = TempDir::new().unwrap();
  let store = CsvRankedStore::new(dir.path());
  store.write(&scenario_a_table()).unwrap();

  let text = fs::read_to_string(dir.path().join(RANKED_STORE_FILE)).unwrap();
  let mut lines = text.lines();
  assert_eq!(
    lines.next(),
    Some("compound_name,food_rank,food_name,concentration")
  );
  assert_eq!(lines.next(), Some("Iron,1,Almond,3.7"));
}

#[test]
fn write_leaves_no_temporary_files() {
  let dir = TempDir::new().unwrap();
  let store = CsvRankedStore::new(dir.path());
  store.write(&scenario_a_table()).unwrap();
  store.write(&scenario_a_table()).unwrap();
  assert_eq!(file_names(dir.path()), vec![RANKED_STORE_FILE.to_string()]);
}

#[test]
fn reading_a_missing_store_is_corrupt() {
  let dir = TempDir::new().unwrap();
  let err = CsvRankedStore::new(dir.path()).read().unwrap_err();
  assert!(matches!(err, Error::CorruptStore { .. }));
}

#[test]
fn unreadable_store_path_is_corrupt() {
  let dir = TempDir::new().unwrap();
  // The store directory is a regular file, so opening the store fails with
  // something other than "not found".
  let not_a_dir = dir.path().join("database");
  fs::write(&not_a_dir, "").unwrap();

  let err = CsvRankedStore::new(&not_a_dir).read().unwrap_err();
  match err {
    Error::CorruptStore { path, .. } => assert!(path.ends_with(RANKED_STORE_FILE)),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn store_with_missing_column_is_corrupt() {
  let dir = TempDir::new().unwrap();
  write(dir.path(), RANKED_STORE_FILE, "compound_name,food_name,concentration\nIron,Almond,3.7\n");
  let err = CsvRankedStore::new(dir.path()).read().unwrap_err();
  match err {
    Error::CorruptStore { reason, .. } => assert!(reason.contains("food_rank")),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn store_with_bad_values_is_corrupt() {
  let dir = TempDir::new().unwrap();
  write(
    dir.path(),
    RANKED_STORE_FILE,
    "compound_name,food_rank,food_name,concentration\nIron,first,Almond,3.7\n",
  );
  assert!(matches!(
    CsvRankedStore::new(dir.path()).read(),
    Err(Error::CorruptStore { .. })
  ));

  write(
    dir.path(),
    RANKED_STORE_FILE,
    "compound_name,food_rank,food_name,concentration\nIron,1.5,Almond,3.7\n",
  );
  assert!(matches!(
    CsvRankedStore::new(dir.path()).read(),
    Err(Error::CorruptStore { .. })
  ));
}

#[test]
fn store_accepts_float_ranks() {
  let dir = TempDir::new().unwrap();
  write(
    dir.path(),
    RANKED_STORE_FILE,
    "compound_name,food_rank,food_name,concentration\nIron,1.0,Almond,3.7\nIron,2.0,Spinach,2.7\n",
  );
  assert_eq!(
    CsvRankedStore::new(dir.path()).read().unwrap(),
    scenario_a_table()
  );
}

// ─── Pipeline over CSV ───────────────────────────────────────────────────────

#[test]
fn builds_store_from_raw_tables() {
  let raw = raw_dir(CONTENTS);
  let db = TempDir::new().unwrap();
  let store = CsvRankedStore::new(db.path());

  let table = load_or_build(&CsvTables::new(raw.path()), &store).unwrap();
  assert_eq!(table, scenario_a_table());
  assert_eq!(store.read().unwrap(), scenario_a_table());
}

#[test]
fn rebuilding_is_byte_identical() {
  let raw = raw_dir(CONTENTS);
  let db = TempDir::new().unwrap();
  let tables = CsvTables::new(raw.path());
  let store = CsvRankedStore::new(db.path());

  rebuild(&tables, &store).unwrap();
  let first = fs::read(store.path()).unwrap();
  rebuild(&tables, &store).unwrap();
  let second = fs::read(store.path()).unwrap();
  assert_eq!(first, second);
}

#[test]
fn no_compound_rows_leaves_no_store_file() {
  let raw = raw_dir("source_id,source_type,food_id,orig_content\n10,Nutrient,1,2.7\n");
  let db = TempDir::new().unwrap();
  let store = CsvRankedStore::new(db.path());

  let err = load_or_build(&CsvTables::new(raw.path()), &store).unwrap_err();
  assert!(matches!(err, foodrank_core::Error::EmptyRelevantSet(_)));
  assert!(!store.exists());
  assert!(file_names(db.path()).is_empty());
}

#[test]
fn query_writes_named_report() {
  let raw = raw_dir(CONTENTS);
  let db = TempDir::new().unwrap();
  let results = TempDir::new().unwrap();
  let sink = CsvReportSink::new(results.path().join("results"));

  let outcome = run_query(
    &CsvTables::new(raw.path()),
    &CsvRankedStore::new(db.path()),
    &sink,
    &set(&["iron"]),
    1,
  )
  .unwrap();

  assert_eq!(
    outcome.output,
    results
      .path()
      .join("results")
      .join("compound_food_source_report_Iron_top_1.csv")
  );
  let text = fs::read_to_string(&outcome.output).unwrap();
  assert_eq!(
    text,
    "compound_name,food_rank,food_name,concentration\nIron,1,Almond,3.7\n"
  );
}

#[test]
fn unknown_compounds_write_no_report() {
  let raw = raw_dir(CONTENTS);
  let db = TempDir::new().unwrap();
  let results = TempDir::new().unwrap();

  let err = run_query(
    &CsvTables::new(raw.path()),
    &CsvRankedStore::new(db.path()),
    &CsvReportSink::new(results.path()),
    &set(&["Zinc"]),
    5,
  )
  .unwrap_err();

  assert!(matches!(err, foodrank_core::Error::NoMatchingCompounds { .. }));
  assert!(file_names(results.path()).is_empty());
}

#[test]
fn corrupt_store_is_not_rebuilt() {
  let raw = raw_dir(CONTENTS);
  let db = TempDir::new().unwrap();
  write(db.path(), RANKED_STORE_FILE, "garbage\n");
  let store = CsvRankedStore::new(db.path());

  let err = load_or_build(&CsvTables::new(raw.path()), &store).unwrap_err();
  let foodrank_core::Error::Backend(inner) = err else {
    panic!("expected backend error");
  };
  assert!(matches!(
    inner.downcast_ref::<Error>(),
    Some(Error::CorruptStore { .. })
  ));
  assert_eq!(fs::read_to_string(store.path()).unwrap(), "garbage\n");
}

#[test]
fn empty_report_still_has_header() {
  let results = TempDir::new().unwrap();
  let sink = CsvReportSink::new(results.path());
  let result = foodrank_core::QueryResult {
    requested: set(&["Iron"]),
    matched:   set(&["Iron"]),
    top_n:     3,
    rows:      vec![],
    warning:   None,
  };
  let path = sink.emit(&result).unwrap();
  assert_eq!(
    fs::read_to_string(path).unwrap(),
    "compound_name,food_rank,food_name,concentration\n"
  );
}
