//! Fact rows and the ranked table built from them.
//!
//! A fact row is one food's concentration of one compound, together with the
//! food's dense rank among all foods measured for that compound.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ─── Fact row ────────────────────────────────────────────────────────────────

/// Canonical column order of a persisted fact row.
pub const FACT_COLUMNS: [&str; 4] =
  ["compound_name", "food_rank", "food_name", "concentration"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
  pub compound_name: String,
  /// 1 is the highest concentration within the compound group.
  pub food_rank:     u32,
  pub food_name:     String,
  pub concentration: f64,
}

impl FactRow {
  pub fn new(
    compound_name: impl Into<String>,
    food_rank: u32,
    food_name: impl Into<String>,
    concentration: f64,
  ) -> Self {
    Self {
      compound_name: compound_name.into(),
      food_rank,
      food_name: food_name.into(),
      concentration,
    }
  }
}

// ─── Ranked table ────────────────────────────────────────────────────────────

/// The full fact table, ordered by compound name then rank.
///
/// Built once by [`build`](crate::build::build) and persisted; never updated
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedTable {
  rows: Vec<FactRow>,
}

impl RankedTable {
  /// Wrap rows that are already in canonical order (e.g. read back from a
  /// store).
  pub fn from_rows(rows: Vec<FactRow>) -> Self { Self { rows } }

  pub fn rows(&self) -> &[FactRow] { &self.rows }

  pub fn into_rows(self) -> Vec<FactRow> { self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Distinct compound names, sorted.
  pub fn compound_names(&self) -> BTreeSet<&str> {
    self.rows.iter().map(|r| r.compound_name.as_str()).collect()
  }
}

impl FromIterator<FactRow> for RankedTable {
  fn from_iter<I: IntoIterator<Item = FactRow>>(iter: I) -> Self {
    Self { rows: iter.into_iter().collect() }
  }
}
