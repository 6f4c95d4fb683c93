//! Row shapes as they appear in the CSV files, and their conversion to and
//! from `foodrank-core` domain types.
//!
//! Fields are matched by header name, so column order is free and extra
//! columns are ignored.

use foodrank_core::{
  FactRow,
  table::{Compound, ContentLink, Food},
};
use serde::Deserialize;

// ─── Raw tables ──────────────────────────────────────────────────────────────

pub const FOOD_COLUMNS: &[&str] = &["id", "name"];
pub const COMPOUND_COLUMNS: &[&str] = &["id", "name"];
pub const CONTENT_COLUMNS: &[&str] =
  &["source_id", "source_type", "food_id", "orig_content"];

#[derive(Debug, Deserialize)]
pub struct RawFood {
  id:   String,
  name: String,
}

impl RawFood {
  pub fn into_food(self) -> Food { Food::new(self.id, self.name) }
}

#[derive(Debug, Deserialize)]
pub struct RawCompound {
  id:   String,
  name: String,
}

impl RawCompound {
  pub fn into_compound(self) -> Compound { Compound::new(self.id, self.name) }
}

#[derive(Debug, Deserialize)]
pub struct RawContent {
  source_id:    String,
  source_type:  String,
  food_id:      String,
  /// Empty or non-numeric cells decode as `None`.
  #[serde(deserialize_with = "csv::invalid_option")]
  orig_content: Option<f64>,
}

impl RawContent {
  pub fn into_content(self) -> ContentLink {
    ContentLink {
      source_id:    self.source_id.into(),
      source_type:  self.source_type,
      food_id:      self.food_id.into(),
      orig_content: self.orig_content,
    }
  }
}

// ─── Ranked store ────────────────────────────────────────────────────────────

/// A persisted fact row. `food_rank` is read as a float so that integral
/// values written as `2.0` are still accepted.
#[derive(Debug, Deserialize)]
pub struct RawFactRow {
  compound_name: String,
  food_rank:     f64,
  food_name:     String,
  concentration: f64,
}

impl RawFactRow {
  pub fn into_fact_row(self) -> Result<FactRow, String> {
    let rank = self.food_rank;
    if !(rank.fract() == 0.0 && (1.0..=f64::from(u32::MAX)).contains(&rank)) {
      return Err(format!(
        "invalid food_rank {rank} for {:?} / {:?}",
        self.compound_name, self.food_name
      ));
    }
    Ok(FactRow::new(
      self.compound_name,
      rank as u32,
      self.food_name,
      self.concentration,
    ))
  }
}
