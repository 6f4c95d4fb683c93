//! Raw input tables: foods, compounds and the content rows linking them.
//!
//! These are read-only inputs. Nothing in this crate mutates them; the fact
//! builder only indexes and joins them.

use std::fmt;

/// The `source_type` value marking a content row as a compound measurement.
pub const COMPOUND_SOURCE_TYPE: &str = "Compound";

// ─── Keys ────────────────────────────────────────────────────────────────────

/// A join key as read from an identifier column.
///
/// Surrounding whitespace is ignored and numbers are canonicalised, so
/// `"10"`, `" 10 "` and `"10.0"` all compare equal, as do `"1.5"` and
/// `"1.50"`. Any other text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
  pub fn new(raw: impl ToString) -> Self {
    let raw = raw.to_string();
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
      return Self(n.to_string());
    }
    if let Ok(n) = trimmed.parse::<f64>()
      && n.is_finite()
    {
      // `-0.0` displays as "-0".
      let n = if n == 0.0 { 0.0 } else { n };
      return Self(n.to_string());
    }
    Self(trimmed.to_owned())
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RecordKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for RecordKey {
  fn from(raw: &str) -> Self { Self::new(raw) }
}

impl From<String> for RecordKey {
  fn from(raw: String) -> Self { Self::new(raw) }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
  pub id:   RecordKey,
  pub name: String,
}

impl Food {
  pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
    Self { id: RecordKey::new(id), name: name.into() }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
  pub id:   RecordKey,
  pub name: String,
}

impl Compound {
  pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
    Self { id: RecordKey::new(id), name: name.into() }
  }
}

/// One row of the content table: a measured amount of some source entity in
/// a food.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLink {
  pub source_id:    RecordKey,
  /// Only rows equal to [`COMPOUND_SOURCE_TYPE`] take part in the join.
  pub source_type:  String,
  pub food_id:      RecordKey,
  /// `None` when the source cell was empty.
  pub orig_content: Option<f64>,
}

impl ContentLink {
  /// A compound-typed content row.
  pub fn compound(
    source_id: impl ToString,
    food_id: impl ToString,
    orig_content: f64,
  ) -> Self {
    Self {
      source_id:    RecordKey::new(source_id),
      source_type:  COMPOUND_SOURCE_TYPE.to_owned(),
      food_id:      RecordKey::new(food_id),
      orig_content: Some(orig_content),
    }
  }

  pub fn is_compound(&self) -> bool { self.source_type == COMPOUND_SOURCE_TYPE }
}

/// The three raw tables as loaded by a [`TableSource`](crate::store::TableSource).
#[derive(Debug, Clone, Default)]
pub struct RawTables {
  pub foods:     Vec<Food>,
  pub compounds: Vec<Compound>,
  pub contents:  Vec<ContentLink>,
}
