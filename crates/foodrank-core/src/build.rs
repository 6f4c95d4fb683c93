//! Fact builder: raw tables → ranked fact table.
//!
//! Content rows are filtered to compound measurements, inner-joined to the
//! compound table on `source_id` and then to the food table on `food_id`.
//! Rows that fail either join are dropped silently; not every content row
//! resolves to a known compound or food.
//!
//! The joined rows are grouped by compound name (ascending), stably sorted by
//! concentration (descending) inside each group and given a dense rank.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{
  Error, Result,
  fact::{FactRow, RankedTable},
  table::{COMPOUND_SOURCE_TYPE, Compound, ContentLink, Food, RecordKey},
};

/// A joined content row before ranking.
struct Joined<'a> {
  compound_name: &'a str,
  food_name:     &'a str,
  concentration: f64,
}

/// Build the ranked fact table from the three raw tables.
///
/// Fails with [`Error::EmptyRelevantSet`] when no content row is tagged as a
/// compound. Output is deterministic for identical inputs: ties keep the
/// order in which content rows appear.
pub fn build(
  foods: &[Food],
  compounds: &[Compound],
  contents: &[ContentLink],
) -> Result<RankedTable> {
  let relevant: Vec<&ContentLink> =
    contents.iter().filter(|c| c.is_compound()).collect();
  if relevant.is_empty() {
    return Err(Error::EmptyRelevantSet(COMPOUND_SOURCE_TYPE));
  }
  debug!(
    total = contents.len(),
    relevant = relevant.len(),
    "filtered content rows"
  );

  let measured: Vec<(&ContentLink, f64)> = relevant
    .iter()
    .filter_map(|c| {
      c.orig_content
        .filter(|v| !v.is_nan())
        .map(|v| (*c, v))
    })
    .collect();
  if measured.len() < relevant.len() {
    debug!(
      dropped = relevant.len() - measured.len(),
      "dropped content rows without a numeric concentration"
    );
  }

  let compounds_by_id = index_by(compounds, |c| &c.id);
  let foods_by_id = index_by(foods, |f| &f.id);

  // Join 1: content.source_id == compound.id
  let with_compound: Vec<(&ContentLink, f64, &Compound)> = measured
    .iter()
    .flat_map(|&(link, value)| {
      compounds_by_id
        .get(&link.source_id)
        .into_iter()
        .flatten()
        .map(move |compound| (link, value, *compound))
    })
    .collect();

  // Join 2: content.food_id == food.id
  let joined: Vec<Joined<'_>> = with_compound
    .iter()
    .flat_map(|&(link, value, compound)| {
      foods_by_id
        .get(&link.food_id)
        .into_iter()
        .flatten()
        .map(move |food| Joined {
          compound_name: &compound.name,
          food_name:     &food.name,
          concentration: value,
        })
    })
    .collect();
  debug!(
    compound_matches = with_compound.len(),
    joined = joined.len(),
    "joined content rows to compounds and foods"
  );

  Ok(rank(joined))
}

/// Group by compound name and assign dense ranks over descending
/// concentration.
fn rank(joined: Vec<Joined<'_>>) -> RankedTable {
  let mut groups: BTreeMap<&str, Vec<Joined<'_>>> = BTreeMap::new();
  for row in joined {
    groups.entry(row.compound_name).or_default().push(row);
  }

  let mut rows = Vec::new();
  for (_, mut group) in groups {
    // `sort_by` is stable: equal concentrations keep join order.
    group.sort_by(|a, b| b.concentration.total_cmp(&a.concentration));

    let mut rank = 0u32;
    let mut previous: Option<f64> = None;
    for row in group {
      if previous != Some(row.concentration) {
        rank += 1;
        previous = Some(row.concentration);
      }
      rows.push(FactRow::new(
        row.compound_name,
        rank,
        row.food_name,
        row.concentration,
      ));
    }
  }

  RankedTable::from_rows(rows)
}

/// Map each key to every row carrying it, in table order.
fn index_by<'a, T>(
  rows: &'a [T],
  key: impl Fn(&'a T) -> &'a RecordKey,
) -> HashMap<&'a RecordKey, Vec<&'a T>> {
  let mut index: HashMap<&RecordKey, Vec<&T>> = HashMap::new();
  for row in rows {
    index.entry(key(row)).or_default().push(row);
  }
  index
}
