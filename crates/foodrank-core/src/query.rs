//! Query engine: ranked table + requested compounds → top-N foods.

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt,
};

use serde::Serialize;
use tracing::warn;

use crate::{
  Error, Result,
  fact::{FactRow, RankedTable},
};

// ─── Input normalisation ─────────────────────────────────────────────────────

/// Trim a compound name and title-case each word, collapsing inner
/// whitespace: `"  omega-3 FATTY acids "` → `"Omega-3 Fatty Acids"`.
pub fn normalize_compound_name(raw: &str) -> String {
  raw
    .split_whitespace()
    .map(title_case_word)
    .collect::<Vec<_>>()
    .join(" ")
}

fn title_case_word(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first
      .to_uppercase()
      .chain(chars.flat_map(char::to_lowercase))
      .collect(),
    None => String::new(),
  }
}

/// Parse a free-text, comma-separated compound list into a set of normalised
/// names. Blank entries are skipped.
pub fn parse_compound_list(raw: &str) -> Result<BTreeSet<String>> {
  let names: BTreeSet<String> = raw
    .split(',')
    .map(normalize_compound_name)
    .filter(|n| !n.is_empty())
    .collect();
  if names.is_empty() {
    return Err(Error::EmptyCompoundList);
  }
  Ok(names)
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Some requested compounds are absent from the ranked table. Not fatal: the
/// query continues with the compounds that were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownCompoundWarning {
  pub missing:   Vec<String>,
  pub available: Vec<String>,
}

impl fmt::Display for UnknownCompoundWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "compounds not found: {}; available compounds: {}",
      self.missing.join(","),
      self.available.join(",")
    )
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
  /// Normalised names as requested by the caller.
  pub requested: BTreeSet<String>,
  /// Stored labels the requested names resolved to.
  pub matched:   BTreeSet<String>,
  pub top_n:     usize,
  /// Rows in ranked-table order (compound, then rank ascending).
  pub rows:      Vec<FactRow>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning:   Option<UnknownCompoundWarning>,
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Select the top `top_n` ranked foods for each requested compound.
///
/// Requested names match stored compound names case-insensitively after
/// normalisation. Unknown names produce an [`UnknownCompoundWarning`]; if no
/// name is known the query fails with [`Error::NoMatchingCompounds`].
pub fn query(
  table: &RankedTable,
  requested: &BTreeSet<String>,
  top_n: usize,
) -> Result<QueryResult> {
  if top_n == 0 {
    return Err(Error::InvalidTopN(top_n));
  }

  let requested: BTreeSet<String> = requested
    .iter()
    .map(|r| normalize_compound_name(r))
    .filter(|r| !r.is_empty())
    .collect();
  if requested.is_empty() {
    return Err(Error::EmptyCompoundList);
  }

  let available = table.compound_names();
  let mut by_folded: BTreeMap<String, Vec<&str>> = BTreeMap::new();
  for name in &available {
    by_folded.entry(name.to_lowercase()).or_default().push(*name);
  }

  let mut matched = BTreeSet::new();
  let mut missing = Vec::new();
  for name in &requested {
    match by_folded.get(&name.to_lowercase()) {
      Some(labels) => matched.extend(labels.iter().map(|l| l.to_string())),
      None => missing.push(name.clone()),
    }
  }

  let available: Vec<String> = available.into_iter().map(str::to_owned).collect();

  if matched.is_empty() {
    return Err(Error::NoMatchingCompounds {
      requested: requested.into_iter().collect(),
      available,
    });
  }

  let warning = (!missing.is_empty()).then(|| {
    let warning = UnknownCompoundWarning { missing, available };
    warn!("{warning}");
    warning
  });

  let rows = table
    .rows()
    .iter()
    .filter(|r| matched.contains(&r.compound_name))
    .filter(|r| (r.food_rank as usize) <= top_n)
    .cloned()
    .collect();

  Ok(QueryResult { requested, matched, top_n, rows, warning })
}
