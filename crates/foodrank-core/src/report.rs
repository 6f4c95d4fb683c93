//! Naming of query report files.

use std::collections::BTreeSet;

const REPORT_PREFIX: &str = "compound_food_source_report";

/// Deterministic report file name for a query:
/// `compound_food_source_report_<names joined by '-'>_top_<n>.csv`.
///
/// Names are taken in sorted order. Characters that cannot appear in a file
/// name component are replaced with `_`.
pub fn report_file_name(requested: &BTreeSet<String>, top_n: usize) -> String {
  let names = requested
    .iter()
    .map(|n| sanitize(n))
    .collect::<Vec<_>>()
    .join("-");
  format!("{REPORT_PREFIX}_{names}_top_{top_n}.csv")
}

fn sanitize(name: &str) -> String {
  name
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
      c if c.is_control() => '_',
      c => c,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn name_is_sorted_and_embeds_top_n() {
    assert_eq!(
      report_file_name(&set(&["Sodium", "Iron"]), 5),
      "compound_food_source_report_Iron-Sodium_top_5.csv"
    );
  }

  #[test]
  fn path_separators_are_replaced() {
    assert_eq!(
      report_file_name(&set(&["A/B"]), 1),
      "compound_food_source_report_A_B_top_1.csv"
    );
  }
}
