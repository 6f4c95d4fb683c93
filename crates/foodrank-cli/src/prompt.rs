//! Interactive compound prompt.

use std::{
  collections::BTreeSet,
  io::{BufRead, Write},
};

use anyhow::Result;
use foodrank_core::query::parse_compound_list;

const PROMPT: &str = "Enter compounds (comma separated): ";

/// Ask for a comma-separated compound list until a non-empty one is given.
///
/// Returns `None` at end of input.
pub fn read_compounds(
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> Result<Option<BTreeSet<String>>> {
  loop {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Ok(None);
    }

    match parse_compound_list(&line) {
      Ok(names) => return Ok(Some(names)),
      Err(e) => writeln!(output, "{e}")?,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  #[test]
  fn reprompts_until_non_empty() {
    let mut input = Cursor::new(" \n , \nsodium, omega-3\n");
    let mut output = Vec::new();

    let names = read_compounds(&mut input, &mut output).unwrap().unwrap();
    assert_eq!(
      names.into_iter().collect::<Vec<_>>(),
      vec!["Omega-3".to_string(), "Sodium".to_string()]
    );

    let shown = String::from_utf8(output).unwrap();
    assert_eq!(shown.matches(PROMPT).count(), 3);
    assert_eq!(shown.matches("at least one compound").count(), 2);
  }

  #[test]
  fn end_of_input_returns_none() {
    let mut input = Cursor::new("");
    let mut output = Vec::new();
    assert!(read_compounds(&mut input, &mut output).unwrap().is_none());
  }
}
