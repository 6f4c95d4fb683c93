//! Runtime settings: built-in defaults, then an optional TOML file, then
//! `FOOD_*` environment variables. CLI flags are applied on top by `main`.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use config::{Config, ConfigError, Environment, File};
use foodrank_core::DEFAULT_TOP_N;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "FOOD";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
  /// Directory holding `foods.csv`, `compounds.csv` and `contents.csv`.
  pub data_raw_path: PathBuf,
  /// Directory holding the ranked store.
  pub database_path: PathBuf,
  /// Directory receiving query reports.
  pub results_path:  PathBuf,
  pub top_n_foods:   usize,
}

impl Settings {
  /// Load settings from `file` (if it exists) and the process environment.
  pub fn load(file: &Path) -> Result<Self, ConfigError> {
    Self::load_with_env(file, None)
  }

  /// As [`Settings::load`], reading variables from `env` instead of the
  /// process environment when given.
  pub fn load_with_env(
    file: &Path,
    env: Option<HashMap<String, String>>,
  ) -> Result<Self, ConfigError> {
    let settings: Self = Config::builder()
      .set_default("data_raw_path", "data/data_raw")?
      .set_default("database_path", "data/database")?
      .set_default("results_path", "data/results")?
      .set_default("top_n_foods", DEFAULT_TOP_N as u64)?
      .add_source(File::from(file).required(false))
      .add_source(
        Environment::with_prefix(ENV_PREFIX)
          .try_parsing(true)
          .source(env),
      )
      .build()?
      .try_deserialize()?;

    Ok(Self {
      data_raw_path: expand_tilde(&settings.data_raw_path),
      database_path: expand_tilde(&settings.database_path),
      results_path:  expand_tilde(&settings.results_path),
      top_n_foods:   settings.top_n_foods,
    })
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
      pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    )
  }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().unwrap();
    let settings =
      Settings::load_with_env(&dir.path().join("absent.toml"), env(&[])).unwrap();
    assert_eq!(settings.data_raw_path, PathBuf::from("data/data_raw"));
    assert_eq!(settings.database_path, PathBuf::from("data/database"));
    assert_eq!(settings.results_path, PathBuf::from("data/results"));
    assert_eq!(settings.top_n_foods, DEFAULT_TOP_N);
  }

  #[test]
  fn environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("foodrank.toml");
    std::fs::write(&file, "database_path = \"/srv/db\"\ntop_n_foods = 3\n").unwrap();

    let settings = Settings::load_with_env(
      &file,
      env(&[("FOOD_TOP_N_FOODS", "10"), ("FOOD_RESULTS_PATH", "/tmp/out")]),
    )
    .unwrap();

    assert_eq!(settings.database_path, PathBuf::from("/srv/db"));
    assert_eq!(settings.results_path, PathBuf::from("/tmp/out"));
    assert_eq!(settings.top_n_foods, 10);
  }

  #[test]
  fn non_numeric_top_n_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::load_with_env(
      &dir.path().join("absent.toml"),
      env(&[("FOOD_TOP_N_FOODS", "many")]),
    );
    assert!(result.is_err());
  }
}
