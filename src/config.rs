//! Loading game configuration (difficulty tiers, content, prompts, unlocks) from TOML.
//!
//! See `GameConfig` for the expected schema. Every section is optional; missing
//! sections fall back to the built-in defaults in `seeds`.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::difficulty::{DifficultyTable, Tier};
use crate::domain::DifficultyFamily;
use crate::error::{CoreError, CoreResult};
use crate::seeds::{default_denominations, default_table_categories, default_table_titles};

#[derive(Clone, Debug, Deserialize)]
pub struct GameConfig {
  /// Delay before auto-advancing to the next problem after a correct answer.
  #[serde(default = "default_advance_delay_ms")]
  pub advance_delay_ms: u64,
  /// Fixed seed for a reproducible session; entropy when absent.
  #[serde(default)]
  pub seed: Option<u64>,
  /// Tier overrides keyed by difficulty family name.
  #[serde(default)]
  pub difficulty: BTreeMap<String, FamilyCfg>,
  #[serde(default)]
  pub content: Content,
  #[serde(default)]
  pub prompts: Prompts,
  /// Host-owned level → module unlock map.
  #[serde(default)]
  pub unlocks: Vec<Unlock>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      advance_delay_ms: default_advance_delay_ms(),
      seed: None,
      difficulty: BTreeMap::new(),
      content: Content::default(),
      prompts: Prompts::default(),
      unlocks: Vec::new(),
    }
  }
}

fn default_advance_delay_ms() -> u64 {
  1500
}

#[derive(Clone, Debug, Deserialize)]
pub struct FamilyCfg {
  pub tiers: Vec<Tier>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Unlock {
  pub level: u32,
  pub module: String,
}

/// Data the generators draw from.
#[derive(Clone, Debug, Deserialize)]
pub struct Content {
  #[serde(default = "default_table_titles")]
  pub table_titles: Vec<String>,
  #[serde(default = "default_table_categories")]
  pub table_categories: Vec<String>,
  #[serde(default = "default_denominations")]
  pub denominations: Vec<u32>,
}

impl Default for Content {
  fn default() -> Self {
    Self {
      table_titles: default_table_titles(),
      table_categories: default_table_categories(),
      denominations: default_denominations(),
    }
  }
}

/// Prompt templates. `{placeholder}`s are filled by the generators.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub place_value: String,
  pub arrange_largest: String,
  pub arrange_smallest: String,
  pub arrange_closest: String,
  pub table_max: String,
  pub table_min: String,
  pub table_sum: String,
  pub table_average: String,
  pub table_difference: String,
  pub number_to_words: String,
  pub words_to_number: String,
  pub comma_grouping: String,
  pub sequence_after: String,
  pub sequence_before: String,
  pub currency_composition: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      place_value: "What is the place value of {digit} in {number}?".into(),
      arrange_largest: "Use each of the digits {digits} once to make the largest {count}-digit number.".into(),
      arrange_smallest: "Use each of the digits {digits} once to make the smallest {count}-digit number. It cannot start with 0.".into(),
      arrange_closest: "Arrange the digits {digits} to make the number closest to {target}.".into(),
      table_max: "{title}: which one has the most?".into(),
      table_min: "{title}: which one has the least?".into(),
      table_sum: "{title}: how many are there altogether?".into(),
      table_average: "{title}: what is the average? Round to the nearest whole number.".into(),
      table_difference: "{title}: how many more {first} than {second}?".into(),
      number_to_words: "Write {number} in words.".into(),
      words_to_number: "Write this number in digits: {words}".into(),
      comma_grouping: "Place commas in {number} using the Indian system.".into(),
      sequence_after: "What number is {step} more than {number}?".into(),
      sequence_before: "What number is {step} less than {number}?".into(),
      currency_composition: "Make exactly ₹{target} using these notes and coins: {denominations}.".into(),
    }
  }
}

impl GameConfig {
  pub fn from_toml_str(s: &str) -> CoreResult<Self> {
    toml::from_str::<GameConfig>(s).map_err(|e| CoreError::Config(e.to_string()))
  }

  /// Resolved difficulty table; unknown family names are rejected.
  pub fn difficulty_table(&self) -> CoreResult<DifficultyTable> {
    let mut overrides: BTreeMap<DifficultyFamily, Vec<Tier>> = BTreeMap::new();
    for (name, family_cfg) in &self.difficulty {
      let family: DifficultyFamily = name.parse()?;
      overrides.insert(family, family_cfg.tiers.clone());
    }
    DifficultyTable::with_overrides(overrides)
  }

  /// Modules unlocked on reaching `level`.
  pub fn unlocks_at(&self, level: u32) -> Vec<String> {
    self.unlocks
      .iter()
      .filter(|u| u.level == level)
      .map(|u| u.module.clone())
      .collect()
  }

  pub(crate) fn check(&self) -> CoreResult<()> {
    if self.content.denominations.is_empty() {
      return Err(CoreError::Config("content.denominations is empty".into()));
    }
    if self.content.denominations.contains(&0) {
      return Err(CoreError::Config("content.denominations contains 0".into()));
    }
    if self.content.table_categories.len() < 2 {
      return Err(CoreError::Config("content.table_categories needs at least two entries".into()));
    }
    self.difficulty_table().map(|_| ())
  }
}

/// Load `GameConfig` from GAME_CONFIG_PATH (defaults when unset) and apply GAME_SEED.
/// A config file that cannot be read, parsed or validated is an error.
pub fn load_game_config_from_env() -> CoreResult<GameConfig> {
  let mut cfg = match std::env::var("GAME_CONFIG_PATH") {
    Ok(path) => {
      let raw = std::fs::read_to_string(&path).map_err(|e| {
        error!(target: "numsense", %path, error = %e, "Failed to read TOML config file");
        CoreError::Config(format!("{path}: {e}"))
      })?;
      let cfg = GameConfig::from_toml_str(&raw).map_err(|e| {
        error!(target: "numsense", %path, error = %e, "Failed to parse TOML config");
        e
      })?;
      info!(target: "numsense", %path, "Loaded game config (TOML)");
      cfg
    }
    Err(_) => {
      info!(target: "numsense", "GAME_CONFIG_PATH not set; using built-in defaults");
      GameConfig::default()
    }
  };

  if let Some(seed) = std::env::var("GAME_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
    cfg.seed = Some(seed);
  }
  cfg.check()?;
  Ok(cfg)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ProblemKind;

  const SAMPLE: &str = r#"
advance_delay_ms = 800
seed = 7

[difficulty.words]
tiers = [
  { min_level = 1, digit_count = 4, value_min = 1000, value_max = 9999, option_count = 1 },
  { min_level = 4, digit_count = 7, value_min = 1000000, value_max = 9999999, option_count = 1 },
]

[content]
denominations = [1, 5, 10]

[prompts]
number_to_words = "Spell {number}!"

[[unlocks]]
level = 2
module = "bank"

[[unlocks]]
level = 2
module = "cheques"
"#;

  #[test]
  fn parses_full_config() {
    let cfg = GameConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(cfg.advance_delay_ms, 800);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.content.denominations, vec![1, 5, 10]);
    assert_eq!(cfg.content.table_categories, default_table_categories());
    assert_eq!(cfg.prompts.number_to_words, "Spell {number}!");
    assert_eq!(cfg.prompts.comma_grouping, Prompts::default().comma_grouping);
    assert_eq!(cfg.unlocks_at(2), vec!["bank".to_string(), "cheques".to_string()]);
    assert!(cfg.unlocks_at(3).is_empty());
    cfg.check().unwrap();

    let table = cfg.difficulty_table().unwrap();
    assert_eq!(table.resolve(ProblemKind::NumberToWords, 4).digit_count, 7);
  }

  #[test]
  fn empty_config_is_all_defaults() {
    let cfg = GameConfig::from_toml_str("").unwrap();
    assert_eq!(cfg.advance_delay_ms, 1500);
    assert!(cfg.seed.is_none());
    cfg.check().unwrap();
  }

  #[test]
  fn rejects_unknown_family_and_bad_content() {
    let cfg = GameConfig::from_toml_str(
      "[difficulty.cheques]\ntiers = [{ min_level = 1, digit_count = 3, value_min = 1, value_max = 9, option_count = 1 }]\n",
    )
    .unwrap();
    assert!(matches!(cfg.difficulty_table(), Err(CoreError::UnsupportedKind(_))));

    let cfg = GameConfig::from_toml_str("[content]\ndenominations = []\n").unwrap();
    assert!(matches!(cfg.check(), Err(CoreError::Config(_))));

    assert!(matches!(GameConfig::from_toml_str("advance_delay_ms = \"soon\""), Err(CoreError::Config(_))));
  }
}
