//! Level → generation parameters, driven by per-family tier tables.
//!
//! A tier applies from its `min_level` upward until the next tier starts.
//! Levels past the last tier clamp to it; levels below the first tier
//! (only level 0, which callers should not produce) use the first tier.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{DifficultyFamily, GenerationParams, ProblemKind, ValueRange};
use crate::error::{CoreError, CoreResult};
use crate::seeds::default_tiers;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Tier {
  pub min_level: u32,
  pub digit_count: u32,
  pub value_min: i64,
  pub value_max: i64,
  pub option_count: u32,
}

impl Tier {
  pub const fn new(min_level: u32, digit_count: u32, value_min: i64, value_max: i64, option_count: u32) -> Self {
    Self { min_level, digit_count, value_min, value_max, option_count }
  }
}

#[derive(Clone, Debug)]
pub struct DifficultyTable {
  tiers: BTreeMap<DifficultyFamily, Vec<Tier>>,
}

impl Default for DifficultyTable {
  fn default() -> Self {
    let tiers = DifficultyFamily::ALL
      .iter()
      .map(|f| (*f, default_tiers(*f)))
      .collect();
    Self { tiers }
  }
}

impl DifficultyTable {
  /// Build from overrides; families without an override keep the built-in table.
  pub fn with_overrides(overrides: BTreeMap<DifficultyFamily, Vec<Tier>>) -> CoreResult<Self> {
    let mut table = Self::default();
    for (family, tiers) in overrides {
      check_tiers(family, &tiers)?;
      table.tiers.insert(family, tiers);
    }
    Ok(table)
  }

  pub fn tiers(&self, family: DifficultyFamily) -> &[Tier] {
    self.tiers.get(&family).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn resolve(&self, kind: ProblemKind, level: u32) -> GenerationParams {
    self.resolve_family(kind.family(), level)
  }

  pub fn resolve_family(&self, family: DifficultyFamily, level: u32) -> GenerationParams {
    let tiers = self.tiers(family);
    let idx = tiers
      .iter()
      .rposition(|t| t.min_level <= level)
      .unwrap_or(0);
    let tier = tiers.get(idx).copied().unwrap_or_else(|| fallback_tier(family));
    let params = GenerationParams {
      digit_count: tier.digit_count,
      value_range: ValueRange::new(tier.value_min, tier.value_max),
      option_count: tier.option_count,
      tier: idx.min(u8::MAX as usize) as u8,
    };
    debug!(target: "problem", family = family.as_str(), level, tier = idx, "difficulty resolved");
    params
  }
}

fn fallback_tier(family: DifficultyFamily) -> Tier {
  default_tiers(family)
    .first()
    .copied()
    .unwrap_or(Tier::new(1, 3, 100, 999, 4))
}

/// Tier tables must be non-empty, sorted by level and never get easier.
fn check_tiers(family: DifficultyFamily, tiers: &[Tier]) -> CoreResult<()> {
  let name = family.as_str();
  if tiers.is_empty() {
    return Err(CoreError::Config(format!("difficulty.{name}: tier table is empty")));
  }
  for (i, t) in tiers.iter().enumerate() {
    if t.value_min > t.value_max {
      return Err(CoreError::Config(format!(
        "difficulty.{name}[{i}]: value_min {} exceeds value_max {}",
        t.value_min, t.value_max
      )));
    }
    if t.value_min < 0 {
      return Err(CoreError::Config(format!("difficulty.{name}[{i}]: negative value_min")));
    }
    if t.option_count == 0 || t.digit_count == 0 {
      return Err(CoreError::Config(format!("difficulty.{name}[{i}]: counts must be positive")));
    }
  }
  for pair in tiers.windows(2) {
    if pair[1].min_level <= pair[0].min_level {
      return Err(CoreError::Config(format!("difficulty.{name}: tiers not sorted by min_level")));
    }
    if pair[1].digit_count < pair[0].digit_count {
      return Err(CoreError::Config(format!("difficulty.{name}: digit_count decreases across tiers")));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn steps_up_at_levels_three_and_five() {
    let table = DifficultyTable::default();
    let l1 = table.resolve(ProblemKind::ArrangeLargest, 1);
    let l2 = table.resolve(ProblemKind::ArrangeLargest, 2);
    let l3 = table.resolve(ProblemKind::ArrangeLargest, 3);
    let l5 = table.resolve(ProblemKind::ArrangeLargest, 5);
    assert_eq!(l1, l2);
    assert!(l3.digit_count > l1.digit_count);
    assert!(l5.digit_count > l3.digit_count);
    assert_eq!(l5.tier, 2);
  }

  #[test]
  fn clamps_beyond_last_tier_and_below_first() {
    let table = DifficultyTable::default();
    assert_eq!(
      table.resolve(ProblemKind::NumberToWords, 500),
      table.resolve(ProblemKind::NumberToWords, 5)
    );
    assert_eq!(
      table.resolve(ProblemKind::NumberToWords, 0),
      table.resolve(ProblemKind::NumberToWords, 1)
    );
  }

  #[test]
  fn digit_count_is_monotonic_in_level_for_every_kind() {
    let table = DifficultyTable::default();
    for kind in ProblemKind::ALL {
      let mut last = 0;
      for level in 1..=30 {
        let p = table.resolve(kind, level);
        assert!(p.digit_count >= last, "{kind} at level {level}");
        last = p.digit_count;
      }
    }
  }

  #[test]
  fn rejects_broken_overrides() {
    let mut bad = BTreeMap::new();
    bad.insert(
      DifficultyFamily::Words,
      vec![Tier::new(1, 4, 1000, 9999, 1), Tier::new(3, 3, 100, 999, 1)],
    );
    assert!(matches!(DifficultyTable::with_overrides(bad), Err(CoreError::Config(_))));

    let mut inverted = BTreeMap::new();
    inverted.insert(DifficultyFamily::Currency, vec![Tier::new(1, 2, 50, 10, 3)]);
    assert!(DifficultyTable::with_overrides(inverted).is_err());

    let mut empty = BTreeMap::new();
    empty.insert(DifficultyFamily::Sequence, vec![]);
    assert!(DifficultyTable::with_overrides(empty).is_err());
  }

  #[test]
  fn override_replaces_only_its_family() {
    let mut o = BTreeMap::new();
    o.insert(DifficultyFamily::Grouping, vec![Tier::new(1, 7, 1_000_000, 9_999_999, 1)]);
    let table = DifficultyTable::with_overrides(o).unwrap();
    assert_eq!(table.resolve(ProblemKind::CommaGrouping, 9).digit_count, 7);
    assert_eq!(
      table.resolve(ProblemKind::PlaceValue, 1),
      DifficultyTable::default().resolve(ProblemKind::PlaceValue, 1)
    );
  }
}
