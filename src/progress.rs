//! User progress: reward points, level and unlocked modules.
//!
//! Each `apply_reward` call checks the level threshold exactly once, so a large
//! reward raises the level by at most one. An overshoot is picked up by the next
//! call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Points needed per level: level `n` is left once points reach `n * 20`.
pub const POINTS_PER_LEVEL: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgressState {
  pub level: u32,
  pub points: u32,
  pub unlocked_modules: BTreeSet<String>,
}

impl Default for UserProgressState {
  fn default() -> Self {
    Self { level: 1, points: 0, unlocked_modules: BTreeSet::new() }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RewardOutcome {
  pub level: u32,
  pub points: u32,
  pub leveled_up: bool,
}

impl UserProgressState {
  pub fn apply_reward(&mut self, points: u32) -> RewardOutcome {
    self.points = self.points.saturating_add(points);
    let leveled_up = self.points >= self.level.saturating_mul(POINTS_PER_LEVEL);
    if leveled_up {
      self.level += 1;
      info!(target: "numsense", level = self.level, points = self.points, "level up");
    }
    RewardOutcome { level: self.level, points: self.points, leveled_up }
  }

  /// Returns true if the module was newly unlocked.
  pub fn unlock(&mut self, module: impl Into<String>) -> bool {
    self.unlocked_modules.insert(module.into())
  }

  pub fn is_unlocked(&self, module: &str) -> bool {
    self.unlocked_modules.contains(module)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn crossing_the_first_threshold_levels_up() {
    let mut p = UserProgressState::default();
    let out = p.apply_reward(25);
    assert_eq!(out, RewardOutcome { level: 2, points: 25, leveled_up: true });
  }

  #[test]
  fn exactly_at_threshold_levels_up() {
    let mut p = UserProgressState::default();
    assert!(!p.apply_reward(19).leveled_up);
    assert!(p.apply_reward(1).leveled_up);
    assert_eq!(p.level, 2);
  }

  #[test]
  fn overshoot_raises_one_level_per_call() {
    let mut p = UserProgressState::default();
    let out = p.apply_reward(75);
    assert_eq!((out.level, out.points, out.leveled_up), (2, 75, true));
    // 75 >= 40: caught up on the next call, still one level at a time
    let out = p.apply_reward(0);
    assert_eq!((out.level, out.leveled_up), (3, true));
    let out = p.apply_reward(0);
    assert_eq!((out.level, out.leveled_up), (4, true));
    let out = p.apply_reward(0);
    assert_eq!((out.level, out.leveled_up), (4, false));
  }

  #[test]
  fn split_rewards_can_end_at_a_different_level_than_one_lump() {
    let mut split = UserProgressState::default();
    for r in [15, 15, 15] {
      split.apply_reward(r);
    }
    let mut lump = UserProgressState::default();
    lump.apply_reward(45);
    assert_eq!(split.points, lump.points);
    assert_eq!(split.level, 3);
    assert_eq!(lump.level, 2);
  }

  #[test]
  fn level_never_decreases() {
    let mut p = UserProgressState::default();
    let mut last = p.level;
    for r in [0, 3, 1, 2, 30, 0, 0, 5, 100, 0] {
      let out = p.apply_reward(r);
      assert!(out.level >= last);
      last = out.level;
    }
  }

  #[test]
  fn unlocks_are_a_set() {
    let mut p = UserProgressState::default();
    assert!(p.unlock("bank"));
    assert!(!p.unlock("bank"));
    assert!(p.is_unlocked("bank"));
    assert!(!p.is_unlocked("cheques"));
  }
}
