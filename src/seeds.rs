//! Built-in content and difficulty tables that make the app usable without
//! any external config.

use crate::difficulty::Tier;
use crate::domain::DifficultyFamily;

/// Default tier tables. Every family steps up at levels 3 and 5.
pub fn default_tiers(family: DifficultyFamily) -> Vec<Tier> {
  match family {
    DifficultyFamily::PlaceValue => vec![
      Tier::new(1, 3, 100, 999, 1),
      Tier::new(3, 5, 10_000, 99_999, 1),
      Tier::new(5, 7, 1_000_000, 9_999_999, 1),
    ],
    DifficultyFamily::Arrangement => vec![
      Tier::new(1, 3, 100, 999, 1),
      Tier::new(3, 4, 1_000, 9_999, 1),
      Tier::new(5, 5, 10_000, 99_999, 1),
    ],
    DifficultyFamily::DataTable => vec![
      Tier::new(1, 1, 1, 9, 4),
      Tier::new(3, 2, 10, 99, 5),
      Tier::new(5, 3, 100, 999, 6),
    ],
    DifficultyFamily::Words => vec![
      Tier::new(1, 3, 100, 999, 1),
      Tier::new(3, 6, 100_000, 999_999, 1),
      Tier::new(5, 8, 10_000_000, 99_999_999, 1),
    ],
    DifficultyFamily::Grouping => vec![
      Tier::new(1, 4, 1_000, 99_999, 1),
      Tier::new(3, 6, 100_000, 9_999_999, 1),
      Tier::new(5, 8, 10_000_000, 999_999_999, 1),
    ],
    DifficultyFamily::Sequence => vec![
      Tier::new(1, 2, 10, 99, 1),
      Tier::new(3, 3, 100, 999, 1),
      Tier::new(5, 4, 1_000, 9_999, 1),
    ],
    DifficultyFamily::Currency => vec![
      Tier::new(1, 2, 10, 99, 5),
      Tier::new(3, 3, 100, 999, 7),
      Tier::new(5, 4, 1_000, 9_999, 9),
    ],
  }
}

/// Indian currency denominations (coins and notes), ascending.
pub fn default_denominations() -> Vec<u32> {
  vec![1, 2, 5, 10, 20, 50, 100, 200, 500, 2000]
}

pub fn default_table_titles() -> Vec<String> {
  vec![
    "Fruits sold at the school stall".into(),
    "Books read by the class this month".into(),
    "Votes for the class monitor".into(),
  ]
}

pub fn default_table_categories() -> Vec<String> {
  [
    "apples", "bananas", "mangoes", "oranges", "grapes", "guavas", "papayas", "cherries",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_tiers_fit_their_digit_counts() {
    for family in [DifficultyFamily::PlaceValue, DifficultyFamily::Arrangement, DifficultyFamily::Words] {
      for t in default_tiers(family) {
        assert_eq!(t.value_min.to_string().len() as u32, t.digit_count);
        assert_eq!(t.value_max.to_string().len() as u32, t.digit_count);
      }
    }
  }

  #[test]
  fn denominations_start_at_one() {
    let d = default_denominations();
    assert_eq!(d[0], 1);
    assert!(d.windows(2).all(|w| w[0] < w[1]));
  }
}
