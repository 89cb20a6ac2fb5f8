//! Digit arrangement puzzles: largest, smallest (no leading zero) and
//! closest-to-target numbers built from a digit set.

use itertools::Itertools;

use crate::config::Prompts;
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm};
use crate::error::{CoreError, CoreResult};
use crate::random::{distinct_digits, RandomSource};
use crate::util::{fill_template, list_digits};

/// Exhaustive search bound for closest-to-target (6! = 720 permutations).
pub const MAX_SEARCH_DIGITS: usize = 6;

pub fn to_value(digits: &[u8]) -> i64 {
  digits.iter().fold(0i64, |acc, d| acc * 10 + *d as i64)
}

pub fn largest(digits: &[u8]) -> Vec<u8> {
  let mut out = digits.to_vec();
  out.sort_unstable_by(|a, b| b.cmp(a));
  out
}

/// Ascending order; a leading zero is swapped with the smallest non-zero digit.
pub fn smallest(digits: &[u8]) -> Vec<u8> {
  let mut out = digits.to_vec();
  out.sort_unstable();
  if out.first() == Some(&0) {
    if let Some(pos) = out.iter().position(|d| *d != 0) {
      out.swap(0, pos);
    }
  }
  out
}

/// Permutation value minimizing |value - target|; ties go to the smaller value.
pub fn closest(digits: &[u8], target: i64) -> CoreResult<i64> {
  Ok(closest_all(digits, target)?.first().copied().unwrap_or(0))
}

/// Every permutation value at the minimum distance from `target`, ascending.
/// Leading-zero permutations are skipped unless every digit is zero.
pub fn closest_all(digits: &[u8], target: i64) -> CoreResult<Vec<i64>> {
  if digits.is_empty() {
    return Err(CoreError::invalid("closest arrangement needs at least one digit"));
  }
  if digits.len() > MAX_SEARCH_DIGITS {
    return Err(CoreError::invalid(format!(
      "closest arrangement searches at most {MAX_SEARCH_DIGITS} digits, got {}",
      digits.len()
    )));
  }
  let candidates: Vec<i64> = digits
    .iter()
    .copied()
    .permutations(digits.len())
    .filter(|p| p.len() == 1 || p[0] != 0)
    .map(|p| to_value(&p))
    .sorted_unstable()
    .dedup()
    .collect();
  let Some(best) = candidates.iter().map(|v| (v - target).abs()).min() else {
    return Ok(vec![0]);
  };
  Ok(candidates.into_iter().filter(|v| (v - target).abs() == best).collect())
}

pub fn generate(
  kind: ProblemKind,
  prompts: &Prompts,
  params: &GenerationParams,
  rng: &mut dyn RandomSource,
) -> CoreResult<Problem> {
  let len = params.digit_count as usize;
  if kind == ProblemKind::ArrangeClosest && len > MAX_SEARCH_DIGITS {
    return Err(CoreError::invalid(format!("{kind}: digit_count {len} exceeds {MAX_SEARCH_DIGITS}")));
  }
  let digits = distinct_digits(rng, len, true)?;
  let shown = list_digits(&digits);
  let count = len.to_string();

  let (answers, prompt, data, hint) = match kind {
    ProblemKind::ArrangeLargest => (
      vec![to_value(&largest(&digits))],
      fill_template(&prompts.arrange_largest, &[("digits", &shown), ("count", &count)]),
      ProblemData::Digits { digits: digits.clone() },
      "Put the biggest digit in the highest place.".to_string(),
    ),
    ProblemKind::ArrangeSmallest => (
      vec![to_value(&smallest(&digits))],
      fill_template(&prompts.arrange_smallest, &[("digits", &shown), ("count", &count)]),
      ProblemData::Digits { digits: digits.clone() },
      "Start with the smallest digit that is not 0.".to_string(),
    ),
    ProblemKind::ArrangeClosest => {
      let low = 10i64.pow(len.saturating_sub(1) as u32);
      let high = 10i64.pow(len as u32) - 1;
      let target = rng.int_in(low, high);
      (
        closest_all(&digits, target)?,
        fill_template(&prompts.arrange_closest, &[("digits", &shown), ("target", &target.to_string())]),
        ProblemData::DigitsWithTarget { digits: digits.clone(), target },
        "Match the highest place of the target first, then the next one.".to_string(),
      )
    }
    other => return Err(CoreError::UnsupportedKind(format!("{other} is not an arrangement puzzle"))),
  };

  // Ascending, so the first form is the canonical tie-break winner.
  let canonical = answers.first().map(|v| v.to_string()).unwrap_or_default();
  let forms = answers.into_iter().map(SolutionForm::Number).collect();
  Problem::new(kind, prompt, data, forms, canonical, hint, params)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ValueRange;
  use crate::random::tests::ScriptedSource;
  use crate::random::SeededSource;
  use crate::domain::Answer;
  use crate::validate::validate;

  fn leading_non_zero_values(digits: &[u8]) -> Vec<i64> {
    digits
      .iter()
      .copied()
      .permutations(digits.len())
      .filter(|p| p[0] != 0)
      .map(|p| to_value(&p))
      .collect()
  }

  #[test]
  fn simple_extremes() {
    assert_eq!(to_value(&smallest(&[5, 1, 9])), 159);
    assert_eq!(to_value(&largest(&[5, 1, 9])), 951);
    assert_eq!(to_value(&smallest(&[5, 0, 9])), 509);
    assert_eq!(to_value(&smallest(&[0, 0, 9, 5])), 5009);
  }

  #[test]
  fn extremes_match_brute_force_over_multisets() {
    let mut rng = SeededSource::from_seed(31);
    for _ in 0..300 {
      let len = rng.int_in(3, 6) as usize;
      let mut digits: Vec<u8> = (0..len).map(|_| rng.int_in(0, 9) as u8).collect();
      if digits.iter().all(|d| *d == 0) {
        digits[0] = 1;
      }
      let all = leading_non_zero_values(&digits);
      assert_eq!(to_value(&largest(&digits)), *all.iter().max().unwrap(), "{digits:?}");
      assert_eq!(to_value(&smallest(&digits)), *all.iter().min().unwrap(), "{digits:?}");
    }
  }

  #[test]
  fn closest_breaks_ties_towards_the_smaller_value() {
    // 135 and 153 are both 9 away from 144.
    assert_eq!(closest(&[1, 3, 5], 144).unwrap(), 135);
    assert_eq!(closest(&[1, 3, 5], 500).unwrap(), 513);
    assert_eq!(closest(&[0, 2, 1], 50).unwrap(), 102);
    assert!(closest(&[1, 2, 3, 4, 5, 6, 7], 1).is_err());
  }

  #[test]
  fn closest_matches_brute_force() {
    let mut rng = SeededSource::from_seed(8);
    for _ in 0..100 {
      let digits = distinct_digits(&mut rng, 4, true).unwrap();
      let target = rng.int_in(1000, 9999);
      let best = leading_non_zero_values(&digits)
        .into_iter()
        .min_by_key(|v| ((v - target).abs(), *v))
        .unwrap();
      assert_eq!(closest(&digits, target).unwrap(), best);
    }
  }

  #[test]
  fn generates_smallest_puzzle() {
    let params = GenerationParams { digit_count: 3, value_range: ValueRange::new(100, 999), option_count: 1, tier: 1 };
    let mut rng = ScriptedSource::new(vec![5, 0, 9]);
    let p = generate(ProblemKind::ArrangeSmallest, &Prompts::default(), &params, &mut rng).unwrap();
    assert_eq!(p.data, ProblemData::Digits { digits: vec![5, 0, 9] });
    assert_eq!(p.solution_forms, vec![SolutionForm::Number(509)]);
    assert_eq!(p.reward_points, 2);
    assert!(p.prompt.contains("5, 0, 9"));
  }

  #[test]
  fn closest_accepts_every_equally_near_arrangement() {
    assert_eq!(closest_all(&[1, 3, 5], 144).unwrap(), vec![135, 153]);
    assert_eq!(closest_all(&[1, 3, 5], 500).unwrap(), vec![513]);

    let params = GenerationParams { digit_count: 3, value_range: ValueRange::new(100, 999), option_count: 1, tier: 0 };
    let mut rng = ScriptedSource::new(vec![1, 3, 5, 144]);
    let p = generate(ProblemKind::ArrangeClosest, &Prompts::default(), &params, &mut rng).unwrap();
    assert_eq!(p.data, ProblemData::DigitsWithTarget { digits: vec![1, 3, 5], target: 144 });
    assert_eq!(p.solution_forms, vec![SolutionForm::Number(135), SolutionForm::Number(153)]);
    assert_eq!(p.canonical_answer, "135");
    assert!(validate(&p, &Answer::Text("135".into())).correct);
    assert!(validate(&p, &Answer::Text("153".into())).correct);
    assert!(!validate(&p, &Answer::Text("315".into())).correct);
  }

  #[test]
  fn closest_refuses_oversized_sets_before_sampling() {
    let params = GenerationParams { digit_count: 7, value_range: ValueRange::new(0, 9), option_count: 1, tier: 0 };
    let mut rng = SeededSource::from_seed(2);
    let err = generate(ProblemKind::ArrangeClosest, &Prompts::default(), &params, &mut rng).unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
    let err = generate(ProblemKind::TableSum, &Prompts::default(), &params, &mut rng).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedKind(_)));
  }
}
