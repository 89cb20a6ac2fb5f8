//! Exact-change puzzles. Any multiset of offered denominations summing to the
//! target is correct; the canonical answer uses the fewest notes and coins.

use crate::config::{Content, Prompts};
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm};
use crate::error::{CoreError, CoreResult};
use crate::generator::draw_value;
use crate::random::RandomSource;
use crate::util::fill_template;

/// Largest target the change-making table is built for.
pub const MAX_TARGET: i64 = 1_000_000;
const MAX_DRAWS: usize = 32;

/// Fewest-pieces composition of `target` (largest first), or `None` if unreachable.
pub fn min_composition(target: i64, denominations: &[u32]) -> Option<Vec<u32>> {
  if target < 0 || target > MAX_TARGET {
    return None;
  }
  let t = target as usize;
  // best[v] = (pieces, last denomination used)
  let mut best: Vec<Option<(u32, u32)>> = vec![None; t + 1];
  best[0] = Some((0, 0));
  for v in 1..=t {
    for &d in denominations {
      let d_us = d as usize;
      if d == 0 || d_us > v {
        continue;
      }
      if let Some((pieces, _)) = best[v - d_us] {
        if best[v].map_or(true, |(p, _)| pieces + 1 < p) {
          best[v] = Some((pieces + 1, d));
        }
      }
    }
  }
  let mut out = Vec::new();
  let mut v = t;
  while v > 0 {
    let (_, d) = best[v]?;
    out.push(d);
    v -= d as usize;
  }
  out.sort_unstable_by(|a, b| b.cmp(a));
  Some(out)
}

pub fn render_composition(pieces: &[u32]) -> String {
  pieces.iter().map(|d| format!("₹{d}")).collect::<Vec<_>>().join(" + ")
}

/// The `option_count` smallest configured denominations, ascending.
fn offered(content: &Content, option_count: u32) -> CoreResult<Vec<u32>> {
  let mut all = content.denominations.clone();
  all.retain(|d| *d > 0);
  all.sort_unstable();
  all.dedup();
  if all.is_empty() {
    return Err(CoreError::invalid("no currency denominations configured"));
  }
  all.truncate(option_count.max(1) as usize);
  Ok(all)
}

pub fn generate(
  prompts: &Prompts,
  content: &Content,
  params: &GenerationParams,
  rng: &mut dyn RandomSource,
) -> CoreResult<Problem> {
  if params.value_range.max > MAX_TARGET {
    return Err(CoreError::invalid(format!("currency targets are capped at {MAX_TARGET}")));
  }
  let denominations = offered(content, params.option_count)?;
  let mut found = None;
  for _ in 0..MAX_DRAWS {
    let target = draw_value(params, rng)?;
    if target == 0 {
      continue;
    }
    if let Some(pieces) = min_composition(target, &denominations) {
      found = Some((target, pieces));
      break;
    }
  }
  let (target, canonical) = found.ok_or_else(|| {
    CoreError::invalid(format!("no reachable target in range with denominations {denominations:?}"))
  })?;

  let listed = denominations.iter().map(|d| format!("₹{d}")).collect::<Vec<_>>().join(", ");
  let prompt = fill_template(
    &prompts.currency_composition,
    &[("target", &target.to_string()), ("denominations", &listed)],
  );
  let canonical_answer = render_composition(&canonical);
  Problem::new(
    ProblemKind::CurrencyComposition,
    prompt,
    ProblemData::Currency { target, denominations },
    vec![SolutionForm::Composition { target, canonical }],
    canonical_answer,
    "Start with the biggest note that fits, then make up the rest.".into(),
    params,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Answer, ValueRange};
  use crate::random::tests::ScriptedSource;
  use crate::validate::validate;

  fn params(min: i64, max: i64, options: u32) -> GenerationParams {
    GenerationParams { digit_count: 3, value_range: ValueRange::new(min, max), option_count: options, tier: 0 }
  }

  #[test]
  fn fewest_pieces_beats_greedy() {
    assert_eq!(min_composition(75, &[1, 2, 5, 10, 20, 50]), Some(vec![50, 20, 5]));
    // greedy would take 4 + 1 + 1
    assert_eq!(min_composition(6, &[1, 3, 4]), Some(vec![3, 3]));
    assert_eq!(min_composition(7, &[2, 4]), None);
    assert_eq!(min_composition(0, &[5]), Some(vec![]));
  }

  #[test]
  fn offers_the_smallest_denominations() {
    let content = Content::default();
    assert_eq!(offered(&content, 5).unwrap(), vec![1, 2, 5, 10, 20]);
    assert_eq!(offered(&content, 50).unwrap().len(), 10);
    let empty = Content { denominations: vec![], ..Content::default() };
    assert!(offered(&empty, 3).is_err());
  }

  #[test]
  fn any_exact_change_is_accepted() {
    let mut rng = ScriptedSource::new(vec![87]);
    let p = generate(&Prompts::default(), &Content::default(), &params(10, 99, 6), &mut rng).unwrap();
    assert_eq!(p.canonical_answer, "₹50 + ₹20 + ₹10 + ₹5 + ₹2");
    assert!(p.prompt.contains("₹87"));
    assert!(validate(&p, &Answer::Denominations(vec![20, 20, 20, 20, 5, 2])).correct);
    assert!(validate(&p, &Answer::Text(p.canonical_answer.clone())).correct);
    assert!(!validate(&p, &Answer::Denominations(vec![100])).correct);
  }

  #[test]
  fn unreachable_targets_are_redrawn_then_rejected() {
    let content = Content { denominations: vec![2, 4], ..Content::default() };
    let mut rng = ScriptedSource::new(vec![7, 8]);
    let p = generate(&Prompts::default(), &content, &params(1, 9, 2), &mut rng).unwrap();
    assert_eq!(p.data, ProblemData::Currency { target: 8, denominations: vec![2, 4] });

    let mut rng = ScriptedSource::new(vec![7]);
    let err = generate(&Prompts::default(), &content, &params(1, 9, 2), &mut rng).unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
  }
}
