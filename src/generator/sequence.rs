use crate::config::Prompts;
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm};
use crate::error::CoreResult;
use crate::generator::draw_value;
use crate::numfmt::to_words_indian;
use crate::random::RandomSource;
use crate::util::fill_template;

const STEPS: [i64; 4] = [1, 10, 100, 1000];

/// Steps narrower than the number itself: a 3-digit number gets 1, 10 or 100.
fn steps_for(digit_count: u32) -> Vec<i64> {
  let allowed: Vec<i64> = STEPS
    .iter()
    .copied()
    .filter(|s| (s.to_string().len() as u32) < digit_count)
    .collect();
  if allowed.is_empty() { vec![1] } else { allowed }
}

pub fn generate(prompts: &Prompts, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
  let start = draw_value(params, rng)?;
  let steps = steps_for(params.digit_count);
  let step = steps[rng.index(steps.len())];
  let before = rng.coin() && start - step >= 0;
  let offset = if before { -step } else { step };
  let result = start + offset;

  let tpl = if before { &prompts.sequence_before } else { &prompts.sequence_after };
  let prompt = fill_template(tpl, &[("step", &step.to_string()), ("number", &start.to_string())]);
  let mut forms = vec![SolutionForm::Number(result)];
  forms.extend(to_words_indian(result)?.into_iter().map(SolutionForm::Words));
  let hint = match step {
    1 => "Count on or back by one.".to_string(),
    s => format!("Only the digit in the {s}s place changes, unless it carries over."),
  };

  Problem::new(
    ProblemKind::SequenceNeighbor,
    prompt,
    ProblemData::Sequence { start, offset },
    forms,
    result.to_string(),
    hint,
    params,
  )
}
