use crate::config::Prompts;
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm};
use crate::error::{CoreError, CoreResult};
use crate::numfmt::{group_indian, place_name, to_words_indian};
use crate::random::{distinct_digits, RandomSource};
use crate::util::fill_template;

/// Digits are distinct so "the place value of 7" names exactly one position.
pub fn generate(prompts: &Prompts, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
  let len = params.digit_count as usize;
  let digits = distinct_digits(rng, len, true)?;
  let number = digits.iter().fold(0i64, |acc, d| acc * 10 + *d as i64);

  // Only non-zero digits make a meaningful question.
  let candidates: Vec<u32> = (0..len as u32)
    .filter(|pos| digits[len - 1 - *pos as usize] != 0)
    .collect();
  let position = *candidates
    .get(rng.index(candidates.len()))
    .ok_or_else(|| CoreError::invalid("place value needs a non-zero digit"))?;
  let digit = digits[len - 1 - position as usize];
  let value = digit as i64 * 10i64.pow(position);

  let mut forms = vec![SolutionForm::Number(value)];
  forms.extend(to_words_indian(value)?.into_iter().map(SolutionForm::Words));

  let prompt = fill_template(
    &prompts.place_value,
    &[("digit", &digit.to_string()), ("number", &group_indian(number)?)],
  );
  let hint = format!("The {digit} is in the {} place.", place_name(position));
  Problem::new(
    ProblemKind::PlaceValue,
    prompt,
    ProblemData::PlaceValue { number, digit, position },
    forms,
    group_indian(value)?,
    hint,
    params,
  )
}
