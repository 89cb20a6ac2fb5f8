use crate::config::Prompts;
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm};
use crate::error::CoreResult;
use crate::generator::draw_value;
use crate::numfmt::{display_words, group_indian, to_words_indian};
use crate::random::RandomSource;
use crate::util::fill_template;

pub fn number_to_words(prompts: &Prompts, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
  let n = draw_value(params, rng)?;
  let forms = to_words_indian(n)?.into_iter().map(SolutionForm::Words).collect();
  Problem::new(
    ProblemKind::NumberToWords,
    fill_template(&prompts.number_to_words, &[("number", &group_indian(n)?)]),
    ProblemData::Number { value: n },
    forms,
    display_words(n)?,
    "Read the commas from the left: crore, lakh, thousand, then hundreds.".into(),
    params,
  )
}

pub fn words_to_number(prompts: &Prompts, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
  let n = draw_value(params, rng)?;
  let text = display_words(n)?;
  Problem::new(
    ProblemKind::WordsToNumber,
    fill_template(&prompts.words_to_number, &[("words", &text)]),
    ProblemData::Words { text },
    vec![SolutionForm::Number(n)],
    group_indian(n)?,
    "Write a 0 for every place that is not named.".into(),
    params,
  )
}

/// The answer must carry the commas; bare digits are not accepted.
pub fn comma_grouping(prompts: &Prompts, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
  let n = draw_value(params, rng)?;
  let grouped = group_indian(n)?;
  Problem::new(
    ProblemKind::CommaGrouping,
    fill_template(&prompts.comma_grouping, &[("number", &n.to_string())]),
    ProblemData::Number { value: n },
    vec![SolutionForm::Literal(grouped.clone())],
    grouped,
    "Count three digits from the right, then groups of two.".into(),
    params,
  )
}
