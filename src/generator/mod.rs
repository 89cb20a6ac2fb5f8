//! Problem generation: one pure function per problem family, dispatched from
//! the closed `ProblemKind` enum.
//!
//! Families:
//! - `place_value`: place value of one digit in a number
//! - `arrangement`: largest / smallest / closest-to-target digit arrangements
//! - `table`      : facts derived from a generated category → value table
//! - `words`      : number ↔ words, Indian comma grouping
//! - `sequence`   : the number k more / k less than n
//! - `currency`   : exact change from offered notes and coins

use tracing::{debug, instrument};

use crate::config::{Content, Prompts};
use crate::domain::{GenerationParams, Problem, ProblemKind};
use crate::error::CoreResult;
use crate::random::RandomSource;

pub mod arrangement;
pub mod currency;
pub mod place_value;
pub mod sequence;
pub mod table;
pub mod words;

/// Holds the prompt templates and content pools the family generators draw from.
#[derive(Clone, Debug, Default)]
pub struct ProblemGenerator {
  pub prompts: Prompts,
  pub content: Content,
}

impl ProblemGenerator {
  pub fn new(prompts: Prompts, content: Content) -> Self {
    Self { prompts, content }
  }

  #[instrument(level = "debug", skip(self, rng), fields(%kind, tier = params.tier))]
  pub fn generate(&self, kind: ProblemKind, params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<Problem> {
    let p = &self.prompts;
    let problem = match kind {
      ProblemKind::PlaceValue => place_value::generate(p, params, rng),
      ProblemKind::ArrangeLargest
      | ProblemKind::ArrangeSmallest
      | ProblemKind::ArrangeClosest => arrangement::generate(kind, p, params, rng),
      ProblemKind::TableMax
      | ProblemKind::TableMin
      | ProblemKind::TableSum
      | ProblemKind::TableAverage
      | ProblemKind::TableDifference => table::generate(kind, p, &self.content, params, rng),
      ProblemKind::NumberToWords => words::number_to_words(p, params, rng),
      ProblemKind::WordsToNumber => words::words_to_number(p, params, rng),
      ProblemKind::CommaGrouping => words::comma_grouping(p, params, rng),
      ProblemKind::SequenceNeighbor => sequence::generate(p, params, rng),
      ProblemKind::CurrencyComposition => currency::generate(p, &self.content, params, rng),
    }?;
    debug!(target: "problem", id = %problem.id, %kind, forms = problem.solution_forms.len(), "problem generated");
    Ok(problem)
  }
}

/// Uniform draw from the params' value range.
pub(crate) fn draw_value(params: &GenerationParams, rng: &mut dyn RandomSource) -> CoreResult<i64> {
  let r = params.value_range;
  if r.min > r.max || r.min < 0 {
    return Err(crate::error::CoreError::invalid(format!("bad value range {}..={}", r.min, r.max)));
  }
  Ok(rng.int_in(r.min, r.max))
}
