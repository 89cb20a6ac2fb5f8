//! Data-table interpretation: a category → value table plus one derived fact.

use crate::config::{Content, Prompts};
use crate::domain::{GenerationParams, Problem, ProblemData, ProblemKind, SolutionForm, TableRow};
use crate::error::{CoreError, CoreResult};
use crate::random::{choose_many, unique_integers, RandomSource};
use crate::util::fill_template;

/// Mean rounded to the nearest integer, halves rounding up. Values are non-negative.
pub fn rounded_average(values: &[i64]) -> Option<i64> {
  if values.is_empty() {
    return None;
  }
  let n = values.len() as i64;
  let sum: i64 = values.iter().sum();
  Some((2 * sum + n).div_euclid(2 * n))
}

fn extreme(rows: &[TableRow], pick_max: bool) -> CoreResult<&TableRow> {
  let it = rows.iter();
  let row = if pick_max { it.max_by_key(|r| r.value) } else { it.min_by_key(|r| r.value) };
  row.ok_or_else(|| CoreError::invalid("table has no rows"))
}

pub fn generate(
  kind: ProblemKind,
  prompts: &Prompts,
  content: &Content,
  params: &GenerationParams,
  rng: &mut dyn RandomSource,
) -> CoreResult<Problem> {
  let count = params.option_count as usize;
  if kind == ProblemKind::TableDifference && count < 2 {
    return Err(CoreError::invalid("difference questions need at least two categories"));
  }
  let labels = choose_many(rng, &content.table_categories, count)?;
  // Distinct values keep "most" and "least" unambiguous.
  let values = unique_integers(rng, count, params.value_range)?;
  let rows: Vec<TableRow> = labels
    .into_iter()
    .zip(values.iter().copied())
    .map(|(label, value)| TableRow { label, value })
    .collect();
  let title = if content.table_titles.is_empty() {
    "Table".to_string()
  } else {
    content.table_titles[rng.index(content.table_titles.len())].clone()
  };

  let mut compare = None;
  let (prompt, forms, canonical, hint) = match kind {
    ProblemKind::TableMax => {
      let row = extreme(&rows, true)?;
      (
        fill_template(&prompts.table_max, &[("title", &title)]),
        vec![SolutionForm::Label(row.label.clone())],
        row.label.clone(),
        "Look for the biggest number in the table.".to_string(),
      )
    }
    ProblemKind::TableMin => {
      let row = extreme(&rows, false)?;
      (
        fill_template(&prompts.table_min, &[("title", &title)]),
        vec![SolutionForm::Label(row.label.clone())],
        row.label.clone(),
        "Look for the smallest number in the table.".to_string(),
      )
    }
    ProblemKind::TableSum => {
      let sum: i64 = values.iter().sum();
      (
        fill_template(&prompts.table_sum, &[("title", &title)]),
        vec![SolutionForm::Number(sum)],
        sum.to_string(),
        "Add up every row.".to_string(),
      )
    }
    ProblemKind::TableAverage => {
      let avg = rounded_average(&values).ok_or_else(|| CoreError::invalid("table has no rows"))?;
      (
        fill_template(&prompts.table_average, &[("title", &title)]),
        vec![SolutionForm::Number(avg)],
        avg.to_string(),
        format!("Add up every row, then divide by {count}."),
      )
    }
    ProblemKind::TableDifference => {
      let pair = choose_many(rng, &rows, 2)?;
      let (first, second) = if pair[0].value >= pair[1].value { (&pair[0], &pair[1]) } else { (&pair[1], &pair[0]) };
      let diff = first.value - second.value;
      compare = Some((first.label.clone(), second.label.clone()));
      (
        fill_template(
          &prompts.table_difference,
          &[("title", &title), ("first", &first.label), ("second", &second.label)],
        ),
        vec![SolutionForm::Number(diff)],
        diff.to_string(),
        format!("Subtract the {} count from the {} count.", second.label, first.label),
      )
    }
    other => return Err(CoreError::UnsupportedKind(format!("{other} is not a table question"))),
  };

  Problem::new(kind, prompt, ProblemData::Table { title, rows, compare }, forms, canonical, hint, params)
}
