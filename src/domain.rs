//! Domain models shared by the generator, the validator and the host:
//! problem kinds, generation parameters, problems and verdicts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Closed set of problem variants. Each one maps to a generator function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
  PlaceValue,
  ArrangeLargest,
  ArrangeSmallest,
  ArrangeClosest,
  TableMax,
  TableMin,
  TableSum,
  TableAverage,
  TableDifference,
  NumberToWords,
  WordsToNumber,
  CommaGrouping,
  SequenceNeighbor,
  CurrencyComposition,
}

impl ProblemKind {
  pub const ALL: [ProblemKind; 14] = [
    ProblemKind::PlaceValue,
    ProblemKind::ArrangeLargest,
    ProblemKind::ArrangeSmallest,
    ProblemKind::ArrangeClosest,
    ProblemKind::TableMax,
    ProblemKind::TableMin,
    ProblemKind::TableSum,
    ProblemKind::TableAverage,
    ProblemKind::TableDifference,
    ProblemKind::NumberToWords,
    ProblemKind::WordsToNumber,
    ProblemKind::CommaGrouping,
    ProblemKind::SequenceNeighbor,
    ProblemKind::CurrencyComposition,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ProblemKind::PlaceValue => "place_value",
      ProblemKind::ArrangeLargest => "arrange_largest",
      ProblemKind::ArrangeSmallest => "arrange_smallest",
      ProblemKind::ArrangeClosest => "arrange_closest",
      ProblemKind::TableMax => "table_max",
      ProblemKind::TableMin => "table_min",
      ProblemKind::TableSum => "table_sum",
      ProblemKind::TableAverage => "table_average",
      ProblemKind::TableDifference => "table_difference",
      ProblemKind::NumberToWords => "number_to_words",
      ProblemKind::WordsToNumber => "words_to_number",
      ProblemKind::CommaGrouping => "comma_grouping",
      ProblemKind::SequenceNeighbor => "sequence_neighbor",
      ProblemKind::CurrencyComposition => "currency_composition",
    }
  }

  /// Difficulty family whose tier table drives this kind.
  pub fn family(self) -> DifficultyFamily {
    match self {
      ProblemKind::PlaceValue => DifficultyFamily::PlaceValue,
      ProblemKind::ArrangeLargest | ProblemKind::ArrangeSmallest | ProblemKind::ArrangeClosest => {
        DifficultyFamily::Arrangement
      }
      ProblemKind::TableMax
      | ProblemKind::TableMin
      | ProblemKind::TableSum
      | ProblemKind::TableAverage
      | ProblemKind::TableDifference => DifficultyFamily::DataTable,
      ProblemKind::NumberToWords | ProblemKind::WordsToNumber => DifficultyFamily::Words,
      ProblemKind::CommaGrouping => DifficultyFamily::Grouping,
      ProblemKind::SequenceNeighbor => DifficultyFamily::Sequence,
      ProblemKind::CurrencyComposition => DifficultyFamily::Currency,
    }
  }
}

impl fmt::Display for ProblemKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ProblemKind {
  type Err = CoreError;

  fn from_str(s: &str) -> CoreResult<Self> {
    let key = s.trim().to_ascii_lowercase().replace('-', "_");
    ProblemKind::ALL
      .iter()
      .copied()
      .find(|k| k.as_str() == key)
      .ok_or_else(|| CoreError::UnsupportedKind(s.to_string()))
  }
}

/// Groups of kinds sharing one difficulty tier table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyFamily {
  PlaceValue,
  Arrangement,
  DataTable,
  Words,
  Grouping,
  Sequence,
  Currency,
}

impl DifficultyFamily {
  pub const ALL: [DifficultyFamily; 7] = [
    DifficultyFamily::PlaceValue,
    DifficultyFamily::Arrangement,
    DifficultyFamily::DataTable,
    DifficultyFamily::Words,
    DifficultyFamily::Grouping,
    DifficultyFamily::Sequence,
    DifficultyFamily::Currency,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      DifficultyFamily::PlaceValue => "place_value",
      DifficultyFamily::Arrangement => "arrangement",
      DifficultyFamily::DataTable => "data_table",
      DifficultyFamily::Words => "words",
      DifficultyFamily::Grouping => "grouping",
      DifficultyFamily::Sequence => "sequence",
      DifficultyFamily::Currency => "currency",
    }
  }
}

impl FromStr for DifficultyFamily {
  type Err = CoreError;

  fn from_str(s: &str) -> CoreResult<Self> {
    DifficultyFamily::ALL
      .iter()
      .copied()
      .find(|f| f.as_str() == s.trim())
      .ok_or_else(|| CoreError::UnsupportedKind(s.to_string()))
  }
}

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
  pub min: i64,
  pub max: i64,
}

impl ValueRange {
  pub fn new(min: i64, max: i64) -> Self {
    Self { min, max }
  }

  /// Number of distinct integers in the range (0 when inverted).
  pub fn span(&self) -> u64 {
    if self.max < self.min { 0 } else { self.max.abs_diff(self.min).saturating_add(1) }
  }
}

/// Parameters for one problem, produced fresh by the difficulty resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
  pub digit_count: u32,
  pub value_range: ValueRange,
  pub option_count: u32,
  /// Index of the tier the level resolved to (0 = easiest).
  pub tier: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
  pub label: String,
  pub value: i64,
}

/// Kind-specific payload the host renders next to the prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProblemData {
  PlaceValue { number: i64, digit: u8, position: u32 },
  Digits { digits: Vec<u8> },
  DigitsWithTarget { digits: Vec<u8>, target: i64 },
  Table { title: String, rows: Vec<TableRow>, compare: Option<(String, String)> },
  Number { value: i64 },
  Words { text: String },
  Sequence { start: i64, offset: i64 },
  Currency { target: i64, denominations: Vec<u32> },
}

/// One acceptable answer shape. Matching rules live in `validate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", content = "value", rename_all = "snake_case")]
pub enum SolutionForm {
  /// Integer answer; input may carry grouping commas or a currency symbol.
  Number(i64),
  /// English words; compared after word normalization and filler removal.
  Words(String),
  /// Free label such as a category name; case- and spacing-insensitive.
  Label(String),
  /// Punctuation-exact text (whitespace ignored), e.g. a comma-grouped number.
  Literal(String),
  /// Any multiset of offered denominations summing to the target.
  Composition { target: i64, canonical: Vec<u32> },
}

/// A generated problem. `solution_forms` is never empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
  pub id: String,
  pub kind: ProblemKind,
  pub prompt: String,
  pub data: ProblemData,
  pub solution_forms: Vec<SolutionForm>,
  pub canonical_answer: String,
  pub hint: String,
  pub reward_points: u32,
}

impl Problem {
  pub fn new(
    kind: ProblemKind,
    prompt: String,
    data: ProblemData,
    solution_forms: Vec<SolutionForm>,
    canonical_answer: String,
    hint: String,
    params: &GenerationParams,
  ) -> CoreResult<Self> {
    if solution_forms.is_empty() {
      return Err(CoreError::invalid(format!("{kind}: problem built without solution forms")));
    }
    Ok(Self {
      id: uuid::Uuid::new_v4().to_string(),
      kind,
      prompt,
      data,
      solution_forms,
      canonical_answer,
      hint,
      reward_points: reward_for_tier(params.tier),
    })
  }
}

/// Reward for a correct answer: 1 point at the first tier, up to 3.
pub fn reward_for_tier(tier: u8) -> u32 {
  (tier as u32 + 1).clamp(1, 3)
}

/// Raw user response as it arrives from the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
  Number(i64),
  Text(String),
  Denominations(Vec<u32>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
  pub correct: bool,
  pub message: String,
  pub canonical_answer: String,
}
