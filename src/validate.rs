//! Answer validation: normalize the raw input and compare it against every
//! acceptable solution form of a problem.
//!
//! Normalization order: trim → collapse whitespace → lowercase → strip
//! punctuation/currency marks → drop filler words ("and", "rupees", "only").

use tracing::debug;

use crate::domain::{Answer, Problem, ProblemData, SolutionForm, Verdict};

const FILLER_WORDS: [&str; 5] = ["and", "rupees", "rupee", "only", "rs"];

/// Trim and collapse internal whitespace.
pub fn normalize_text(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical comparison key for word-form answers.
pub fn normalize_words(s: &str) -> String {
  let lowered = normalize_text(s).to_lowercase();
  let cleaned: String = lowered
    .chars()
    .map(|c| if c == '-' { ' ' } else { c })
    .filter(|c| !matches!(c, ',' | '.' | '!' | '?' | ';' | ':' | '₹' | '/' | '\'' | '"'))
    .collect();
  cleaned
    .split_whitespace()
    .filter(|w| !FILLER_WORDS.contains(w))
    .map(singular_scale)
    .collect::<Vec<_>>()
    .join(" ")
}

fn singular_scale(w: &str) -> &str {
  match w {
    "lakhs" | "lacs" | "lac" => "lakh",
    "crores" => "crore",
    "thousands" => "thousand",
    "hundreds" => "hundred",
    other => other,
  }
}

/// Canonical digit string for numeric answers, or `None` if the input is not a number.
/// Accepts grouping commas, a currency prefix, and suffixes like "/-" or ".00".
/// Any other period is a decimal point, so "1.5" is not a whole number.
pub fn normalize_numeric(s: &str) -> Option<String> {
  let lowered = normalize_text(s).to_lowercase();
  let words: Vec<&str> = lowered
    .split_whitespace()
    .filter(|w| !matches!(*w, "rupees" | "rupee" | "only"))
    .collect();
  let mut compact: String = words.concat();
  for prefix in ["rs.", "rs", "inr", "₹", "$"] {
    if let Some(rest) = compact.strip_prefix(prefix) {
      compact = rest.to_string();
      break;
    }
  }
  if let Some(rest) = compact.strip_suffix("/-") {
    compact = rest.to_string();
  }
  // sentence full stop
  if let Some(rest) = compact.strip_suffix('.') {
    compact = rest.to_string();
  }
  for suffix in [".00", ".0"] {
    if let Some(rest) = compact.strip_suffix(suffix) {
      compact = rest.to_string();
      break;
    }
  }
  let compact: String = compact.chars().filter(|c| *c != ',').collect();
  let (sign, digits) = match compact.strip_prefix('-') {
    Some(rest) => ("-", rest),
    None => ("", compact.as_str()),
  };
  if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  Some(format!("{sign}{digits}"))
}

fn normalize_label(s: &str) -> String {
  normalize_text(s)
    .to_lowercase()
    .trim_end_matches(|c: char| c.is_ascii_punctuation())
    .to_string()
}

/// Crude English singular: cherries → cherry, mangoes → mango, peaches → peach.
fn singular(word: &str) -> &str {
  if word.len() > 4 && word.ends_with("ies") {
    return &word[..word.len() - 3];
  }
  for plural in ["oes", "ches", "shes", "sses", "xes"] {
    if word.ends_with(plural) {
      return &word[..word.len() - 2];
    }
  }
  match word.strip_suffix('s') {
    Some(rest) if !rest.is_empty() && !word.ends_with("ss") => rest,
    _ => word,
  }
}

/// Stem used for label comparison; "ies" plurals keep their "y" singular.
fn label_stem(label: &str) -> String {
  let s = singular(label);
  if s.len() + 3 == label.len() && label.ends_with("ies") {
    format!("{s}y")
  } else {
    s.to_string()
  }
}

fn labels_match(a: &str, b: &str) -> bool {
  let (a, b) = (normalize_label(a), normalize_label(b));
  if a.is_empty() {
    return false;
  }
  a == b || label_stem(&a) == label_stem(&b)
}

fn strip_whitespace(s: &str) -> String {
  s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// True if `answer` is equivalent to one solution form.
pub fn matches_form(form: &SolutionForm, answer: &Answer) -> bool {
  match (form, answer) {
    (SolutionForm::Number(n), Answer::Number(x)) => n == x,
    (SolutionForm::Number(n), Answer::Text(t)) => normalize_numeric(t).as_deref() == Some(n.to_string().as_str()),
    (SolutionForm::Words(w), Answer::Text(t)) => {
      let got = normalize_words(t);
      !got.is_empty() && got == normalize_words(w)
    }
    (SolutionForm::Label(l), Answer::Text(t)) => labels_match(t, l),
    (SolutionForm::Literal(l), Answer::Text(t)) => strip_whitespace(t) == strip_whitespace(l),
    (SolutionForm::Literal(l), Answer::Number(x)) => strip_whitespace(l) == x.to_string(),
    _ => false,
  }
}

pub fn validate(problem: &Problem, answer: &Answer) -> Verdict {
  if let ProblemData::Currency { target, denominations } = &problem.data {
    return validate_composition(problem, *target, denominations, answer);
  }

  let correct = problem.solution_forms.iter().any(|f| matches_form(f, answer));
  debug!(target: "problem", id = %problem.id, kind = %problem.kind, correct, "answer checked");
  let message = if correct { "Correct!".to_string() } else { wrong_answer_message(problem, answer) };
  Verdict { correct, message, canonical_answer: problem.canonical_answer.clone() }
}

fn wrong_answer_message(problem: &Problem, answer: &Answer) -> String {
  if let Answer::Text(t) = answer {
    if t.trim().is_empty() {
      return "Please type an answer first.".into();
    }
  }
  let wants_words = problem.solution_forms.iter().all(|f| matches!(f, SolutionForm::Words(_)));
  let wants_literal = problem.solution_forms.iter().all(|f| matches!(f, SolutionForm::Literal(_)));
  let looks_numeric = match answer {
    Answer::Number(_) => true,
    Answer::Text(t) => normalize_numeric(t).is_some(),
    Answer::Denominations(_) => false,
  };
  if wants_words && looks_numeric {
    "Not quite. Write the number in words.".into()
  } else if wants_literal && looks_numeric && !matches!(answer, Answer::Text(t) if t.contains(',')) {
    "Not quite. Remember to place the commas.".into()
  } else {
    "Not quite. Try again!".into()
  }
}

/// Parse "500 + 200 + 5" (optionally with ₹) into denominations.
fn parse_composition(text: &str) -> Option<Vec<u32>> {
  text
    .split('+')
    .map(|part| {
      let p = part.trim().trim_start_matches('₹').trim();
      p.parse::<u32>().ok()
    })
    .collect()
}

fn validate_composition(problem: &Problem, target: i64, offered: &[u32], answer: &Answer) -> Verdict {
  let chosen = match answer {
    Answer::Denominations(v) => Some(v.clone()),
    Answer::Number(n) => u32::try_from(*n).ok().map(|n| vec![n]),
    Answer::Text(t) => parse_composition(t),
  };
  let canonical_answer = problem.canonical_answer.clone();
  let Some(chosen) = chosen.filter(|c| !c.is_empty()) else {
    return Verdict { correct: false, message: "Pick some notes or coins first.".into(), canonical_answer };
  };
  if let Some(bad) = chosen.iter().find(|d| !offered.contains(d)) {
    return Verdict {
      correct: false,
      message: format!("₹{bad} is not one of the notes or coins on offer."),
      canonical_answer,
    };
  }
  let sum: i64 = chosen.iter().map(|d| *d as i64).sum();
  let correct = sum == target;
  debug!(target: "problem", id = %problem.id, sum, target, correct, "composition checked");
  let message = if correct {
    "Correct!".to_string()
  } else if sum < target {
    format!("That makes ₹{sum}. You need ₹{} more.", target - sum)
  } else {
    format!("That makes ₹{sum}. That is ₹{} too much.", sum - target)
  };
  Verdict { correct, message, canonical_answer }
}
