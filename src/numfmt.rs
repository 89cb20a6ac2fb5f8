//! Indian-system number formatting: comma grouping (12,34,567) and English
//! words with lakh/crore scale names.

use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};

const ONES: [&str; 20] = [
  "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
  "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
  "nineteen",
];
const TENS: [&str; 10] = [
  "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const THOUSAND: u64 = 1_000;
const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Last three digits form one group, every two digits before that another.
pub fn group_indian(n: i64) -> CoreResult<String> {
  if n < 0 {
    return Err(CoreError::invalid(format!("cannot group negative number {n}")));
  }
  let digits = n.to_string();
  if digits.len() <= 3 {
    return Ok(digits);
  }
  let (head, tail) = digits.split_at(digits.len() - 3);
  let mut groups: Vec<&str> = Vec::new();
  let mut end = head.len();
  while end > 0 {
    let start = end.saturating_sub(2);
    groups.push(&head[start..end]);
    end = start;
  }
  groups.reverse();
  groups.push(tail);
  Ok(groups.join(","))
}

/// Parse a digit string that may carry grouping commas.
pub fn parse_grouped(s: &str) -> CoreResult<i64> {
  let compact: String = s.trim().chars().filter(|c| *c != ',').collect();
  if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit()) {
    return Err(CoreError::invalid(format!("not a grouped number: {s:?}")));
  }
  compact
    .parse::<i64>()
    .map_err(|e| CoreError::invalid(format!("{s:?}: {e}")))
}

/// Every accepted word rendering of `n`: with and without "and" after "hundred".
pub fn to_words_indian(n: i64) -> CoreResult<BTreeSet<String>> {
  if n < 0 {
    return Err(CoreError::invalid(format!("cannot spell negative number {n}")));
  }
  let n = n as u64;
  let mut forms = BTreeSet::new();
  forms.insert(spell(n, false));
  forms.insert(spell(n, true));
  Ok(forms)
}

/// The form shown in prompts ("two hundred and five").
pub fn display_words(n: i64) -> CoreResult<String> {
  if n < 0 {
    return Err(CoreError::invalid(format!("cannot spell negative number {n}")));
  }
  Ok(spell(n as u64, true))
}

fn spell(n: u64, with_and: bool) -> String {
  if n == 0 {
    return ONES[0].to_string();
  }
  let mut parts: Vec<String> = Vec::new();
  let crore = n / CRORE;
  if crore > 0 {
    parts.push(format!("{} crore", spell(crore, with_and)));
  }
  let lakh = (n / LAKH) % 100;
  if lakh > 0 {
    parts.push(format!("{} lakh", below_hundred(lakh)));
  }
  let thousand = (n / THOUSAND) % 100;
  if thousand > 0 {
    parts.push(format!("{} thousand", below_hundred(thousand)));
  }
  let rest = n % THOUSAND;
  if rest > 0 {
    parts.push(below_thousand(rest, with_and));
  }
  parts.join(" ")
}

fn below_hundred(n: u64) -> String {
  let n = n as usize;
  if n < 20 {
    return ONES[n].to_string();
  }
  match n % 10 {
    0 => TENS[n / 10].to_string(),
    r => format!("{} {}", TENS[n / 10], ONES[r]),
  }
}

fn below_thousand(n: u64, with_and: bool) -> String {
  let hundreds = n / 100;
  let rest = n % 100;
  match (hundreds, rest) {
    (0, r) => below_hundred(r),
    (h, 0) => format!("{} hundred", ONES[h as usize]),
    (h, r) if with_and => format!("{} hundred and {}", ONES[h as usize], below_hundred(r)),
    (h, r) => format!("{} hundred {}", ONES[h as usize], below_hundred(r)),
  }
}

/// Name of the place `position` digits from the right (0 = ones).
pub fn place_name(position: u32) -> String {
  match position {
    0 => "ones".into(),
    1 => "tens".into(),
    2 => "hundreds".into(),
    3 => "thousands".into(),
    4 => "ten thousands".into(),
    5 => "lakhs".into(),
    6 => "ten lakhs".into(),
    7 => "crores".into(),
    8 => "ten crores".into(),
    p => format!("10^{p}"),
  }
}
