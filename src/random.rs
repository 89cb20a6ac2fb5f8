//! Injected randomness and constrained sampling.
//!
//! Generators never touch `thread_rng` directly; they draw from a
//! `RandomSource` so tests can seed or script every choice.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::ValueRange;
use crate::error::{CoreError, CoreResult};

pub trait RandomSource {
  /// Uniform integer in `[low, high]` (inclusive). Callers guarantee `low <= high`.
  fn int_in(&mut self, low: i64, high: i64) -> i64;

  fn index(&mut self, len: usize) -> usize {
    if len <= 1 {
      return 0;
    }
    self.int_in(0, len as i64 - 1) as usize
  }

  fn coin(&mut self) -> bool {
    self.int_in(0, 1) == 1
  }
}

/// `StdRng`-backed source; seeded for reproducible sessions.
pub struct SeededSource(StdRng);

impl SeededSource {
  pub fn from_seed(seed: u64) -> Self {
    Self(StdRng::seed_from_u64(seed))
  }

  pub fn from_entropy() -> Self {
    Self(StdRng::from_entropy())
  }
}

impl RandomSource for SeededSource {
  fn int_in(&mut self, low: i64, high: i64) -> i64 {
    self.0.gen_range(low..=high)
  }
}

/// `count` distinct integers from `range`, in draw order.
pub fn unique_integers(rng: &mut dyn RandomSource, count: usize, range: ValueRange) -> CoreResult<Vec<i64>> {
  if range.min > range.max {
    return Err(CoreError::invalid(format!("empty range {}..={}", range.min, range.max)));
  }
  let available = range.span();
  if count as u64 > available {
    return Err(CoreError::RangeError { count: count as u64, available });
  }
  let mut seen = HashSet::with_capacity(count);
  let mut out = Vec::with_capacity(count);
  while out.len() < count {
    let v = rng.int_in(range.min, range.max);
    if seen.insert(v) {
      out.push(v);
    }
  }
  Ok(out)
}

/// Digits 0–9 with repeats allowed. With `leading_non_zero` the first digit is 1–9.
pub fn digit_sequence(rng: &mut dyn RandomSource, length: usize, leading_non_zero: bool) -> Vec<u8> {
  (0..length)
    .map(|i| {
      let low = if i == 0 && leading_non_zero { 1 } else { 0 };
      rng.int_in(low, 9) as u8
    })
    .collect()
}

/// Distinct digits; with `leading_non_zero` a zero drawn first is swapped
/// with a later non-zero digit.
pub fn distinct_digits(rng: &mut dyn RandomSource, length: usize, leading_non_zero: bool) -> CoreResult<Vec<u8>> {
  let mut digits: Vec<u8> = unique_integers(rng, length, ValueRange::new(0, 9))?
    .into_iter()
    .map(|d| d as u8)
    .collect();
  if leading_non_zero && digits.first() == Some(&0) {
    match digits.iter().position(|d| *d != 0) {
      Some(pos) => digits.swap(0, pos),
      // single-digit draw of 0
      None => digits[0] = rng.int_in(1, 9) as u8,
    }
  }
  Ok(digits)
}

/// Fisher–Yates pick of `count` items without replacement.
pub fn choose_many<T: Clone>(rng: &mut dyn RandomSource, items: &[T], count: usize) -> CoreResult<Vec<T>> {
  if count > items.len() {
    return Err(CoreError::RangeError { count: count as u64, available: items.len() as u64 });
  }
  let mut pool: Vec<T> = items.to_vec();
  for i in 0..count {
    let j = i + rng.index(pool.len() - i);
    pool.swap(i, j);
  }
  pool.truncate(count);
  Ok(pool)
}
