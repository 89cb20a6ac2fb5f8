//! Per-problem state machine.
//!
//! ```text
//! Presented ──answer──▶ Answered{correct} ──settle──▶ Retry      (incorrect)
//!                                                   └▶ Advancing  (correct)
//! Retry ──answer──▶ Answered{..}
//! ```
//!
//! `Advancing` is terminal for this problem; the host owns the timer that
//! presents the next one.

use serde::Serialize;

use crate::domain::{Answer, Problem, Verdict};
use crate::error::{CoreError, CoreResult};
use crate::validate::validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
  Presented,
  Answered { correct: bool },
  Retry,
  Advancing,
}

#[derive(Clone, Debug)]
pub struct ProblemSession {
  problem: Problem,
  phase: Phase,
  attempts: u32,
}

impl ProblemSession {
  pub fn present(problem: Problem) -> Self {
    Self { problem, phase: Phase::Presented, attempts: 0 }
  }

  pub fn problem(&self) -> &Problem {
    &self.problem
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn attempts(&self) -> u32 {
    self.attempts
  }

  /// Validate an attempt. Only legal while `Presented` or `Retry`.
  pub fn answer(&mut self, input: &Answer) -> CoreResult<Verdict> {
    match self.phase {
      Phase::Presented | Phase::Retry => {}
      other => {
        return Err(CoreError::InvalidState(format!(
          "problem {} cannot take an answer while {other:?}",
          self.problem.id
        )))
      }
    }
    self.attempts += 1;
    let verdict = validate(&self.problem, input);
    self.phase = Phase::Answered { correct: verdict.correct };
    Ok(verdict)
  }

  /// Leave `Answered`: retry the same problem, or advance past it.
  pub fn settle(&mut self) -> CoreResult<Phase> {
    self.phase = match self.phase {
      Phase::Answered { correct: true } => Phase::Advancing,
      Phase::Answered { correct: false } => Phase::Retry,
      other => {
        return Err(CoreError::InvalidState(format!("nothing to settle while {other:?}")));
      }
    };
    Ok(self.phase)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{GenerationParams, ProblemData, ProblemKind, SolutionForm, ValueRange};

  fn session() -> ProblemSession {
    let params = GenerationParams { digit_count: 3, value_range: ValueRange::new(100, 999), option_count: 1, tier: 0 };
    let problem = Problem::new(
      ProblemKind::ArrangeLargest,
      "digits 5, 1, 9".into(),
      ProblemData::Digits { digits: vec![5, 1, 9] },
      vec![SolutionForm::Number(951)],
      "951".into(),
      "biggest first".into(),
      &params,
    )
    .unwrap();
    ProblemSession::present(problem)
  }

  #[test]
  fn wrong_then_right() {
    let mut s = session();
    assert_eq!(s.phase(), Phase::Presented);

    let v = s.answer(&Answer::Number(915)).unwrap();
    assert!(!v.correct);
    assert_eq!(s.phase(), Phase::Answered { correct: false });
    assert_eq!(s.settle().unwrap(), Phase::Retry);

    let v = s.answer(&Answer::Text("951".into())).unwrap();
    assert!(v.correct);
    assert_eq!(s.settle().unwrap(), Phase::Advancing);
    assert_eq!(s.attempts(), 2);
  }

  #[test]
  fn rejects_out_of_order_transitions() {
    let mut s = session();
    assert!(matches!(s.settle(), Err(CoreError::InvalidState(_))));
    s.answer(&Answer::Number(951)).unwrap();
    assert!(matches!(s.answer(&Answer::Number(951)), Err(CoreError::InvalidState(_))));
    s.settle().unwrap();
    assert!(matches!(s.answer(&Answer::Number(951)), Err(CoreError::InvalidState(_))));
    assert!(s.settle().is_err());
  }
}
