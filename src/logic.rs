//! Host operations shared by the protocol driver and tests:
//!   - serving a new problem at the player's level
//!   - checking an answer, applying the reward and module unlocks
//!   - hints and progress snapshots

use tracing::{info, instrument, warn};

use crate::domain::{Answer, Problem, ProblemKind, Verdict};
use crate::error::{CoreError, CoreResult};
use crate::progress::{RewardOutcome, UserProgressState};
use crate::session::{Phase, ProblemSession};
use crate::state::GameState;
use crate::util::trunc_for_log;

#[derive(Clone, Debug)]
pub struct SubmitOutcome {
  pub verdict: Verdict,
  pub phase: Phase,
  pub reward: Option<RewardOutcome>,
  pub unlocked: Vec<String>,
}

impl SubmitOutcome {
  /// The host should schedule the next problem.
  pub fn advancing(&self) -> bool {
    self.phase == Phase::Advancing
  }
}

#[instrument(level = "info", skip(state), fields(%kind, level = state.progress.level))]
pub fn new_problem(state: &mut GameState, kind: ProblemKind) -> CoreResult<Problem> {
  let params = state.difficulty.resolve(kind, state.progress.level);
  let problem = state.generator.generate(kind, &params, state.rng.as_mut())?;
  info!(target: "problem", id = %problem.id, %kind, tier = params.tier, "Problem served");
  state.current = Some(ProblemSession::present(problem.clone()));
  Ok(problem)
}

#[instrument(level = "info", skip(state, answer), fields(%problem_id))]
pub fn submit_answer(state: &mut GameState, problem_id: &str, answer: &Answer) -> CoreResult<SubmitOutcome> {
  let session = state
    .session_for(problem_id)
    .ok_or_else(|| CoreError::InvalidState(format!("unknown problemId: {problem_id}")))?;
  let verdict = session.answer(answer)?;
  let phase = session.settle()?;
  let points = session.problem().reward_points;
  let attempts = session.attempts();

  let mut reward = None;
  let mut unlocked = Vec::new();
  if verdict.correct {
    let outcome = state.progress.apply_reward(points);
    if outcome.leveled_up {
      for module in state.config.unlocks_at(outcome.level) {
        if state.progress.unlock(module.clone()) {
          info!(target: "numsense", %module, level = outcome.level, "Module unlocked");
          unlocked.push(module);
        }
      }
    }
    reward = Some(outcome);
  }

  if let Answer::Text(t) = answer {
    info!(target: "problem", id = %problem_id, correct = verdict.correct, attempts, answer = %trunc_for_log(t, 40), "Answer evaluated");
  } else {
    info!(target: "problem", id = %problem_id, correct = verdict.correct, attempts, "Answer evaluated");
  }
  Ok(SubmitOutcome { verdict, phase, reward, unlocked })
}

#[instrument(level = "info", skip(state), fields(%problem_id))]
pub fn hint_text(state: &mut GameState, problem_id: &str) -> String {
  match state.session_for(problem_id) {
    Some(s) => s.problem().hint.clone(),
    None => {
      warn!(target: "numsense", %problem_id, "Hint requested for unknown problem");
      "No hint: unknown problem.".into()
    }
  }
}

pub fn progress_snapshot(state: &GameState) -> UserProgressState {
  state.progress.clone()
}

/// Drop the current problem (player navigated away).
pub fn leave(state: &mut GameState) {
  if let Some(s) = state.current.take() {
    info!(target: "numsense", id = %s.problem().id, "Problem abandoned");
  }
}
