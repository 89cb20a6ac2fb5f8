//! Numsense · number-sense practice engine
//!
//! Generates randomized arithmetic and number-sense problems from a player's
//! level, validates answers against every accepted form, and tracks reward
//! points and levels.
//!
//! Core API:
//!   `DifficultyTable::resolve(kind, level) -> GenerationParams`
//!   `ProblemGenerator::generate(kind, &params, rng) -> Problem`
//!   `validate(&problem, &answer) -> Verdict`
//!   `UserProgressState::apply_reward(points) -> RewardOutcome`

pub mod config;
pub mod difficulty;
pub mod domain;
pub mod driver;
pub mod error;
pub mod generator;
pub mod logic;
pub mod numfmt;
pub mod progress;
pub mod protocol;
pub mod random;
pub mod seeds;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod util;
pub mod validate;

pub use difficulty::DifficultyTable;
pub use domain::{Answer, GenerationParams, Problem, ProblemKind, SolutionForm, Verdict};
pub use error::{CoreError, CoreResult};
pub use generator::ProblemGenerator;
pub use progress::{RewardOutcome, UserProgressState};
pub use random::{RandomSource, SeededSource};
pub use validate::validate;
