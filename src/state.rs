//! Host state: configuration, difficulty table, generator, progress, the
//! injected random source and the problem currently on screen.
//!
//! Everything is owned here and passed explicitly; there are no globals.

use tracing::{info, instrument};

use crate::config::{load_game_config_from_env, GameConfig};
use crate::difficulty::DifficultyTable;
use crate::domain::DifficultyFamily;
use crate::error::CoreResult;
use crate::generator::ProblemGenerator;
use crate::progress::UserProgressState;
use crate::random::{RandomSource, SeededSource};
use crate::session::ProblemSession;

pub struct GameState {
    pub config: GameConfig,
    pub difficulty: DifficultyTable,
    pub generator: ProblemGenerator,
    pub progress: UserProgressState,
    pub rng: Box<dyn RandomSource + Send>,
    pub current: Option<ProblemSession>,
}

impl GameState {
    /// Build state from env: load config, resolve tier tables, seed the random source.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> CoreResult<Self> {
        let cfg = load_game_config_from_env()?;
        Self::new(cfg)
    }

    pub fn new(config: GameConfig) -> CoreResult<Self> {
        config.check()?;
        let difficulty = config.difficulty_table()?;

        // Inventory summary by family.
        for family in DifficultyFamily::ALL {
            let tiers = difficulty.tiers(family);
            let top = tiers.last().map(|t| t.digit_count).unwrap_or(0);
            info!(target: "numsense", family = family.as_str(), tiers = tiers.len(), max_digits = top, "Difficulty table");
        }

        let rng: Box<dyn RandomSource + Send> = match config.seed {
            Some(seed) => {
                info!(target: "numsense", seed, "Deterministic random source");
                Box::new(SeededSource::from_seed(seed))
            }
            None => Box::new(SeededSource::from_entropy()),
        };

        Ok(Self {
            generator: ProblemGenerator::new(config.prompts.clone(), config.content.clone()),
            difficulty,
            progress: UserProgressState::default(),
            rng,
            current: None,
            config,
        })
    }

    /// Current problem if its id matches.
    pub fn session_for(&mut self, problem_id: &str) -> Option<&mut ProblemSession> {
        self.current
            .as_mut()
            .filter(|s| s.problem().id == problem_id)
    }
}
