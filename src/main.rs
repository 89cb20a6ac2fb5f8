//! Numsense · terminal host
//!
//! Speaks JSON lines on stdin/stdout (see `protocol`); logs go to stderr.
//!
//! Important env variables:
//!   GAME_CONFIG_PATH : path to TOML config (difficulty tiers, content, prompts, unlocks)
//!   GAME_SEED        : u64 seed for a reproducible session
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use tokio::io::BufReader;
use tracing::info;

use numsense::state::GameState;
use numsense::{driver, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Config errors are fatal: a broken difficulty table must not start a session.
  let mut state = GameState::from_env()?;

  let input = BufReader::new(tokio::io::stdin());
  let output = tokio::io::stdout();

  tokio::select! {
    res = driver::run(&mut state, input, output) => res?,
    _ = tokio::signal::ctrl_c() => {
      info!(target: "numsense", "Interrupted; shutting down");
    }
  }
  info!(target: "numsense", level = state.progress.level, points = state.progress.points, "Final progress");
  Ok(())
}
