//! Command-line configuration.  Every flag is optional; the defaults give
//! the classic game.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::entities::BoundsRule;
use crate::error::{GameError, Result};

/// Frame clock period for ~60 Hz.
pub const DEFAULT_TICK_MS: u64 = 16;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "space_invaders",
    version,
    about = "Fixed-screen Space Invaders in the terminal"
)]
pub struct Config {
    /// Seed for the starfield RNG (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame clock period in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Box used for the enemy wall bounce
    #[arg(long, value_enum, default_value_t = BoundsRule::FullGrid)]
    pub bounds: BoundsRule,

    /// Write logs here (filtered by RUST_LOG); nothing is logged otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            bounds: BoundsRule::FullGrid,
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(GameError::InvalidTickPeriod);
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
