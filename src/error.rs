use std::io;

use thiserror::Error;

/// Failures of the host around the simulation.  The simulation itself is
/// infallible.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("terminal is {cols}x{rows} cells, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("tick period must be at least 1 ms")]
    InvalidTickPeriod,
}

pub type Result<T> = std::result::Result<T, GameError>;
