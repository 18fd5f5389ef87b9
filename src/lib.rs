//! Space Invaders: a deterministic, frame-driven fixed-screen shooter.
//!
//! - `entities`: pure data and constants
//! - `level`: per-level enemy layout and motion
//! - `compute`: the simulation tick and phase transitions
//! - `input`: key events → intents and phase changes
//! - `display`: rendering onto a `Canvas`, plus the terminal rasterizer
//! - `frontend`: crossterm key translation
//! - `config`, `error`: CLI configuration and host errors

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod frontend;
pub mod input;
pub mod level;

pub use config::Config;
pub use entities::{GamePhase, GameState};
pub use error::GameError;
