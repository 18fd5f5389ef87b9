//! Input adapter: platform-neutral key events → intents and phase changes.
//!
//! Nothing here moves anything.  A key only flips a movement flag, raises the
//! fire request, or starts/restarts the game; the next `tick` does the rest.

use crate::compute::{reset_game, start_game};
use crate::entities::{GamePhase, GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    Enter,
}

impl Key {
    pub fn is_movement(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::A | Key::D)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyInput {
    pub fn press(key: Key) -> Self {
        KeyInput {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        KeyInput {
            key,
            action: KeyAction::Release,
        }
    }
}

/// Apply one key event.
///
/// * Enter (press): starts from `Idle`, fully resets from `Ended`.
/// * ← / A and → / D: press sets the intent while `Playing`; release clears
///   it in any phase so a key let go on the title screen never sticks.
/// * Space (press, `Playing` only): requests a shot.
pub fn handle_key(state: &GameState, input: KeyInput) -> GameState {
    let KeyInput { key, action } = input;

    match (key, action) {
        (Key::Enter, KeyAction::Press) => match state.phase {
            GamePhase::Idle => start_game(state),
            GamePhase::Ended { .. } => reset_game(state),
            GamePhase::Playing => state.clone(),
        },
        (Key::Enter, KeyAction::Release) => state.clone(),

        (Key::Left | Key::A, KeyAction::Release) => {
            let mut next = state.clone();
            next.player.moving_left = false;
            next
        }
        (Key::Right | Key::D, KeyAction::Release) => {
            let mut next = state.clone();
            next.player.moving_right = false;
            next
        }

        _ if state.phase != GamePhase::Playing => state.clone(),

        (Key::Left | Key::A, KeyAction::Press) => {
            let mut next = state.clone();
            next.player.moving_left = true;
            next
        }
        (Key::Right | Key::D, KeyAction::Press) => {
            let mut next = state.clone();
            next.player.moving_right = true;
            next
        }
        (Key::Space, KeyAction::Press) => GameState {
            fire_requested: true,
            ..state.clone()
        },
        (Key::Space, KeyAction::Release) => state.clone(),
    }
}
