//! crossterm glue: key translation and held-key tracking.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{Key, KeyAction, KeyInput};

/// A movement key counts as held while press/repeat events keep arriving
/// within this many ticks.  Only used on terminals that never report key
/// releases; OS key repeat refreshes it well inside the window.
pub const HOLD_TICKS: u64 = 8;

/// Map a terminal key event onto the game's keys.  Repeats count as presses.
pub fn translate(event: &KeyEvent) -> Option<KeyInput> {
    let key = match event.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char('a') | KeyCode::Char('A') => Key::A,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::D,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        _ => return None,
    };
    let action = match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => KeyAction::Press,
        KeyEventKind::Release => KeyAction::Release,
    };
    Some(KeyInput { key, action })
}

/// Esc, `q`, or Ctrl-C close the session.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Synthesizes releases for movement keys whose events have gone quiet.
#[derive(Debug, Default)]
pub struct KeyHoldTracker {
    last_seen: HashMap<Key, u64>,
}

impl KeyHoldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, input: KeyInput, tick: u64) {
        if !input.key.is_movement() {
            return;
        }
        match input.action {
            KeyAction::Press => {
                self.last_seen.insert(input.key, tick);
            }
            KeyAction::Release => {
                self.last_seen.remove(&input.key);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }

    /// Forget keys not seen for more than `HOLD_TICKS` and return a release
    /// for each of them.
    pub fn expire(&mut self, tick: u64) -> Vec<KeyInput> {
        let mut released: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|&(_, &seen)| tick.saturating_sub(seen) > HOLD_TICKS)
            .map(|(&key, _)| key)
            .collect();
        // HashMap order is arbitrary; keep the output stable.
        released.sort_by_key(|k| *k as u8);
        for key in &released {
            self.last_seen.remove(key);
        }
        released.into_iter().map(KeyInput::release).collect()
    }
}
