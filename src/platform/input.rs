//! Raw input to logical keys

use crate::game::Key;

/// Map a DOM `KeyboardEvent.key` value
pub fn key_from_dom(key: &str) -> Option<Key> {
    match key {
        "ArrowLeft" | "Left" => Some(Key::Left),
        "ArrowRight" | "Right" => Some(Key::Right),
        " " | "Spacebar" | "Enter" => Some(Key::Action),
        _ => None,
    }
}

/// Map a terminal key code
#[cfg(not(target_arch = "wasm32"))]
pub fn key_from_crossterm(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;

    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Key::Action),
        _ => None,
    }
}

/// Synthesizes key releases for inputs that only report presses.
///
/// Most terminals send a press followed by auto-repeat presses while a key is
/// held, and nothing on release. A direction key counts as held until no
/// press has been seen for `timeout` seconds. `Action` is one-shot and never
/// tracked, so every press of it gets through.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    timeout: f64,
    held: Vec<(Key, f64)>,
}

impl HeldKeys {
    pub fn new(timeout: f64) -> Self {
        Self {
            timeout,
            held: Vec::new(),
        }
    }

    /// Note a press at time `now`. Returns true if the press should be
    /// forwarded: always for `Action`, otherwise when the key was not held.
    pub fn press(&mut self, key: Key, now: f64) -> bool {
        if key == Key::Action {
            return true;
        }
        match self.held.iter_mut().find(|(k, _)| *k == key) {
            Some((_, seen)) => {
                *seen = now;
                false
            }
            None => {
                self.held.push((key, now));
                true
            }
        }
    }

    /// Explicit release (for inputs that do report it)
    pub fn release(&mut self, key: Key) -> bool {
        let before = self.held.len();
        self.held.retain(|(k, _)| *k != key);
        self.held.len() != before
    }

    /// Drop keys not seen within the timeout and return them
    pub fn expire(&mut self, now: f64) -> Vec<Key> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        self.held.retain(|&(key, seen)| {
            let alive = now - seen < timeout;
            if !alive {
                released.push(key);
            }
            alive
        });
        released
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }
}
