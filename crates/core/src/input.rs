//! Platform-agnostic keyboard state.
//!
//! The platform layer translates its key events into [`KeyEvent`]s; the frame
//! loop only asks whether a key is currently held.

use std::collections::HashSet;

/// Keys the demo distinguishes. Anything else is dropped by the platform
/// layer before it reaches [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

/// Current "is held" state for the window's keyboard.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_key(&mut self, event: KeyEvent) {
        match event.state {
            KeyState::Pressed => {
                self.keys_down.insert(event.key);
            }
            KeyState::Released => {
                self.keys_down.remove(&event.key);
            }
        }
    }

    /// Clears held keys when the window loses focus, so a key released
    /// while another window had focus does not stay stuck down.
    pub fn apply_focus(&mut self, focused: bool) {
        if !focused {
            self.keys_down.clear();
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> KeyEvent {
        KeyEvent {
            key,
            state: KeyState::Pressed,
        }
    }

    fn release(key: Key) -> KeyEvent {
        KeyEvent {
            key,
            state: KeyState::Released,
        }
    }

    #[test]
    fn default_state_has_no_keys_down() {
        let input = InputState::default();
        assert!(!input.key_down(Key::Escape));
    }

    #[test]
    fn press_marks_key_down_until_release() {
        let mut input = InputState::default();
        input.apply_key(press(Key::Escape));
        assert!(input.key_down(Key::Escape));
        input.apply_key(release(Key::Escape));
        assert!(!input.key_down(Key::Escape));
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut input = InputState::default();
        input.apply_key(press(Key::Escape));
        input.apply_key(press(Key::Escape));
        input.apply_key(release(Key::Escape));
        assert!(!input.key_down(Key::Escape));
    }

    #[test]
    fn release_without_press_leaves_key_up() {
        let mut input = InputState::default();
        input.apply_key(release(Key::Escape));
        assert!(!input.key_down(Key::Escape));
        input.apply_key(press(Key::Escape));
        assert!(input.key_down(Key::Escape));
    }

    #[test]
    fn focus_loss_releases_all_keys() {
        let mut input = InputState::default();
        input.apply_key(press(Key::Escape));
        input.apply_focus(false);
        assert!(!input.key_down(Key::Escape));
    }

    #[test]
    fn focus_gain_keeps_keys() {
        let mut input = InputState::default();
        input.apply_key(press(Key::Escape));
        input.apply_focus(true);
        assert!(input.key_down(Key::Escape));
    }
}
