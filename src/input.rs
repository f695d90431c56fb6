//! Logical input events and their mapping from terminal keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::word::Letter;

/// The only inputs the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Letter(Letter),
    Enter,
    Backspace,
}

impl GameInput {
    /// Maps a key name as produced by on-screen buttons (`"Enter"`,
    /// `"Backspace"` or a single letter).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" => Some(GameInput::Enter),
            "backspace" => Some(GameInput::Backspace),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Letter::new(c).map(GameInput::Letter),
                    _ => None,
                }
            }
        }
    }
}

/// Maps a terminal key press. Releases, repeats of non-press kinds, and any
/// combination with Ctrl, Alt or Super are ignored.
pub fn from_key_event(key: &KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let blocked = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;
    if key.modifiers.intersects(blocked) {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(GameInput::Enter),
        KeyCode::Backspace => Some(GameInput::Backspace),
        KeyCode::Char(c) => Letter::new(c).map(GameInput::Letter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn letters_map_lowercased() {
        assert_eq!(
            from_key_event(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(GameInput::Letter(Letter::new('a').unwrap()))
        );
        assert_eq!(
            from_key_event(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(GameInput::Letter(Letter::new('a').unwrap()))
        );
    }

    #[test]
    fn enter_and_backspace() {
        assert_eq!(
            from_key_event(&key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(GameInput::Enter)
        );
        assert_eq!(
            from_key_event(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(GameInput::Backspace)
        );
    }

    #[test]
    fn modifier_combinations_are_filtered() {
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT, KeyModifiers::SUPER] {
            assert_eq!(from_key_event(&key(KeyCode::Char('r'), modifiers)), None);
            assert_eq!(from_key_event(&key(KeyCode::Enter, modifiers)), None);
        }
    }

    #[test]
    fn non_letters_are_ignored() {
        assert_eq!(from_key_event(&key(KeyCode::Char('1'), KeyModifiers::NONE)), None);
        assert_eq!(from_key_event(&key(KeyCode::Tab, KeyModifiers::NONE)), None);
        assert_eq!(from_key_event(&key(KeyCode::Left, KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(from_key_event(&release), None);
    }

    #[test]
    fn key_names_from_buttons() {
        assert_eq!(GameInput::from_key_name("Enter"), Some(GameInput::Enter));
        assert_eq!(GameInput::from_key_name("Backspace"), Some(GameInput::Backspace));
        assert_eq!(
            GameInput::from_key_name("q"),
            Some(GameInput::Letter(Letter::new('q').unwrap()))
        );
        assert_eq!(GameInput::from_key_name("Shift"), None);
        assert_eq!(GameInput::from_key_name(""), None);
    }
}
