//! Key event helpers
//!
//! Classifies crossterm key events into the two families the dispatch
//! protocol cares about (printable vs. control) and matches keyboard
//! shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A printable key inserts text or triggers a character shortcut.
///
/// Shift is allowed (upper case letters, symbols); Control and Alt chords
/// are treated as control keys.
pub fn is_printable(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

pub fn is_space(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char(' ') && is_printable(key)
}

/// Shift+Tab arrives as `BackTab` on most terminals, as `Tab` + SHIFT on some.
pub fn is_back_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

pub fn is_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
}

/// Character shortcuts are stored lower-cased so `o` and `O` both match.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Check whether a key event triggers the given shortcut
pub fn matches_shortcut(shortcut: KeyCode, key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    normalize(shortcut) == normalize(key.code)
}

/// Parse a shortcut name such as `"o"`, `"F5"`, `"Esc"` or `"Delete"`
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(normalize(KeyCode::Char(c)));
    }

    let lower = name.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f') {
        if let Ok(n) = n.parse::<u8>() {
            if (1..=24).contains(&n) {
                return Some(KeyCode::F(n));
            }
        }
    }

    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => return None,
    };
    Some(code)
}

// -- Scripting helpers --
//
// Key builders for feeding a `ScriptedScreen` or calling
// `Dialog::press_key` directly, e.g.
// `ScriptedScreen::new(40, 10, typed("Ann").into_iter().chain([press(KeyCode::Enter)]))`.

/// Build a plain key press event
pub fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Build a key press event for a character
pub fn char_key(c: char) -> KeyEvent {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

/// Turn a string into the key presses that would type it
pub fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars().map(char_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_classification() {
        assert!(is_printable(&char_key('a')));
        assert!(is_printable(&char_key('A')));
        assert!(!is_printable(&press(KeyCode::Enter)));
        assert!(!is_printable(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_shortcut_match_ignores_case() {
        assert!(matches_shortcut(KeyCode::Char('o'), &char_key('O')));
        assert!(matches_shortcut(KeyCode::Char('O'), &char_key('o')));
        assert!(matches_shortcut(KeyCode::F(5), &press(KeyCode::F(5))));
        assert!(!matches_shortcut(KeyCode::Char('o'), &char_key('p')));
    }

    #[test]
    fn test_back_tab_variants() {
        assert!(is_back_tab(&press(KeyCode::BackTab)));
        assert!(is_back_tab(&KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)));
        assert!(!is_back_tab(&press(KeyCode::Tab)));
        assert!(is_tab(&press(KeyCode::Tab)));
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("F5"), Some(KeyCode::F(5)));
        assert_eq!(parse_key("esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Y"), Some(KeyCode::Char('y')));
        assert_eq!(parse_key("f"), Some(KeyCode::Char('f')));
        assert_eq!(parse_key("bogus"), None);
    }
}
