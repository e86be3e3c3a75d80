//! Key-down events and key naming.
//!
//! Keys are named the way browsers name `KeyboardEvent.key`: printable keys
//! are the character itself (`"a"`, `"A"`, `"3"`, `" "`), everything else is
//! a word such as `"Enter"`, `"Escape"` or `"ArrowUp"`.

use std::fmt;

use crossterm::event::{KeyCode, ModifierKeyCode};

/// Name used for keys the host cannot identify, and for events without a key.
pub const UNIDENTIFIED: &str = "Unidentified";

/// A key-down event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDown {
    key: Option<String>,
}

impl KeyDown {
    /// An event for the key named `key`, e.g. `"a"`, `"N"` or `"Enter"`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// An event that carries no key name at all.
    ///
    /// It is named [`UNIDENTIFIED`] and becomes the previous key as
    /// `"unidentified"`. A browser script stringifying the missing key would
    /// store `"undefined"` instead; neither value routes anywhere.
    pub fn missing() -> Self {
        Self { key: None }
    }

    /// The raw key name, or [`UNIDENTIFIED`] when the event has none.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(UNIDENTIFIED)
    }

    /// The key name lowercased, as used for all routing decisions.
    pub fn normalized(&self) -> String {
        self.key().to_lowercase()
    }
}

impl From<&str> for KeyDown {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<char> for KeyDown {
    fn from(c: char) -> Self {
        Self::new(c.to_string())
    }
}

impl From<KeyCode> for KeyDown {
    fn from(code: KeyCode) -> Self {
        Self::new(key_name(code))
    }
}

/// Name a crossterm key code using browser key naming. Modifiers held with
/// the key are not part of the name.
pub fn key_name(code: KeyCode) -> String {
    let name = match code {
        KeyCode::Char(c) => return c.to_string(),
        KeyCode::F(n) => return format!("F{n}"),
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Esc => "Escape",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::ScrollLock => "ScrollLock",
        KeyCode::NumLock => "NumLock",
        KeyCode::PrintScreen => "PrintScreen",
        KeyCode::Pause => "Pause",
        KeyCode::Menu => "ContextMenu",
        KeyCode::Modifier(modifier) => modifier_name(modifier),
        _ => UNIDENTIFIED,
    };
    name.to_string()
}

fn modifier_name(modifier: ModifierKeyCode) -> &'static str {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => "Meta",
        ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => "Meta",
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => "Hyper",
        _ => UNIDENTIFIED,
    }
}

/// A single decimal digit key, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Parse a key name that is exactly one ASCII digit.
    pub fn parse(key: &str) -> Option<Self> {
        match key.as_bytes() {
            [b @ b'0'..=b'9'] => Some(Self(b - b'0')),
            _ => None,
        }
    }

    /// The digit as a number, `0..=9`.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalized_lowercases() {
        assert_eq!(KeyDown::new("A").normalized(), "a");
        assert_eq!(KeyDown::new("Enter").normalized(), "enter");
        assert_eq!(KeyDown::new("ArrowUp").normalized(), "arrowup");
    }

    #[test]
    fn test_missing_key_is_unidentified() {
        let event = KeyDown::missing();
        assert_eq!(event.key(), UNIDENTIFIED);
        assert_eq!(event.normalized(), "unidentified");
    }

    #[test]
    fn test_digit_parse() {
        for d in 0..=9u8 {
            let name = d.to_string();
            assert_eq!(Digit::parse(&name).map(Digit::value), Some(d));
        }
        assert_eq!(Digit::parse(""), None);
        assert_eq!(Digit::parse("10"), None);
        assert_eq!(Digit::parse("a"), None);
        assert_eq!(Digit::parse("3\n"), None);
        // Non-ASCII digits are not digit keys.
        assert_eq!(Digit::parse("٣"), None);
    }

    #[test]
    fn test_digit_display() {
        assert_eq!(Digit::parse("7").map(|d| d.to_string()), Some("7".to_string()));
    }

    #[test]
    fn test_key_name_printable() {
        assert_eq!(key_name(KeyCode::Char('n')), "n");
        assert_eq!(key_name(KeyCode::Char('N')), "N");
        assert_eq!(key_name(KeyCode::Char('3')), "3");
        assert_eq!(key_name(KeyCode::Char(' ')), " ");
    }

    #[test]
    fn test_key_name_named_keys() {
        assert_eq!(key_name(KeyCode::Enter), "Enter");
        assert_eq!(key_name(KeyCode::Esc), "Escape");
        assert_eq!(key_name(KeyCode::Up), "ArrowUp");
        assert_eq!(key_name(KeyCode::BackTab), "Tab");
        assert_eq!(key_name(KeyCode::F(5)), "F5");
        assert_eq!(key_name(KeyCode::Null), UNIDENTIFIED);
        assert_eq!(
            key_name(KeyCode::Modifier(ModifierKeyCode::RightShift)),
            "Shift"
        );
    }

    #[test]
    fn test_keydown_from_keycode() {
        let event = KeyDown::from(KeyCode::Char('H'));
        assert_eq!(event.key(), "H");
        assert_eq!(event.normalized(), "h");
    }
}
