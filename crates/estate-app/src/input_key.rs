//! Keyboard input, independent of the terminal library
//!
//! The TUI converts crossterm events into [`InputKey`] at its boundary, so the
//! application crate can be driven by tests without a terminal.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Character to insert when this key is typed into a text field
    pub fn typed_char(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_distinct() {
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(InputKey::Char('é').typed_char(), Some('é'));
        assert_eq!(InputKey::CharCtrl('a').typed_char(), None);
        assert_eq!(InputKey::Char('\u{7}').typed_char(), None);
        assert_eq!(InputKey::Enter.typed_char(), None);
    }
}
