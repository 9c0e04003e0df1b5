//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use estate_app::{InputKey, Message};
use estate_core::prelude::*;

/// Frame interval while idle
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c.to_ascii_lowercase()))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        KeyCode::F(n) => Some(InputKey::F(n)),
        _ => None,
    }
}

/// Poll for terminal events with timeout
///
/// Returns [`Message::Tick`] when nothing happened within the poll interval,
/// so the loop keeps draining background results.
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(Some(Message::Tick));
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(key_event_to_input(key).map(Message::Key))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn convert(code: KeyCode, modifiers: KeyModifiers) -> Option<InputKey> {
        key_event_to_input(KeyEvent::new(code, modifiers))
    }

    fn plain(code: KeyCode) -> Option<InputKey> {
        convert(code, KeyModifiers::NONE)
    }

    fn shifted(code: KeyCode) -> Option<InputKey> {
        convert(code, KeyModifiers::SHIFT)
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(plain(KeyCode::Char('e')), Some(InputKey::Char('e')));
        assert_eq!(plain(KeyCode::Char('ß')), Some(InputKey::Char('ß')));
    }

    #[test]
    fn test_shifted_row_keys_keep_case() {
        // Row reordering is bound to K / J
        assert_eq!(shifted(KeyCode::Char('K')), Some(InputKey::Char('K')));
        assert_eq!(shifted(KeyCode::Char('J')), Some(InputKey::Char('J')));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            convert(KeyCode::Char('s'), KeyModifiers::CONTROL),
            Some(InputKey::CharCtrl('s'))
        );
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        assert_eq!(
            convert(KeyCode::Char('J'), ctrl_shift),
            Some(InputKey::CharCtrl('j'))
        );
    }

    #[test]
    fn test_tab_and_backtab() {
        assert_eq!(plain(KeyCode::Tab), Some(InputKey::Tab));
        assert_eq!(shifted(KeyCode::Tab), Some(InputKey::BackTab));
        assert_eq!(shifted(KeyCode::BackTab), Some(InputKey::BackTab));
    }

    #[test]
    fn test_editing_and_paging_keys() {
        assert_eq!(plain(KeyCode::Enter), Some(InputKey::Enter));
        assert_eq!(plain(KeyCode::Esc), Some(InputKey::Esc));
        assert_eq!(plain(KeyCode::Backspace), Some(InputKey::Backspace));
        assert_eq!(plain(KeyCode::Delete), Some(InputKey::Delete));
        assert_eq!(plain(KeyCode::PageUp), Some(InputKey::PageUp));
        assert_eq!(plain(KeyCode::PageDown), Some(InputKey::PageDown));
        assert_eq!(plain(KeyCode::F(5)), Some(InputKey::F(5)));
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        assert_eq!(plain(KeyCode::Insert), None);
        assert_eq!(plain(KeyCode::CapsLock), None);
    }
}
