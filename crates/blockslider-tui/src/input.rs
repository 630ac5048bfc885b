use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Previous,
    Next,
    /// Jump to a zero-based block index
    Jump(usize),
    /// Simulate a device orientation change
    Rotate,
    None,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::Previous,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::Next,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::Previous,
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Char(' '), _) => Action::Next,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::Rotate,
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::Jump(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('l'))), Action::Next);
        assert_eq!(handle_key_event(key(KeyCode::Left)), Action::Previous);
        assert_eq!(handle_key_event(key(KeyCode::Char('3'))), Action::Jump(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), Action::Quit);
    }
}
