//! Classification of terminal events into "cancel" or "ignore".

use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Any key press cancels a running effect.
///
/// Releases and auto-repeats are ignored so a single keystroke cancels once
/// on terminals that report key-up events.
pub fn is_cancel_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Check whether a terminal event should stop the running effect.
///
/// Resize, mouse, focus and paste events never cancel; the runner picks up
/// size changes by re-querying the terminal every tick.
pub fn is_cancel_event(event: &Event) -> bool {
    match event {
        Event::Key(key) => is_cancel_key(key),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_any_pressed_key_cancels() {
        for code in [
            KeyCode::Char('q'),
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Left,
            KeyCode::F(5),
        ] {
            assert!(is_cancel_event(&Event::Key(KeyEvent::from(code))));
        }
        assert!(is_cancel_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))));
    }

    #[test]
    fn test_release_and_repeat_do_not_cancel() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        let repeat = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::NONE,
        );
        assert!(!is_cancel_key(&release));
        assert!(!is_cancel_key(&repeat));
    }

    #[test]
    fn test_non_key_events_do_not_cancel() {
        assert!(!is_cancel_event(&Event::Resize(120, 40)));
        assert!(!is_cancel_event(&Event::FocusLost));
    }
}
