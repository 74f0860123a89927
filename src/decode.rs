//! Decode Module — raw input → `InputEvent`.
//!
//! Two front ends feed the widgets:
//! - `decode_chunk`: one raw chunk as read from a tty in raw mode
//! - `decode_crossterm`: an already parsed crossterm event

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::InputEvent;

const ARROW_UP: &str = "\u{1b}[A";
const ARROW_DOWN: &str = "\u{1b}[B";
const ARROW_RIGHT: &str = "\u{1b}[C";
const ARROW_LEFT: &str = "\u{1b}[D";
const ENTER: &str = "\r";
const CTRL_C: &str = "\u{3}";
const BACKSPACE: &str = "\u{8}";
const DELETE: &str = "\u{7f}";
const SPACE: &str = " ";

/// Map a raw chunk to an event. Unrecognised chunks (including pastes that
/// arrive as one read) are text.
pub fn decode_chunk(chunk: &str) -> InputEvent {
    match chunk {
        ARROW_UP => InputEvent::Up,
        ARROW_DOWN => InputEvent::Down,
        ARROW_RIGHT => InputEvent::Right,
        ARROW_LEFT => InputEvent::Left,
        ENTER => InputEvent::Enter,
        CTRL_C => InputEvent::Interrupt,
        BACKSPACE => InputEvent::Backspace,
        DELETE => InputEvent::Delete,
        SPACE => InputEvent::Space,
        other => InputEvent::Text(other.to_string()),
    }
}

/// Map a crossterm event. Returns `None` for events the widgets never see
/// (releases, mouse, resize, unmapped keys).
pub fn decode_crossterm(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => decode_key(key),
        Event::Paste(text) => Some(InputEvent::Text(text.clone())),
        _ => None,
    }
}

fn decode_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let event = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputEvent::Interrupt
        }
        // Ctrl+Alt together is AltGr on some platforms and still types text.
        KeyCode::Char(_) if is_shortcut(key.modifiers) => return None,
        KeyCode::Char(' ') => InputEvent::Space,
        KeyCode::Char(c) => InputEvent::Text(c.to_string()),
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::Left => InputEvent::Left,
        KeyCode::Right => InputEvent::Right,
        KeyCode::Enter => InputEvent::Enter,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Delete => InputEvent::Delete,
        _ => return None,
    };
    Some(event)
}

fn is_shortcut(modifiers: KeyModifiers) -> bool {
    let chord = modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
    chord == KeyModifiers::CONTROL || chord == KeyModifiers::ALT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_control_chunks() {
        assert_eq!(decode_chunk("\u{1b}[A"), InputEvent::Up);
        assert_eq!(decode_chunk("\u{1b}[B"), InputEvent::Down);
        assert_eq!(decode_chunk("\u{1b}[C"), InputEvent::Right);
        assert_eq!(decode_chunk("\u{1b}[D"), InputEvent::Left);
        assert_eq!(decode_chunk("\r"), InputEvent::Enter);
        assert_eq!(decode_chunk("\u{3}"), InputEvent::Interrupt);
        assert_eq!(decode_chunk("\u{8}"), InputEvent::Backspace);
        assert_eq!(decode_chunk("\u{7f}"), InputEvent::Delete);
        assert_eq!(decode_chunk(" "), InputEvent::Space);
    }

    #[test]
    fn test_decode_text_chunk_verbatim() {
        assert_eq!(decode_chunk("k"), InputEvent::text("k"));
        assert_eq!(decode_chunk("pasted text"), InputEvent::text("pasted text"));
        assert_eq!(decode_chunk("\u{1b}[Z"), InputEvent::text("\u{1b}[Z"));
    }

    #[test]
    fn test_decode_crossterm_keys() {
        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(decode_crossterm(&press(KeyCode::Up)), Some(InputEvent::Up));
        assert_eq!(
            decode_crossterm(&press(KeyCode::Char('x'))),
            Some(InputEvent::text("x"))
        );
        assert_eq!(
            decode_crossterm(&press(KeyCode::Char(' '))),
            Some(InputEvent::Space)
        );
        assert_eq!(decode_crossterm(&press(KeyCode::Tab)), None);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(decode_crossterm(&ctrl_c), Some(InputEvent::Interrupt));
    }

    #[test]
    fn test_decode_drops_modified_chars() {
        let key = |c, modifiers| {
            decode_crossterm(&Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers)))
        };
        assert_eq!(key('a', KeyModifiers::CONTROL), None);
        assert_eq!(key('x', KeyModifiers::ALT), None);
        assert_eq!(key(' ', KeyModifiers::CONTROL), None);
        assert_eq!(key('c', KeyModifiers::CONTROL), Some(InputEvent::Interrupt));
        assert_eq!(key('A', KeyModifiers::SHIFT), Some(InputEvent::text("A")));
        let alt_gr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(key('@', alt_gr), Some(InputEvent::text("@")));
    }

    #[test]
    fn test_decode_crossterm_ignores_release() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(decode_crossterm(&Event::Key(key)), None);
    }

    #[test]
    fn test_decode_paste_is_one_chunk() {
        let paste = Event::Paste("hello".to_string());
        assert_eq!(decode_crossterm(&paste), Some(InputEvent::text("hello")));
        assert_eq!(decode_crossterm(&Event::Resize(80, 24)), None);
    }
}
