use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termtris_engine::GameEvent;

/// How long one read waits before giving the input thread a chance to stop.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Reads at most one terminal event and classifies it.
pub(crate) fn read_event() -> io::Result<Option<GameEvent>> {
    if !event::poll(POLL_TIMEOUT)? {
        return Ok(None);
    }
    Ok(classify(&event::read()?))
}

/// Maps a terminal event to a game event; unbound keys map to `None`.
pub(crate) fn classify(event: &Event) -> Option<GameEvent> {
    match event {
        Event::Key(key) => classify_key(key),
        Event::Resize(..) => Some(GameEvent::Redraw),
        _ => None,
    }
}

fn classify_key(key: &KeyEvent) -> Option<GameEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameEvent::Quit);
    }
    let event = match key.code {
        KeyCode::Left | KeyCode::Char('h') => GameEvent::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => GameEvent::MoveRight,
        KeyCode::Down | KeyCode::Char('j') => GameEvent::MoveDown,
        KeyCode::Up | KeyCode::Char('k' | 'x') => GameEvent::RotateCw,
        KeyCode::Char('z') => GameEvent::RotateCcw,
        KeyCode::Char('a') => GameEvent::Rotate180,
        KeyCode::Char(' ') => GameEvent::QuickDrop,
        KeyCode::Char('p') => GameEvent::PauseToggle,
        KeyCode::Char('q') => GameEvent::Quit,
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_and_vim_keys() {
        for (code, expected) in [
            (KeyCode::Left, GameEvent::MoveLeft),
            (KeyCode::Char('h'), GameEvent::MoveLeft),
            (KeyCode::Right, GameEvent::MoveRight),
            (KeyCode::Char('l'), GameEvent::MoveRight),
            (KeyCode::Down, GameEvent::MoveDown),
            (KeyCode::Char('j'), GameEvent::MoveDown),
            (KeyCode::Up, GameEvent::RotateCw),
            (KeyCode::Char('k'), GameEvent::RotateCw),
            (KeyCode::Char('x'), GameEvent::RotateCw),
            (KeyCode::Char('z'), GameEvent::RotateCcw),
            (KeyCode::Char('a'), GameEvent::Rotate180),
            (KeyCode::Char(' '), GameEvent::QuickDrop),
            (KeyCode::Char('p'), GameEvent::PauseToggle),
            (KeyCode::Char('q'), GameEvent::Quit),
        ] {
            assert_eq!(classify(&key(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(classify(&ctrl_c), Some(GameEvent::Quit));
        let ctrl_h = Event::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL));
        assert_eq!(classify(&ctrl_h), None);
    }

    #[test]
    fn test_unbound_and_released_keys() {
        assert_eq!(classify(&key(KeyCode::Char('c'))), None);
        assert_eq!(classify(&key(KeyCode::Enter)), None);

        let mut release = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(classify(&Event::Key(release)), None);
    }

    #[test]
    fn test_resize_redraws() {
        assert_eq!(classify(&Event::Resize(80, 24)), Some(GameEvent::Redraw));
        assert_eq!(classify(&Event::FocusGained), None);
    }
}
