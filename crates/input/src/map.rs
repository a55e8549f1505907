//! Mapping from terminal events to game input events.

use crate::types::{InputEvent, Key};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// Map a terminal key to a game key.
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Key::Left,
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(ch) => Key::Char(ch),
        _ => Key::Other,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a key event. Releases are dropped; autorepeat counts as a press so a
/// held arrow keeps the avatar moving.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }
    Some(InputEvent::KeyDown(map_key(key.code)))
}

/// Any button press is a click; releases, drags and wheel motion are not.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(_) => Some(InputEvent::MouseButtonDown),
        _ => None,
    }
}

/// Map any terminal event. Resize and focus events carry no game input.
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => handle_key_event(key),
        Event::Mouse(mouse) => handle_mouse_event(mouse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Key::Left);
        assert_eq!(map_key(KeyCode::Right), Key::Right);
        assert_eq!(map_key(KeyCode::Char('H')), Key::Left);
        assert_eq!(map_key(KeyCode::Char('a')), Key::Left);
        assert_eq!(map_key(KeyCode::Char('L')), Key::Right);
        assert_eq!(map_key(KeyCode::Char('d')), Key::Right);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyCode::Enter), Key::Enter);
        assert_eq!(map_key(KeyCode::Esc), Key::Escape);
        assert_eq!(map_key(KeyCode::Char(' ')), Key::Space);
        assert_eq!(map_key(KeyCode::Char('x')), Key::Char('x'));
        assert_eq!(map_key(KeyCode::F(5)), Key::Other);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('Q'))),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn test_release_is_dropped_repeat_is_kept() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..release
        };
        assert_eq!(
            handle_key_event(repeat),
            Some(InputEvent::KeyDown(Key::Left))
        );
    }

    #[test]
    fn test_any_button_press_is_a_click() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::MouseButtonDown)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right))),
            Some(InputEvent::MouseButtonDown)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left))),
            None
        );
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::Moved)), None);
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::ScrollDown)), None);
    }

    #[test]
    fn test_map_event() {
        assert_eq!(
            map_event(Event::Key(KeyEvent::from(KeyCode::Enter))),
            Some(InputEvent::KeyDown(Key::Enter))
        );
        assert_eq!(map_event(Event::Resize(80, 24)), None);
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
