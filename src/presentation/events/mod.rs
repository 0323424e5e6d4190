//! Terminal input mapping.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Wheel delta reported per scroll notch, in pixels.
pub const WHEEL_DELTA_PER_LINE: f64 = 40.0;

/// Horizontal pixels represented by one terminal column.
pub const CELL_WIDTH_PX: u32 = 8;

/// User intent decoded from a terminal event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Leave the application.
    Quit,
    /// Previous control.
    Previous,
    /// Next control.
    Next,
    /// Activate the focal item.
    ActivateFocal,
    /// Reload bypassing the cache.
    Refresh,
    /// Wheel delta; positive scrolls forward.
    Wheel(f64),
    /// Primary button pressed.
    PointerDown {
        /// Column.
        column: u16,
        /// Row.
        row: u16,
    },
    /// Primary button released.
    PointerUp {
        /// Column.
        column: u16,
        /// Row.
        row: u16,
    },
    /// Pointer moved without a button.
    PointerMove {
        /// Column.
        column: u16,
        /// Row.
        row: u16,
    },
    /// Terminal resized.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
}

/// Maps a terminal event to a command. Mouse events are ignored unless enabled.
#[must_use]
pub fn map_event(event: &Event, mouse_enabled: bool) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) if mouse_enabled => map_mouse(mouse),
        Event::Resize(width, height) => Some(Command::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Left | KeyCode::Char('h'), _) => Some(Command::Previous),
        (KeyCode::Right | KeyCode::Char('l'), _) => Some(Command::Next),
        (KeyCode::Enter | KeyCode::Char(' '), _) => Some(Command::ActivateFocal),
        (KeyCode::Char('r'), _) => Some(Command::Refresh),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<Command> {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Some(Command::Wheel(WHEEL_DELTA_PER_LINE))
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            Some(Command::Wheel(-WHEEL_DELTA_PER_LINE))
        }
        MouseEventKind::Down(MouseButton::Left) => Some(Command::PointerDown { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Command::PointerUp { column, row }),
        MouseEventKind::Moved => Some(Command::PointerMove { column, row }),
        _ => None,
    }
}

/// Converts a column count to a viewport width in pixels.
#[must_use]
pub fn columns_to_px(columns: u16) -> u32 {
    u32::from(columns) * CELL_WIDTH_PX
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, Some(Command::Quit) ; "q quits")]
    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Command::Quit) ; "ctrl c quits")]
    #[test_case(KeyCode::Esc, KeyModifiers::NONE, Some(Command::Quit) ; "esc quits")]
    #[test_case(KeyCode::Left, KeyModifiers::NONE, Some(Command::Previous) ; "left is previous")]
    #[test_case(KeyCode::Char('l'), KeyModifiers::NONE, Some(Command::Next) ; "l is next")]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, Some(Command::ActivateFocal) ; "enter activates")]
    #[test_case(KeyCode::Char('r'), KeyModifiers::NONE, Some(Command::Refresh) ; "r refreshes")]
    #[test_case(KeyCode::Char('x'), KeyModifiers::NONE, None ; "unbound key")]
    fn test_key_mapping(code: KeyCode, modifiers: KeyModifiers, expected: Option<Command>) {
        assert_eq!(map_event(&key(code, modifiers), true), expected);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));

        assert_eq!(map_event(&release, true), None);
    }

    #[test]
    fn test_scroll_maps_to_signed_wheel_delta() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::ScrollDown), true),
            Some(Command::Wheel(WHEEL_DELTA_PER_LINE))
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::ScrollUp), true),
            Some(Command::Wheel(-WHEEL_DELTA_PER_LINE))
        );
    }

    #[test]
    fn test_pointer_events() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left)), true),
            Some(Command::PointerDown { column: 10, row: 5 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Right)), true),
            None
        );
    }

    #[test]
    fn test_mouse_disabled() {
        assert_eq!(map_event(&mouse(MouseEventKind::ScrollDown), false), None);
    }

    #[test]
    fn test_columns_to_px() {
        assert_eq!(columns_to_px(80), 640);
        assert_eq!(columns_to_px(120), 960);
    }
}
