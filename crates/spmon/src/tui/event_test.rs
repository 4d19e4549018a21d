//! Tests for terminal event filtering

use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

use super::*;

fn key(kind: KeyEventKind) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new_with_kind(
        KeyCode::Char('R'),
        KeyModifiers::SHIFT,
        kind,
    ))
}

#[test]
fn test_key_press_is_forwarded() {
    match translate(key(KeyEventKind::Press)) {
        Some(Event::Key(k)) => assert_eq!(k.code, KeyCode::Char('R')),
        other => panic!("expected key event, got {other:?}"),
    }
}

#[test]
fn test_key_release_and_repeat_are_dropped() {
    assert!(translate(key(KeyEventKind::Release)).is_none());
    assert!(translate(key(KeyEventKind::Repeat)).is_none());
}

#[test]
fn test_mouse_and_resize_are_forwarded() {
    let mouse = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    assert!(matches!(
        translate(CrosstermEvent::Mouse(mouse)),
        Some(Event::Mouse(m)) if m.kind == MouseEventKind::ScrollDown
    ));
    assert!(matches!(
        translate(CrosstermEvent::Resize(80, 24)),
        Some(Event::Resize(80, 24))
    ));
}

#[test]
fn test_focus_events_are_dropped() {
    assert!(translate(CrosstermEvent::FocusGained).is_none());
    assert!(translate(CrosstermEvent::FocusLost).is_none());
}

#[test]
fn test_reader_stops_once_handler_is_gone() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    // Returns on the first idle poll (or at once without a terminal)
    read_input(&tx);
}
