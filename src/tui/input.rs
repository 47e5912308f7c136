//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::view::ViewWindow;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the graph.
    Quit,
}

/// Handles key input and moves the window. Without a window only quitting works.
pub fn handle_key(view: Option<&mut ViewWindow>, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit
        }
        _ => {}
    }

    let Some(view) = view else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('i') => view.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('o') => view.zoom_out(),
        KeyCode::Left | KeyCode::Char('h') => view.pan_left(),
        KeyCode::Right | KeyCode::Char('l') => view.pan_right(),
        KeyCode::Char('r') | KeyCode::Home => view.reset(),
        _ => {}
    }
    KeyAction::None
}
