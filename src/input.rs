//! Maps terminal events to game actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Retry,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            Action::Jump
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Retry,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn map_event(event: &Event) -> Action {
    match event {
        Event::Key(key) => map_key(*key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Action::Jump
        }
        _ => Action::None,
    }
}
