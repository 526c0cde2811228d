use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.confirm_yes(),
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => app.confirm_no(),
        _ => {}
    }
}

/// Any of Enter, Esc or Space acknowledges a notice
pub(super) fn handle_notice(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
    ) {
        app.dismiss_notice();
    }
}

pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.mode = Mode::Navigate,
        KeyCode::Down | KeyCode::Char('j') => app.help_scroll = app.help_scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => app.help_scroll = app.help_scroll.saturating_sub(1),
        _ => {}
    }
}
