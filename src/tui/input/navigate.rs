use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{AdminTab, App, Mode, ViewMode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    // Global keys
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
            return;
        }
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        (_, KeyCode::Char('?')) => {
            app.help_scroll = 0;
            app.mode = Mode::Help;
            return;
        }
        (_, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.toggle_view();
            return;
        }
        _ => {}
    }

    match app.view {
        ViewMode::Public => handle_public(app, key),
        ViewMode::Admin => handle_admin(app, key),
    }
}

fn handle_public(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.begin_inquiry_edit(),
        KeyCode::Down | KeyCode::Char('j') => {
            app.public_scroll = app.public_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.public_scroll = app.public_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => app.public_scroll = app.public_scroll.saturating_add(10),
        KeyCode::PageUp => app.public_scroll = app.public_scroll.saturating_sub(10),
        KeyCode::Char('g') | KeyCode::Home => app.public_scroll = 0,
        // Clamped to the page length at render time
        KeyCode::Char('G') | KeyCode::End => app.public_scroll = usize::MAX,
        _ => {}
    }
}

fn handle_admin(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('1') => {
            app.admin_tab = AdminTab::Inquiries;
            return;
        }
        KeyCode::Char('2') => {
            app.admin_tab = AdminTab::Posts;
            return;
        }
        KeyCode::Char('3') => {
            app.admin_tab = AdminTab::Settings;
            return;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.admin_tab = app.admin_tab.next();
            return;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.admin_tab = app.admin_tab.prev();
            return;
        }
        KeyCode::Esc => {
            app.toggle_view();
            return;
        }
        _ => {}
    }

    match app.admin_tab {
        AdminTab::Inquiries => handle_inquiries_tab(app, key),
        AdminTab::Posts => handle_posts_tab(app, key),
        AdminTab::Settings => handle_settings_tab(app, key),
    }
}

fn move_cursor(cursor: &mut usize, len: usize, key: KeyCode) -> bool {
    let last = len.saturating_sub(1);
    match key {
        KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1).min(last),
        KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => *cursor = 0,
        KeyCode::Char('G') | KeyCode::End => *cursor = last,
        _ => return false,
    }
    true
}

fn handle_inquiries_tab(app: &mut App, key: KeyEvent) {
    let len = app.store.inquiries().len();
    if move_cursor(&mut app.inquiry_cursor, len, key.code) {
        return;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Enter => app.complete_selected_inquiry(),
        KeyCode::Char('d') | KeyCode::Char('x') => app.delete_selected_inquiry(),
        _ => {}
    }
}

fn handle_posts_tab(app: &mut App, key: KeyEvent) {
    let len = app.store.posts().len();
    if move_cursor(&mut app.post_cursor, len, key.code) {
        return;
    }
    match key.code {
        KeyCode::Char('n') => app.open_new_post(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_selected_post(),
        KeyCode::Char('d') => app.request_delete_post(),
        _ => {}
    }
}

fn handle_settings_tab(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        app.save_settings();
        return;
    }
    let len = app.settings_form.fields.len();
    if move_cursor(&mut app.settings_form.focus, len, key.code) {
        return;
    }
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => app.begin_settings_edit(),
        KeyCode::Char('s') => app.save_settings(),
        KeyCode::Char('r') => app.reset_settings_draft(),
        _ => {}
    }
}
