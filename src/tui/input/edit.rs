use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, EditTarget};
use crate::tui::form::PostField;

use super::*;

pub(super) fn handle_edit(app: &mut App, target: EditTarget, key: KeyEvent) {
    match target {
        EditTarget::InquiryForm => handle_inquiry_form(app, key),
        EditTarget::PostEditor => handle_post_editor(app, key),
        EditTarget::Settings => handle_settings_field(app, key),
    }
}

fn handle_inquiry_form(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        app.submit_inquiry_form();
        return;
    }
    match key.code {
        KeyCode::Esc => app.cancel_inquiry_edit(),
        KeyCode::Enter => {
            if app.inquiry_form.is_last() {
                app.submit_inquiry_form();
            } else {
                app.inquiry_form.focus_next();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.inquiry_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.inquiry_form.focus_prev(),
        _ => {
            if let Some(field) = app.inquiry_form.focused_mut() {
                edit_text_field(field, key);
            }
        }
    }
}

fn handle_post_editor(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        app.save_post_editor();
        return;
    }
    let Some(editor) = &mut app.post_editor else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.cancel_post_editor(),
        KeyCode::Enter => {
            if editor.focus == PostField::Content {
                app.save_post_editor();
            } else {
                editor.focus = editor.focus.next();
            }
        }
        KeyCode::Tab | KeyCode::Down => editor.focus = editor.focus.next(),
        KeyCode::BackTab | KeyCode::Up => editor.focus = editor.focus.prev(),
        KeyCode::Right | KeyCode::Char(' ') if editor.focus == PostField::Category => {
            editor.category = editor.category.next();
        }
        KeyCode::Left if editor.focus == PostField::Category => {
            editor.category = editor.category.prev();
        }
        _ => {
            if let Some(field) = editor.focused_text_mut() {
                edit_text_field(field, key);
            }
        }
    }
}

fn handle_settings_field(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_settings_edit(),
        KeyCode::Esc => app.cancel_settings_edit(),
        _ if is_ctrl(&key, 's') => {
            app.commit_settings_edit();
            app.save_settings();
        }
        _ => {
            if let Some(field) = app.settings_form.focused_mut() {
                edit_text_field(field, key);
            }
        }
    }
}
