mod common;
mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, EditTarget, Mode};

#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit(target) => handle_edit(app, target, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Notice => handle_notice(app, key),
        Mode::Help => handle_help(app, key),
    }
}

/// Handle a bracketed paste event. Only active in Edit mode; line breaks
/// in the pasted text become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    let Mode::Edit(target) = app.mode else {
        return;
    };
    if text.is_empty() {
        return;
    }
    let field = match target {
        EditTarget::InquiryForm => app.inquiry_form.focused_mut(),
        EditTarget::Settings => app.settings_form.focused_mut(),
        EditTarget::PostEditor => app
            .post_editor
            .as_mut()
            .and_then(|editor| editor.focused_text_mut()),
    };
    if let Some(field) = field {
        field.insert_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{AdminTab, ViewMode};
    use crate::tui::render::test_helpers::test_app;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn public_form_submission_by_keyboard() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, Mode::Edit(EditTarget::InquiryForm));

        type_str(&mut app, "김철수");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "@kim");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "hello");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Notice);
        assert_eq!(app.store.inquiries()[0].name, "김철수");
        assert_eq!(app.store.inquiries()[0].contact, "@kim");
        assert_eq!(app.store.inquiries()[0].message, "hello");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn ctrl_s_submits_from_any_field() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Lee");
        ctrl(&mut app, 's');
        // Contact missing: the notice returns to the form
        assert_eq!(app.mode, Mode::Notice);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Edit(EditTarget::InquiryForm));
        assert_eq!(app.inquiry_form.focus, 1);
        type_str(&mut app, "lee@example.com");
        ctrl(&mut app, 's');
        assert_eq!(app.store.inquiries().len(), 2);
    }

    #[test]
    fn escape_discards_draft() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('i'));
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.inquiry_form.value(0), "");
        assert_eq!(app.store.inquiries().len(), 1);
    }

    #[test]
    fn paste_goes_into_focused_field() {
        let mut app = test_app();
        handle_paste(&mut app, "ignored");
        press(&mut app, KeyCode::Char('i'));
        handle_paste(&mut app, "line one\nline two");
        assert_eq!(app.inquiry_form.value(0), "line one line two");
    }

    #[test]
    fn admin_tabs_switch_with_numbers_and_arrows() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, ViewMode::Admin);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.admin_tab, AdminTab::Posts);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.admin_tab, AdminTab::Settings);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.admin_tab, AdminTab::Inquiries);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.view, ViewMode::Public);
    }

    #[test]
    fn inquiry_keys_complete_and_delete() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.pending_count(), 0);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.store.inquiries().is_empty());
        // Nothing left to act on
        press(&mut app, KeyCode::Char('x'));
        assert!(app.store.inquiries().is_empty());
    }

    #[test]
    fn post_editor_by_keyboard() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Edit(EditTarget::PostEditor));

        type_str(&mut app, "Summer gala");
        press(&mut app, KeyCode::Tab);
        // Category: Event -> Notice -> Guide
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Join us");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        let post = &app.store.posts()[0];
        assert_eq!(post.title, "Summer gala");
        assert_eq!(post.content, "Join us");
        assert_eq!(post.category, crate::model::Category::Guide);
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn post_delete_needs_y() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.posts().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.posts().len(), 2);
    }

    #[test]
    fn settings_edit_and_save() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Edit(EditTarget::Settings));
        ctrl(&mut app, 'u');
        type_str(&mut app, "CLARK");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        // Draft only until saved
        assert_eq!(app.store.config().site_name, "FANTASTIC CLARK");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.store.config().site_name, "CLARK");
        assert_eq!(app.mode, Mode::Notice);
    }

    #[test]
    fn help_opens_and_closes() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn q_quits_only_outside_forms() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.inquiry_form.value(0), "q");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
