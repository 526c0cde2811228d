use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::form::TextField;

pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '`' => Some('~'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '/' => Some('?'),
        _ => None,
    }
}

pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            // Shift+p → Char('P') with SHIFT preserved
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            // Shift+. → Char('>') with SHIFT removed
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Apply a line-editing key to a text field. Returns false for keys the
/// field does not consume (navigation between fields, submit, cancel).
pub(super) fn edit_text_field(field: &mut TextField, key: KeyEvent) -> bool {
    let word = key.modifiers.contains(KeyModifiers::ALT);
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => field.home(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => field.end(),
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => field.delete_to_start(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => field.delete_word_back(),
        (m, KeyCode::Char(c))
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            field.insert_char(c)
        }
        (_, KeyCode::Backspace) if word => field.delete_word_back(),
        (_, KeyCode::Backspace) => field.backspace(),
        (_, KeyCode::Delete) => field.delete_forward(),
        (_, KeyCode::Left) if word => field.move_word_left(),
        (_, KeyCode::Left) => field.move_left(),
        (_, KeyCode::Right) if word => field.move_word_right(),
        (_, KeyCode::Right) => field.move_right(),
        (_, KeyCode::Home) => field.home(),
        (_, KeyCode::End) => field.end(),
        _ => return false,
    }
    true
}

pub(super) fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}
