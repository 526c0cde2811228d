use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{AdminTab, App, EditTarget, Mode, ViewMode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(message) = &app.status_message {
        let fg = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.text
        };
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(fg).bg(bg),
        ));
    }

    let show_hint = app.settings.ui.show_key_hints || !matches!(app.mode, Mode::Navigate);
    if show_hint {
        let hint = key_hint(app);
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hint(app: &App) -> &'static str {
    match app.mode {
        Mode::Edit(EditTarget::InquiryForm) => "Enter next/send  Ctrl+S send  Esc discard ",
        Mode::Edit(EditTarget::PostEditor) => "Tab field  \u{2190}\u{2192} category  Ctrl+S save  Esc cancel ",
        Mode::Edit(EditTarget::Settings) => "Enter keep  Esc revert ",
        Mode::Confirm => "y confirm  n cancel ",
        Mode::Notice => "Enter ok ",
        Mode::Help => "? close ",
        Mode::Navigate => match (app.view, app.admin_tab) {
            (ViewMode::Public, _) => "i inquire  jk scroll  Tab admin  ? help ",
            (ViewMode::Admin, AdminTab::Inquiries) => "c complete  d delete  Tab public  ? help ",
            (ViewMode::Admin, AdminTab::Posts) => "n new  e edit  d delete  Tab public  ? help ",
            (ViewMode::Admin, AdminTab::Settings) => "e edit  s save  r reset  Tab public  ? help ",
        },
    }
}
