use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::InquiryStatus;
use crate::tui::app::App;
use crate::tui::wrap;

use super::follow_cursor;
use super::helpers::pad_spans;

const MESSAGE_INDENT: &str = "              ";

/// Render the admin inquiry list, newest first
pub fn render_inquiries_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    if app.store.inquiries().is_empty() {
        let empty = Paragraph::new(" No inquiries yet")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let cursor = app.inquiry_cursor;
    let mut display_lines: Vec<Line> = Vec::new();
    let mut cursor_span = (0, 0);

    for (i, inquiry) in app.store.inquiries().iter().enumerate() {
        let is_cursor = i == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let top = display_lines.len();

        let mut spans: Vec<Span<'static>> = vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(
                format!("{:<10}", inquiry.status.to_string()),
                Style::default()
                    .fg(app.theme.status_color(inquiry.status))
                    .bg(row_bg),
            ),
            Span::styled(
                format!(" {}  ", inquiry.date),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
        ];
        let name_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        };
        spans.push(Span::styled(inquiry.name.clone(), name_style));
        spans.push(Span::styled(
            format!("  {}", inquiry.contact),
            Style::default().fg(app.theme.cyan).bg(row_bg),
        ));
        if is_cursor {
            pad_spans(&mut spans, width, Style::default().bg(row_bg));
        }
        display_lines.push(Line::from(spans));

        let message_style = if inquiry.status == InquiryStatus::Completed {
            Style::default().fg(app.theme.dim).bg(bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        if !inquiry.message.trim().is_empty() {
            let text_w = width.saturating_sub(MESSAGE_INDENT.len() + 1).max(1);
            for line in wrap::wrap_text(&inquiry.message, text_w) {
                display_lines.push(Line::from(vec![
                    Span::styled(MESSAGE_INDENT, Style::default().bg(bg)),
                    Span::styled(line, message_style),
                ]));
            }
        }
        if is_cursor {
            cursor_span = (top, display_lines.len() - 1);
        }
        display_lines.push(Line::from(""));
    }

    let height = area.height as usize;
    follow_cursor(&mut app.inquiry_scroll, cursor_span.0, cursor_span.1, height);

    let lines: Vec<Line> = display_lines
        .into_iter()
        .skip(app.inquiry_scroll)
        .take(height)
        .collect();
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn view(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| render_inquiries_view(frame, app, area))
    }

    #[test]
    fn lists_seed_inquiry() {
        let mut app = test_app();
        assert_eq!(
            view(&mut app, 6),
            " Pending    2024-05-21  홍길동  010-1234-5678\n              VIP 멤버십 가입 조건이 궁금합니다."
        );
    }

    #[test]
    fn empty_list_message() {
        let mut app = test_app();
        app.delete_selected_inquiry();
        assert_eq!(view(&mut app, 3), " No inquiries yet");
    }

    #[test]
    fn cursor_stays_visible() {
        let mut app = test_app();
        for n in 0..6 {
            app.store
                .submit_inquiry(&format!("guest{}", n), "010", "")
                .unwrap();
        }
        app.inquiry_cursor = 6;
        let out = view(&mut app, 4);
        assert!(app.inquiry_scroll > 0);
        assert!(out.contains("홍길동"));
    }
}
