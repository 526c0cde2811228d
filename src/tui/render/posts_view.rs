use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::wrap;
use crate::util::unicode;

use super::follow_cursor;
use super::helpers::pad_spans;

const BODY_INDENT: &str = "                     ";
/// Content preview lines per post
const PREVIEW_LINES: usize = 2;

/// Render the admin post list in feed order
pub fn render_posts_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    if app.store.posts().is_empty() {
        let empty = Paragraph::new(" No posts yet. Press n to write one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let text_w = width.saturating_sub(BODY_INDENT.len() + 1).max(1);
    let cursor = app.post_cursor;
    let mut display_lines: Vec<Line> = Vec::new();
    let mut cursor_span = (0, 0);

    for (i, post) in app.store.posts().iter().enumerate() {
        let is_cursor = i == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let top = display_lines.len();

        let title_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        };
        let mut spans: Vec<Span<'static>> = vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(
                format!("{:<8}", post.category.to_string().to_uppercase()),
                Style::default()
                    .fg(app.theme.category_color(post.category))
                    .bg(row_bg),
            ),
            Span::styled(
                format!("{}  ", post.date),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ),
            Span::styled(
                unicode::truncate_to_width(&post.title, text_w),
                title_style,
            ),
        ];
        if is_cursor {
            pad_spans(&mut spans, width, Style::default().bg(row_bg));
        }
        display_lines.push(Line::from(spans));

        let body_style = Style::default().fg(app.theme.text).bg(bg);
        let mut preview = wrap::wrap_text(&post.content, text_w);
        if preview.len() > PREVIEW_LINES {
            preview.truncate(PREVIEW_LINES);
            if let Some(last) = preview.last_mut() {
                *last = unicode::truncate_to_width(&format!("{} \u{2026}", last), text_w);
            }
        }
        for line in preview {
            display_lines.push(Line::from(vec![
                Span::styled(BODY_INDENT, Style::default().bg(bg)),
                Span::styled(line, body_style),
            ]));
        }
        if let Some(url) = &post.image_url {
            display_lines.push(Line::from(vec![
                Span::styled(BODY_INDENT, Style::default().bg(bg)),
                Span::styled(
                    unicode::truncate_to_width(url, text_w),
                    Style::default().fg(app.theme.dim).bg(bg),
                ),
            ]));
        }
        if is_cursor {
            cursor_span = (top, display_lines.len() - 1);
        }
        display_lines.push(Line::from(""));
    }

    let height = area.height as usize;
    follow_cursor(&mut app.post_scroll, cursor_span.0, cursor_span.1, height);

    let lines: Vec<Line> = display_lines
        .into_iter()
        .skip(app.post_scroll)
        .take(height)
        .collect();
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
