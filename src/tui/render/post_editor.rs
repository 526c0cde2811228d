use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Category;
use crate::tui::app::{App, EditTarget, Mode};
use crate::tui::form::{PostField, TextField};

use super::helpers::{centered_rect_fixed, field_value_spans, pad_spans};

const LABEL_W: usize = 11;

/// Render the post editor modal over the posts tab
pub fn render_post_editor(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.post_editor else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let editing = app.mode == Mode::Edit(EditTarget::PostEditor);

    let popup = centered_rect_fixed(area.width.saturating_sub(8).min(72), 8, area);
    frame.render_widget(Clear, popup);

    let title = if editor.is_new() { " New post " } else { " Edit post " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let width = inner.width as usize;
    let value_w = width.saturating_sub(2 + LABEL_W);
    let row = |slot: PostField, label: &str| -> (Color, Vec<Span<'static>>) {
        let focused = editing && editor.focus == slot;
        let row_bg = if focused { theme.selection_bg } else { bg };
        let marker = if focused { "\u{203A} " } else { "  " };
        let spans = vec![
            Span::styled(marker, Style::default().fg(theme.primary).bg(row_bg)),
            Span::styled(
                format!("{:<w$}", label, w = LABEL_W),
                Style::default()
                    .fg(if focused { theme.text_bright } else { theme.dim })
                    .bg(row_bg),
            ),
        ];
        (row_bg, spans)
    };
    let text_row = |slot: PostField, field: &TextField| -> Line<'static> {
        let label = format!("{}{}", field.label, if field.required { "*" } else { "" });
        let (row_bg, mut spans) = row(slot, &label);
        let focused = editing && editor.focus == slot;
        spans.extend(field_value_spans(
            field,
            focused,
            value_w,
            Style::default().fg(theme.text_bright).bg(row_bg),
        ));
        if focused {
            pad_spans(&mut spans, width, Style::default().bg(row_bg));
        }
        Line::from(spans)
    };

    let mut lines: Vec<Line> = vec![text_row(PostField::Title, &editor.title)];

    let (row_bg, mut spans) = row(PostField::Category, "Category*");
    for category in Category::ALL {
        let selected = category == editor.category;
        let style = if selected {
            Style::default()
                .fg(theme.category_color(category))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" {} ", category), style.bg(row_bg)));
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
    }
    if editing && editor.focus == PostField::Category {
        pad_spans(&mut spans, width, Style::default().bg(row_bg));
    }
    lines.push(Line::from(spans));

    lines.push(text_row(PostField::ImageUrl, &editor.image_url));
    lines.push(text_row(PostField::Content, &editor.content));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Ctrl+S save   Esc cancel",
        Style::default().fg(theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
