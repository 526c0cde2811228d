use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ConfigField;
use crate::tui::app::{App, EditTarget, Mode};
use crate::tui::theme::parse_hex_color;

use super::helpers::{field_value_spans, pad_spans};

const LABEL_W: usize = 18;

/// Render the settings draft, one row per site config field
pub fn render_settings_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;
    let editing = app.mode == Mode::Edit(EditTarget::Settings);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, (field, kind)) in app
        .settings_form
        .fields
        .iter()
        .zip(ConfigField::ALL)
        .enumerate()
    {
        let is_cursor = app.settings_form.focus == i;
        let row_bg = if is_cursor { theme.selection_bg } else { bg };
        let mut spans: Vec<Span<'static>> = vec![Span::styled(
            format!("  {:<w$}", field.label, w = LABEL_W),
            Style::default()
                .fg(if is_cursor { theme.text_bright } else { theme.dim })
                .bg(row_bg),
        )];

        let is_color = matches!(kind, ConfigField::PrimaryColor | ConfigField::SecondaryColor);
        let swatch_w = if is_color { 3 } else { 0 };
        if let Some(color) = parse_hex_color(&field.value).filter(|_| is_color) {
            spans.push(Span::styled("\u{2588}\u{2588}", Style::default().fg(color).bg(row_bg)));
            spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        } else if is_color {
            spans.push(Span::styled("?? ", Style::default().fg(theme.red).bg(row_bg)));
        }

        let value_w = width.saturating_sub(2 + LABEL_W + swatch_w + 1);
        spans.extend(field_value_spans(
            field,
            editing && is_cursor,
            value_w,
            Style::default().fg(theme.text_bright).bg(row_bg),
        ));
        if is_cursor {
            pad_spans(&mut spans, width, Style::default().bg(row_bg));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if app.settings_form.to_config() != *app.store.config() {
        lines.push(Line::from(vec![
            Span::styled("  \u{25CF} ", Style::default().fg(theme.yellow).bg(bg)),
            Span::styled(
                "Unsaved changes. s saves, r resets.",
                Style::default().fg(theme.text).bg(bg),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
