use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, NoticeKind};
use crate::tui::wrap;
use crate::util::unicode;

/// Draw a bordered box with centered body lines and a footer hint
fn render_box(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    border: ratatui::style::Color,
    body: &str,
    footer: &str,
) {
    let bg = app.theme.background;
    let max_inner = area.width.saturating_sub(6).max(10) as usize;
    let text_w = unicode::display_width(body)
        .max(unicode::display_width(footer))
        .min(max_inner)
        .max(20);
    let body_lines = wrap::wrap_text(body, text_w);

    let popup_w = (text_w + 4) as u16;
    let popup_h = (body_lines.len() + 4) as u16;
    let popup = super::helpers::centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = body_lines
        .into_iter()
        .map(|l| {
            Line::from(Span::styled(
                format!(" {}", l),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", footer),
        Style::default().fg(app.theme.dim).bg(bg),
    )));
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

/// Blocking notice; acknowledged with Enter
pub fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let border = match notice.kind {
        NoticeKind::Info => app.theme.primary,
        NoticeKind::Error => app.theme.red,
    };
    render_box(frame, app, area, border, &notice.message, "Enter OK");
}

/// y/n confirmation prompt
pub fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.confirm_state else {
        return;
    };
    render_box(frame, app, area, app.theme.red, &state.message, "y delete   n cancel");
}
