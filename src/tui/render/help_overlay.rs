use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{AdminTab, App, ViewMode};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.primary)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    match (app.view, app.admin_tab) {
        (ViewMode::Public, _) => {
            lines.push(Line::from(Span::styled(" Public page", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Scroll", key_style, desc_style);
            add_binding(&mut lines, " g/G", "Top / bottom", key_style, desc_style);
            add_binding(&mut lines, " i/Enter", "Fill in the inquiry form", key_style, desc_style);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" Inquiry form", header_style)));
            add_binding(&mut lines, " Tab/\u{2193}", "Next field", key_style, desc_style);
            add_binding(&mut lines, " Enter", "Next field / send on last", key_style, desc_style);
            add_binding(&mut lines, " Ctrl+S", "Send", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Discard draft", key_style, desc_style);
        }
        (ViewMode::Admin, AdminTab::Inquiries) => {
            lines.push(Line::from(Span::styled(" Inquiries", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " c/Enter", "Mark completed", key_style, desc_style);
            add_binding(&mut lines, " d/x", "Delete", key_style, desc_style);
        }
        (ViewMode::Admin, AdminTab::Posts) => {
            lines.push(Line::from(Span::styled(" Posts", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
            add_binding(&mut lines, " n", "New post", key_style, desc_style);
            add_binding(&mut lines, " e/Enter", "Edit post", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete (asks first)", key_style, desc_style);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" Post editor", header_style)));
            add_binding(&mut lines, " Tab", "Next field", key_style, desc_style);
            add_binding(&mut lines, " \u{2190}\u{2192}/Space", "Change category", key_style, desc_style);
            add_binding(&mut lines, " Ctrl+S", "Save", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Cancel", key_style, desc_style);
        }
        (ViewMode::Admin, AdminTab::Settings) => {
            lines.push(Line::from(Span::styled(" Settings", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Pick field", key_style, desc_style);
            add_binding(&mut lines, " e/Enter", "Edit field", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Revert field while editing", key_style, desc_style);
            add_binding(&mut lines, " s/Ctrl+S", "Save all settings", key_style, desc_style);
            add_binding(&mut lines, " r", "Reset draft", key_style, desc_style);
        }
    }
    lines.push(Line::from(""));

    if app.view == ViewMode::Admin {
        lines.push(Line::from(Span::styled(" Admin", header_style)));
        add_binding(&mut lines, " 1-3", "Switch tab", key_style, desc_style);
        add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Previous / next tab", key_style, desc_style);
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab/a", "Switch public / admin", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let inner_h = overlay_area.height.saturating_sub(2) as usize;
    app.help_scroll = app.help_scroll.min(lines.len().saturating_sub(inner_h));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.help_scroll as u16, 0))
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
