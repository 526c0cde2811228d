use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{AdminTab, App, ViewMode};

/// Render the tab bar: view tabs, admin sub-tabs, and a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(chunks[1].width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    frame.render_widget(sep, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg_style = Style::default().bg(app.theme.background);
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.primary).bg(app.theme.background),
        ),
        Span::styled(" ", bg_style),
    ];

    spans.push(Span::styled(" Public ", tab_style(app, app.view == ViewMode::Public)));
    spans.push(sep.clone());
    spans.push(Span::styled(" Admin ", tab_style(app, app.view == ViewMode::Admin)));
    spans.push(sep.clone());

    if app.view == ViewMode::Admin {
        spans.push(Span::styled("  ", bg_style));
        for (i, tab) in AdminTab::ALL.iter().enumerate() {
            let is_current = app.admin_tab == *tab;
            let style = tab_style(app, is_current);
            let tab_bg = if is_current {
                app.theme.selection_bg
            } else {
                app.theme.background
            };
            spans.push(Span::styled(format!(" {} {}", i + 1, tab.label()), style));
            if *tab == AdminTab::Inquiries && app.pending_count() > 0 {
                spans.push(Span::styled(
                    format!(" *{}", app.pending_count()),
                    Style::default().fg(app.theme.yellow).bg(tab_bg),
                ));
            }
            spans.push(Span::styled(" ", style));
            spans.push(sep.clone());
        }
    } else {
        spans.push(Span::styled(
            format!(" {}", app.store.config().site_name),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn tabs(app: &App) -> String {
        render_to_string(TERM_W, 2, |frame, area| render_tab_bar(frame, app, area))
    }

    #[test]
    fn public_tabs_show_site_name() {
        let app = test_app();
        let out = tabs(&app);
        let first = out.lines().next().unwrap_or_default();
        assert_eq!(first, " \u{25B6}  Public \u{2502} Admin \u{2502} FANTASTIC CLARK");
    }

    #[test]
    fn admin_tabs_carry_pending_badge() {
        let mut app = test_app();
        app.toggle_view();
        let out = tabs(&app);
        assert!(out.contains(" 1 Inquiries *1 \u{2502} 2 Posts \u{2502} 3 Settings \u{2502}"));

        app.complete_selected_inquiry();
        let out = tabs(&app);
        assert!(out.contains(" 1 Inquiries \u{2502}"));
    }
}
