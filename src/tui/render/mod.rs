pub mod help_overlay;
mod helpers;
pub mod inquiries_view;
pub mod modal;
pub mod post_editor;
pub mod posts_view;
pub mod public_view;
pub mod settings_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{AdminTab, App, Mode, ViewMode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        ViewMode::Public => public_view::render_public_view(frame, app, chunks[1]),
        ViewMode::Admin => match app.admin_tab {
            AdminTab::Inquiries => inquiries_view::render_inquiries_view(frame, app, chunks[1]),
            AdminTab::Posts => posts_view::render_posts_view(frame, app, chunks[1]),
            AdminTab::Settings => settings_view::render_settings_view(frame, app, chunks[1]),
        },
    }

    if app.post_editor.is_some() {
        post_editor::render_post_editor(frame, app, area);
    }

    match app.mode {
        Mode::Confirm => modal::render_confirm(frame, app, area),
        Mode::Notice => modal::render_notice(frame, app, area),
        Mode::Help => help_overlay::render_help_overlay(frame, app, area),
        _ => {}
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Keep `cursor` inside a window of `height` rows starting at `scroll`
pub(super) fn follow_cursor(scroll: &mut usize, cursor_top: usize, cursor_bottom: usize, height: usize) {
    if height == 0 {
        return;
    }
    if cursor_top < *scroll {
        *scroll = cursor_top;
    } else if cursor_bottom >= *scroll + height {
        *scroll = (cursor_bottom + 1).saturating_sub(height).min(cursor_top);
    }
}
