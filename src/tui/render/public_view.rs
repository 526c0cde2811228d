use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, EditTarget, Mode};
use crate::tui::wrap;

use super::helpers::{field_value_spans, pad_spans};

const STATS: [(&str, &str); 3] = [
    ("99.9%", "Reliability & security"),
    ("24/7", "Live consultation"),
    ("10+", "Global partners"),
];

const LABEL_W: usize = 11;

/// Render the public page with the lead-capture form pinned below it
pub fn render_public_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // page
            Constraint::Length(4), // form: title border + 3 fields
        ])
        .split(area);

    let lines = page_lines(app, chunks[0].width as usize);
    let height = chunks[0].height as usize;
    app.public_scroll = app.public_scroll.min(lines.len().saturating_sub(height));

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.public_scroll)
        .take(height)
        .collect();
    let page = Paragraph::new(visible).style(Style::default().bg(app.theme.background));
    frame.render_widget(page, chunks[0]);

    render_inquiry_form(frame, app, chunks[1]);
}

fn page_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let config = app.store.config();
    let bg = theme.background;
    let text_w = width.saturating_sub(4).max(1);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let wrapped = |text: &str, style: Style, indent: &'static str| -> Vec<Line<'static>> {
        wrap::wrap_text(text, text_w)
            .into_iter()
            .map(|l| Line::from(vec![Span::styled(indent, Style::default().bg(bg)), Span::styled(l, style)]))
            .collect()
    };

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(
            config.site_name.clone(),
            Style::default()
                .fg(theme.primary)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.extend(wrapped(
        &config.slogan,
        Style::default().fg(theme.text_bright).bg(bg),
        "  ",
    ));
    lines.push(Line::from(""));
    lines.extend(wrapped(
        &config.hero_description,
        Style::default().fg(theme.text).bg(bg),
        "  ",
    ));
    lines.push(Line::from(""));

    for (value, label) in STATS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<7}", value),
                Style::default()
                    .fg(theme.secondary)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(label, Style::default().fg(theme.dim).bg(bg)),
        ]));
    }
    lines.push(Line::from(""));

    for (label, link) in [
        ("Telegram", &config.telegram_link),
        ("KakaoTalk", &config.kakao_link),
    ] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<11}", label),
                Style::default().fg(theme.text).bg(bg),
            ),
            Span::styled(
                link.clone(),
                Style::default()
                    .fg(theme.cyan)
                    .bg(bg)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("  Latest ", Style::default().fg(theme.text_bright).bg(bg).add_modifier(Modifier::BOLD)),
        Span::styled("Promotions", Style::default().fg(theme.primary).bg(bg).add_modifier(Modifier::BOLD)),
    ]));

    let posts = app.store.posts();
    if posts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No posts yet",
            Style::default().fg(theme.dim).bg(bg),
        )));
    }
    for post in posts {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(
                post.category.to_string().to_uppercase(),
                Style::default().fg(theme.category_color(post.category)).bg(bg),
            ),
            Span::styled(format!("  {}", post.date), Style::default().fg(theme.dim).bg(bg)),
        ]));
        lines.extend(wrapped(
            &post.title,
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            "  ",
        ));
        lines.extend(wrapped(
            &post.content,
            Style::default().fg(theme.text).bg(bg),
            "  ",
        ));
    }
    lines.push(Line::from(""));
    lines
}

fn render_inquiry_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let editing = app.mode == Mode::Edit(EditTarget::InquiryForm);
    let width = area.width as usize;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(if editing { theme.primary } else { theme.dim }).bg(bg))
        .title(Span::styled(
            " Request a consultation ",
            Style::default().fg(theme.text_bright).bg(bg),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in app.inquiry_form.fields.iter().enumerate() {
        let focused = editing && app.inquiry_form.focus == i;
        let row_bg = if focused { theme.selection_bg } else { bg };
        let marker = if focused { "\u{203A} " } else { "  " };
        let label = format!("{}{}", field.label, if field.required { "*" } else { "" });
        let mut spans: Vec<Span<'static>> = vec![
            Span::styled(marker, Style::default().fg(theme.primary).bg(row_bg)),
            Span::styled(
                format!("{:<w$}", label, w = LABEL_W),
                Style::default().fg(if focused { theme.text_bright } else { theme.dim }).bg(row_bg),
            ),
        ];
        let value_w = width.saturating_sub(2 + LABEL_W + 1);
        spans.extend(field_value_spans(
            field,
            focused,
            value_w,
            Style::default().fg(theme.text_bright).bg(row_bg),
        ));
        if focused {
            pad_spans(&mut spans, width, Style::default().bg(row_bg));
        }
        lines.push(Line::from(spans));
    }
    if !editing && app.inquiry_form.fields.iter().all(|f| f.value.is_empty()) {
        lines[0] = Line::from(vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(
                "Press i to leave your name and contact; an agent will reach out.",
                Style::default().fg(theme.dim).bg(bg),
            ),
        ]);
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
