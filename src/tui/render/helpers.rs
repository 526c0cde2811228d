use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::tui::form::TextField;
use crate::util::unicode;

/// Total display width of a span list in terminal cells
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| unicode::display_width(&s.content)).sum()
}

/// Pad a span list with spaces up to `width` cells
pub(super) fn pad_spans(spans: &mut Vec<Span<'static>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Spans showing a field's value in `width` cells.
///
/// While editing, the grapheme under the cursor is drawn reversed and the
/// value scrolls horizontally so the cursor stays visible.
pub(super) fn field_value_spans(
    field: &TextField,
    editing: bool,
    width: usize,
    style: Style,
) -> Vec<Span<'static>> {
    let value = field.value.as_str();
    if !editing {
        return vec![Span::styled(unicode::truncate_to_width(value, width), style)];
    }
    if width == 0 {
        return Vec::new();
    }

    let cursor = field.cursor.min(value.len());
    let cursor_col = unicode::display_width(&value[..cursor]);
    let start_col = (cursor_col + 1).saturating_sub(width);
    let mut start = unicode::display_col_to_byte_offset(value, start_col);
    if unicode::display_width(&value[..start]) < start_col {
        start = unicode::next_grapheme_boundary(value, start).unwrap_or(value.len());
    }
    let start = start.min(cursor);

    let before = &value[start..cursor];
    let at = unicode::grapheme_at(value, cursor);
    let after = &value[cursor + at.len()..];
    let at_shown = if at.is_empty() { " " } else { at };

    let used = unicode::display_width(before) + unicode::display_width(at_shown);
    let mut spans = vec![
        Span::styled(before.to_string(), style),
        Span::styled(at_shown.to_string(), style.add_modifier(Modifier::REVERSED)),
    ];
    if used < width {
        spans.push(Span::styled(
            unicode::truncate_to_width(after, width - used),
            style,
        ));
    }
    spans
}

/// A rect of fixed size centered in `area`, shrunk to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
