use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells taken by one grapheme. Tabs render as 4 cells.
fn cell_width(g: &str) -> usize {
    if g == "\t" { 4 } else { UnicodeWidthStr::width(g) }
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Display width in terminal cells. Hangul and other wide scripts count 2.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cell_width).sum()
}

/// Fit `s` into `max_cells`, ending with `…` when something was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = cell_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`; None at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..).filter(|r| !r.is_empty())?;
    let step = rest.graphemes(true).next().map_or(rest.len(), str::len);
    Some(byte_offset + step)
}

/// Byte offset of the grapheme before `byte_offset`; None at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s.get(..byte_offset)?
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// The grapheme cluster starting at `byte_offset` ("" past the end).
pub fn grapheme_at(s: &str, byte_offset: usize) -> &str {
    s.get(byte_offset..)
        .and_then(|rest| rest.graphemes(true).next())
        .unwrap_or("")
}

/// Byte offset of the grapheme covering display column `col`. A column in
/// the right half of a wide character maps to that character's start.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut used = 0;
    for (i, g) in s.grapheme_indices(true) {
        let w = cell_width(g);
        if used + w > col {
            return i;
        }
        used += w;
    }
    s.len()
}

/// Start of the word left of `byte_offset`, skipping blanks first.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let Some(prefix) = s.get(..byte_offset) else {
        return 0;
    };
    let gs: Vec<(usize, &str)> = prefix.grapheme_indices(true).collect();
    let mut idx = gs.len();
    while idx > 0 && is_blank(gs[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_blank(gs[idx - 1].1) {
        idx -= 1;
    }
    gs.get(idx).map_or(0, |(i, _)| *i)
}

/// Start of the next word right of `byte_offset`, or the end of `s`.
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let Some(suffix) = s.get(byte_offset..) else {
        return s.len();
    };
    let mut in_word = true;
    for (i, g) in suffix.grapheme_indices(true) {
        let blank = is_blank(g);
        if !in_word && !blank {
            return byte_offset + i;
        }
        if blank {
            in_word = false;
        }
    }
    s.len()
}
