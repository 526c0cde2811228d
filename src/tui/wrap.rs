use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// A visual (screen) line: byte range into the logical line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub byte_start: usize,
    pub byte_end: usize,
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Wrap a single logical line to `width` cells.
///
/// Breaks at whitespace (which is dropped at the break); a token wider than
/// the whole line is split between graphemes.
pub fn wrap_line(line: &str, width: usize) -> Vec<VisualLine> {
    if width == 0 || unicode::display_width(line) <= width {
        return vec![VisualLine {
            byte_start: 0,
            byte_end: line.len(),
        }];
    }

    let gs: Vec<(usize, &str)> = line.grapheme_indices(true).collect();
    let byte_at = |idx: usize| gs.get(idx).map_or(line.len(), |(b, _)| *b);

    let mut result = Vec::new();
    let mut start = 0usize; // grapheme index of current visual line
    let mut col = 0usize;
    let mut i = 0usize;

    while i < gs.len() {
        let token_start = i;
        let ws = is_space(gs[i].1);
        while i < gs.len() && is_space(gs[i].1) == ws {
            i += 1;
        }
        let token_w: usize = gs[token_start..i]
            .iter()
            .map(|(_, g)| unicode::display_width(g))
            .sum();

        if col + token_w <= width {
            col += token_w;
            continue;
        }

        if ws {
            // Break here and swallow the whitespace
            result.push(VisualLine {
                byte_start: byte_at(start),
                byte_end: byte_at(token_start),
            });
            start = i;
            col = 0;
            continue;
        }

        if col > 0 {
            let mut end = token_start;
            while end > start && is_space(gs[end - 1].1) {
                end -= 1;
            }
            result.push(VisualLine {
                byte_start: byte_at(start),
                byte_end: byte_at(end),
            });
            start = token_start;
            col = 0;
        }

        if token_w <= width {
            col = token_w;
            continue;
        }

        // Token wider than a full line: split between graphemes
        let mut placed = 0;
        for j in token_start..i {
            let gw = unicode::display_width(gs[j].1);
            if placed + gw > width && placed > 0 {
                result.push(VisualLine {
                    byte_start: byte_at(start),
                    byte_end: byte_at(j),
                });
                start = j;
                placed = 0;
            }
            placed += gw;
        }
        col = placed;
    }

    if start < gs.len() || result.is_empty() {
        result.push(VisualLine {
            byte_start: byte_at(start),
            byte_end: line.len(),
        });
    }
    result
}

/// Wrap multi-line text, returning owned screen lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        for vl in wrap_line(line, width) {
            out.push(line[vl.byte_start..vl.byte_end].to_string());
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
