use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::kv::{KeyValueStore, MemoryStore};
use crate::model::Settings;
use crate::ops::ids::{FixedClock, SequentialIds};
use crate::store::Store;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            // Wide characters occupy two cells; the second is a blank placeholder
            let mut s = String::new();
            let mut skip = 0;
            for cell in row {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let sym = cell.symbol();
                skip = crate::util::unicode::display_width(sym).saturating_sub(1);
                s.push_str(sym);
            }
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the default test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// Seeded records over an in-memory store with deterministic ids and dates
pub fn test_store() -> Store {
    test_store_over(MemoryStore::new())
}

/// Like [`test_store`] over a prepared in-memory store
pub fn test_store_over(kv: MemoryStore) -> Store {
    let kv: Box<dyn KeyValueStore> = Box::new(kv);
    let (store, _issues) = Store::open(
        kv,
        Box::new(SequentialIds::new("n")),
        Box::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())),
    );
    store
}

pub fn test_app() -> App {
    App::new(test_store(), Settings::default())
}
