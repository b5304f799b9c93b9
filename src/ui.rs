use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, layout::Category, theme};

const TITLE: &str = concat!("WORDED v", env!("CARGO_PKG_VERSION"));
const PAUSED: &str = " Paused ";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let paused = session.is_paused();

        // header
        let header_style = theme::header(paused);
        put(buf, area, area.x, area.y, &" ".repeat(area.width.into()), header_style);
        put_centered(buf, area, area.y, TITLE, header_style);

        // word grid
        let grid = App::grid_area(area);
        let layout = self.layout(area);
        for (offset, row) in (self.scroll()..layout.rows)
            .take(usize::from(grid.height))
            .enumerate()
        {
            let y = grid.y + offset as u16;
            for placed in layout.row(row).filter(|c| c.col < usize::from(grid.width)) {
                let x = grid.x + placed.col as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(placed.cell.glyph)
                        .set_style(theme::style(placed.cell.category));
                }
            }
        }

        let Some(bottom) = area.bottom().checked_sub(1) else {
            return;
        };

        if paused && area.height >= 3 {
            put_centered(buf, area, bottom - 2, PAUSED, theme::HEADER);
        }

        if area.height >= 2 {
            let mut info = String::new();
            if self.show_word {
                info.push_str(&format!("{} ", session.current_target()));
            }
            if self.show_fps {
                if let Some(fps) = self.fps() {
                    info.push_str(&format!("{fps:.2} FPS"));
                }
            }
            put(buf, area, area.x + 1, bottom - 1, &info, Style::default());
        }

        render_stats(self, area, bottom, buf);
    }
}

fn render_stats(app: &App, area: Rect, y: u16, buf: &mut Buffer) {
    let stats = app.session().stats();
    let badge = theme::HEADER.add_modifier(Modifier::REVERSED);

    let label = " WORDED ";
    let x = area.x + 1;
    put(buf, area, x, y, label, theme::HEADER);

    let summary = format!(
        " WPM: {:.1} ACC: {:.1}% {:.1}s ",
        stats.wpm(),
        stats.accuracy(),
        stats.active_time.as_secs_f64()
    );
    put(buf, area, x + label.width() as u16, y, &summary, badge);

    let c = stats.counters;
    let counters = [
        (Category::Correct, c.correct),
        (Category::Incorrect, c.incorrect),
        (Category::Missed, c.missed),
        (Category::Extra, c.extra),
    ]
    .map(|(category, n)| (format!(" {n:03} "), theme::counter(category)));

    let total = counters.iter().map(|(text, _)| text.width()).sum::<usize>() + counters.len() - 1;
    let mut cx = area.right().saturating_sub(total as u16);
    for (text, style) in &counters {
        put(buf, area, cx, y, text, *style);
        cx += text.width() as u16 + 1;
    }
}

/// Writes `text` at `(x, y)`, clipped to `area`.
fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.top() || y >= area.bottom() || x >= area.right() {
        return;
    }
    buf.set_stringn(x, y, text, usize::from(area.right() - x), style);
}

fn put_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let offset = area.width.saturating_sub(text.width() as u16) / 2;
    put(buf, area, area.x + offset, y, text, style);
}
