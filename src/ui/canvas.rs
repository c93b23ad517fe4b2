/// Canvas: a 2D grid of styled cells, the unit every layer is composed into.
///
/// All writes are clipped. Coordinates are signed so callers can position
/// text partly off-screen (negative x skips leading characters) without
/// pre-clamping. Wide glyphs (most emoji) occupy two columns: the right
/// half is a continuation cell that the terminal flush skips.

use crossterm::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bold: bool,
    pub wide: bool,    // occupies 2 terminal columns
    pub cont: bool,    // right half of a wide glyph (skip on flush)
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bold: false, wide: false, cont: false };

    const WIDE_CONT: Cell = Cell { ch: ' ', fg: Color::White, bold: false, wide: false, cont: true };

    /// Sentinel that differs from every real cell; forces a full repaint.
    pub const INVALID: Cell = Cell { ch: '\u{0}', fg: Color::Magenta, bold: true, wide: false, cont: false };
}

/// Terminal columns taken by `c`. Emoji in the supplementary planes and a
/// few BMP symbols render double-width.
pub fn char_width(c: char) -> i32 {
    match c {
        '⚡' | '✅' | '⭐' => 2,
        c if c as u32 >= 0x1F000 => 2,
        _ => 1,
    }
}

pub fn text_width(s: &str) -> i32 {
    s.chars().map(char_width).sum()
}

/// First `max` characters of `s`.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

pub struct Canvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Canvas { width: w, height: h, cells: vec![Cell::BLANK; (w * h) as usize] }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        let (w, h) = (width.max(0), height.max(0));
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; (w * h) as usize];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or(Cell::BLANK)
    }

    /// Glyph at `(x, y)`; a space when out of range.
    #[cfg(test)]
    pub fn char_at(&self, x: i32, y: i32) -> char {
        self.get(x, y).ch
    }

    /// Row `y` as text, continuation cells omitted.
    #[cfg(test)]
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .map(|x| self.get(x, y))
            .filter(|c| !c.cont)
            .map(|c| c.ch)
            .collect()
    }

    /// Put one glyph. A wide glyph that would straddle the right edge is dropped.
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Color, bold: bool) {
        if char_width(ch) == 2 {
            if self.index(x, y).is_none() || self.index(x + 1, y).is_none() {
                return;
            }
            self.set(x, y, Cell { ch, fg, bold, wide: true, cont: false });
            self.set(x + 1, y, Cell::WIDE_CONT);
        } else {
            self.set(x, y, Cell { ch, fg, bold, wide: false, cont: false });
        }
    }

    /// Write `s` starting at `(x, y)`. Returns the column after the last glyph.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color, bold: bool) -> i32 {
        let mut cx = x;
        if y < 0 || y >= self.height {
            return cx + text_width(s);
        }
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.put_char(cx, y, ch, fg, bold);
            cx += char_width(ch);
        }
        cx
    }

    /// Write `s` centred on row `y`.
    pub fn put_centered(&mut self, y: i32, s: &str, fg: Color, bold: bool) {
        let x = (self.width - text_width(s)) / 2;
        self.put_str(x.max(0), y, s, fg, bold);
    }

    /// Blank a rectangle.
    pub fn clear_rect(&mut self, left: i32, top: i32, w: i32, h: i32) {
        for y in top..top + h {
            for x in left..left + w {
                self.set(x, y, Cell::BLANK);
            }
        }
    }

    /// Single-line box with an optional `[ title ]` on the top edge.
    /// Boxes smaller than 4×3 are not drawn.
    pub fn draw_box(&mut self, left: i32, top: i32, w: i32, h: i32, title: Option<&str>, fg: Color) {
        if w < 4 || h < 3 {
            return;
        }
        let right = left + w - 1;
        let bottom = top + h - 1;
        self.clear_rect(left, top, w, h);

        for x in left + 1..right {
            self.put_char(x, top, '─', fg, false);
            self.put_char(x, bottom, '─', fg, false);
        }
        for y in top + 1..bottom {
            self.put_char(left, y, '│', fg, false);
            self.put_char(right, y, '│', fg, false);
        }
        self.put_char(left, top, '┌', fg, false);
        self.put_char(right, top, '┐', fg, false);
        self.put_char(left, bottom, '└', fg, false);
        self.put_char(right, bottom, '┘', fg, false);

        if let Some(title) = title {
            let label = format!("[ {title} ]");
            let room = (w - 4).max(0) as usize;
            self.put_str(left + 2, top, &truncate(&label, room), fg, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_clipped() {
        let mut c = Canvas::new(10, 3);
        c.put_str(8, 1, "abcdef", Color::White, false);
        assert_eq!(c.row_text(1), "        ab");
        c.put_str(-2, 0, "xyz", Color::White, false);
        assert_eq!(c.char_at(0, 0), 'z');
        c.put_str(0, 5, "nothing", Color::White, false);
        c.set(-1, -1, Cell::BLANK);
        assert_eq!(c.char_at(99, 99), ' ');
    }

    #[test]
    fn wide_glyph_takes_two_columns() {
        let mut c = Canvas::new(6, 1);
        let end = c.put_str(0, 0, "⚡x", Color::Yellow, false);
        assert_eq!(end, 3);
        assert!(c.get(0, 0).wide);
        assert!(c.get(1, 0).cont);
        assert_eq!(c.char_at(2, 0), 'x');
        assert_eq!(c.row_text(0), "⚡x   ");
    }

    #[test]
    fn wide_glyph_at_edge_is_dropped() {
        let mut c = Canvas::new(3, 1);
        c.put_char(2, 0, '🚀', Color::White, false);
        assert_eq!(c.row_text(0), "   ");
    }

    #[test]
    fn draw_box_with_title() {
        let mut c = Canvas::new(20, 5);
        c.draw_box(1, 1, 12, 4, Some("AI"), Color::Cyan);
        assert_eq!(c.char_at(1, 1), '┌');
        assert_eq!(c.char_at(12, 1), '┐');
        assert_eq!(c.char_at(1, 4), '└');
        assert_eq!(c.char_at(12, 4), '┘');
        assert_eq!(c.char_at(1, 2), '│');
        assert!(c.row_text(1).contains("[ AI ]"));
        assert_eq!(c.char_at(3, 1), '[');
    }

    #[test]
    fn tiny_box_is_skipped() {
        let mut c = Canvas::new(10, 10);
        c.draw_box(0, 0, 3, 5, None, Color::White);
        c.draw_box(0, 0, 5, 2, None, Color::White);
        assert_eq!(c.char_at(0, 0), ' ');
    }

    #[test]
    fn centered_text() {
        let mut c = Canvas::new(11, 1);
        c.put_centered(0, "abc", Color::White, true);
        assert_eq!(c.row_text(0), "    abc    ");
        assert!(c.get(4, 0).bold);
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Sys-Alfa-12345", 12), "Sys-Alfa-123");
        assert_eq!(truncate("ab", 12), "ab");
    }
}
