//! Double-buffered screen grid with diff flushing.
//!
//! `current` is the frame being built, `previous` is what was last written to
//! the terminal. `flush` only emits the cells that differ between the two.

use anyhow::Result;

use crate::backend::Terminal;
use crate::types::{Cell, Color};

/// A width x height grid of cells plus the last flushed copy of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    background: Color,
    current: Vec<Cell>,
    previous: Vec<Cell>,
    previous_valid: bool,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Color::Black)
    }

    pub fn with_background(width: u16, height: u16, background: Color) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            background,
            current: vec![Cell::blank(background); len],
            previous: vec![Cell::blank(background); len],
            previous_valid: false,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the background used by `clear` and by `resize` fills.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Resize both grids, blank them, and force a full repaint on next flush.
    ///
    /// This preserves the underlying allocations when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        let blank = Cell::blank(self.background);
        self.current.clear();
        self.current.resize(len, blank);
        self.previous.clear();
        self.previous.resize(len, blank);
        self.previous_valid = false;
    }

    /// Force the next flush to be a full repaint.
    pub fn invalidate(&mut self) {
        self.previous_valid = false;
    }

    pub fn needs_full_repaint(&self) -> bool {
        !self.previous_valid
    }

    /// Cells of the frame under construction, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.current
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.current[i])
    }

    /// Write one cell. Out-of-bounds coordinates are silently clipped.
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        self.set_cell(x, y, Cell { ch, fg, bg });
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.current[i] = cell;
        }
    }

    /// Write a character on the buffer's own background.
    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        let bg = self.background;
        self.set(x, y, ch, fg, bg);
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width as i32 {
                break;
            }
            self.put_char(cx, y, ch, fg);
            cx += 1;
        }
    }

    /// Bresenham line between two points, clipped to the grid.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), ch: char, fg: Color) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_char(x0, y0, ch, fg);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Set every cell of `current` to a blank on `bg`.
    pub fn clear_to_background(&mut self, bg: Color) {
        self.current.fill(Cell::blank(bg));
    }

    /// Blank `current` on the buffer's own background.
    pub fn clear(&mut self) {
        self.clear_to_background(self.background);
    }

    /// Number of cells the next flush would write.
    pub fn pending_writes(&self) -> usize {
        if !self.previous_valid {
            return self.current.len();
        }
        self.current
            .iter()
            .zip(&self.previous)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Emit changed cells to `out`, then record `current` as flushed.
    ///
    /// Returns the number of cells written. After an invalidation (new buffer,
    /// resize) the terminal is cleared and every cell is written.
    pub fn flush<T: Terminal + ?Sized>(&mut self, out: &mut T) -> Result<usize> {
        let full = !self.previous_valid;
        if full {
            out.clear()?;
        }

        let prev = if full { None } else { Some(self.previous.as_slice()) };
        let next = self.current.as_slice();
        let width = self.width;
        let mut style: Option<(Color, Color)> = None;
        let mut written = 0usize;

        for_each_changed_run(width, self.height, prev, next, |x, y, len| {
            out.move_to(x, y)?;
            let row = (y as usize) * (width as usize);
            for dx in 0..len {
                let cell = next[row + (x + dx) as usize];
                if style != Some((cell.fg, cell.bg)) {
                    out.set_colors(cell.fg, cell.bg)?;
                    style = Some((cell.fg, cell.bg));
                }
                out.put_char(cell.ch)?;
                written += 1;
            }
            Ok(())
        })?;

        if style.is_some() {
            out.reset_colors()?;
        }
        out.flush()?;

        self.previous.copy_from_slice(&self.current);
        self.previous_valid = true;
        Ok(written)
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
///
/// With no previous frame every row is one full-width run.
fn for_each_changed_run(
    width: u16,
    height: u16,
    prev: Option<&[Cell]>,
    next: &[Cell],
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let Some(prev) = prev else {
        if width > 0 {
            for y in 0..height {
                f(0, y, width)?;
            }
        }
        return Ok(());
    };

    let w = width as usize;
    for y in 0..height {
        let row = (y as usize) * w;
        let mut x = 0usize;
        while x < w {
            if prev[row + x] == next[row + x] {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev[row + x] != next[row + x] {
                x += 1;
            }
            f(start as u16, y, (x - start) as u16)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_outside_bounds_is_clipped() {
        let mut buf = ScreenBuffer::new(4, 3);
        let before = buf.clone();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MIN, i32::MAX)] {
            buf.set(x, y, '#', Color::Red, Color::Blue);
        }
        assert_eq!(buf, before);
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = vec![Cell::default(); 5];
        let mut b = a.clone();

        // Change cells [1..=3] into X.
        for cell in &mut b[1..=3] {
            cell.ch = 'X';
        }

        let mut runs = Vec::new();
        for_each_changed_run(5, 1, Some(&a), &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn missing_previous_frame_yields_full_rows() {
        let b = vec![Cell::default(); 6];
        let mut runs = Vec::new();
        for_each_changed_run(3, 2, None, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(0, 0, 3), (0, 1, 3)]);
    }

    #[test]
    fn resize_blanks_and_invalidates() {
        let mut buf = ScreenBuffer::new(2, 2);
        buf.set(0, 0, 'A', Color::White, Color::Black);
        buf.resize(3, 1);
        assert_eq!(buf.cells().len(), 3);
        assert!(buf.needs_full_repaint());
        assert!(buf.cells().iter().all(|c| *c == Cell::blank(Color::Black)));
    }

    #[test]
    fn draw_line_hits_both_endpoints() {
        let mut buf = ScreenBuffer::new(10, 10);
        buf.draw_line((1, 1), (8, 4), '.', Color::White);
        assert_eq!(buf.get(1, 1).map(|c| c.ch), Some('.'));
        assert_eq!(buf.get(8, 4).map(|c| c.ch), Some('.'));
    }

    #[test]
    fn put_str_stops_at_right_edge() {
        let mut buf = ScreenBuffer::new(3, 1);
        buf.put_str(1, 0, "abc", Color::White);
        assert_eq!(buf.get(1, 0).map(|c| c.ch), Some('a'));
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('b'));
    }
}
