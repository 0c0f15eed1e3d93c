//! In-memory terminal model.
//!
//! `VirtualTerminal` applies the same command stream a real terminal would
//! receive to a plain cell grid, and counts what it was asked to do. It backs
//! headless runs and lets tests compare what is "on screen" with a buffer.

use anyhow::{bail, Result};

use crate::backend::Terminal;
use crate::types::{Cell, Color};

/// Counters for commands received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalStats {
    pub chars_written: usize,
    pub moves: usize,
    pub color_changes: usize,
    pub color_resets: usize,
    pub clears: usize,
    pub flushes: usize,
    pub enters: usize,
    pub leaves: usize,
}

#[derive(Debug, Clone)]
pub struct VirtualTerminal {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    fg: Color,
    bg: Color,
    cursor_visible: bool,
    entered: bool,
    fail_enter: bool,
    fail_flush: bool,
    stats: TerminalStats,
}

impl VirtualTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            cursor: (0, 0),
            fg: Color::Gray,
            bg: Color::Black,
            cursor_visible: true,
            entered: false,
            fail_enter: false,
            fail_flush: false,
            stats: TerminalStats::default(),
        }
    }

    /// Simulate the user resizing the window. Screen contents are lost.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize((width as usize) * (height as usize), Cell::default());
        self.cursor = (0, 0);
    }

    /// Make `enter` switch into animation mode and then report failure, as a
    /// tty that accepts raw mode but rejects the alternate screen would.
    pub fn fail_enters(&mut self, fail: bool) {
        self.fail_enter = fail;
    }

    /// Make every subsequent `flush` fail, as a vanished tty would.
    pub fn fail_flushes(&mut self, fail: bool) {
        self.fail_flush = fail;
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[(y as usize) * (self.width as usize) + (x as usize)])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Characters of one row, for readable assertions.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .map(|c| c.ch)
            .collect()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn current_colors(&self) -> (Color, Color) {
        (self.fg, self.bg)
    }

    pub fn stats(&self) -> TerminalStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TerminalStats::default();
    }
}

impl Terminal for VirtualTerminal {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        self.cursor_visible = false;
        self.stats.enters += 1;
        if self.fail_enter {
            bail!("virtual terminal: alternate screen unavailable");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        self.cursor_visible = true;
        self.fg = Color::Gray;
        self.bg = Color::Black;
        self.stats.leaves += 1;
        Ok(())
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.cursor = (x, y);
        self.stats.moves += 1;
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        self.fg = fg;
        self.bg = bg;
        self.stats.color_changes += 1;
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> Result<()> {
        let (x, y) = self.cursor;
        if x < self.width && y < self.height {
            let i = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[i] = Cell::new(ch, self.fg, self.bg);
        }
        // Line wrap is disabled while animating: the cursor sticks at the edge.
        self.cursor.0 = x.saturating_add(1).min(self.width);
        self.stats.chars_written += 1;
        Ok(())
    }

    fn reset_colors(&mut self) -> Result<()> {
        self.fg = Color::Gray;
        self.bg = Color::Black;
        self.stats.color_resets += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.fill(Cell::blank(self.bg));
        self.stats.clears += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_flush {
            bail!("virtual terminal: output closed");
        }
        self.stats.flushes += 1;
        Ok(())
    }
}
