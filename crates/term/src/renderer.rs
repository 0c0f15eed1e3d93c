//! CrosstermTerminal: the real-terminal implementation of [`Terminal`].
//!
//! Commands are queued into an in-memory byte buffer and written to the
//! underlying writer in one go on `flush`, so a frame reaches the device as a
//! single write.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::backend::Terminal;
use crate::types::{Color, FALLBACK_HEIGHT, FALLBACK_WIDTH};

pub struct CrosstermTerminal<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    /// Whether this instance owns the process tty (raw mode, size queries).
    owns_tty: bool,
    fixed_size: (u16, u16),
    raw: bool,
}

impl CrosstermTerminal<io::Stdout> {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            owns_tty: true,
            fixed_size: (FALLBACK_WIDTH, FALLBACK_HEIGHT),
            raw: false,
        }
    }
}

impl Default for CrosstermTerminal<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> CrosstermTerminal<W> {
    /// Encode into an arbitrary writer with a fixed reported size.
    ///
    /// Raw mode is never touched in this mode.
    pub fn with_writer(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            owns_tty: false,
            fixed_size: (width, height),
            raw: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn enter(&mut self) -> Result<()> {
        if self.owns_tty && !self.raw {
            terminal::enable_raw_mode()?;
            self.raw = true;
        }
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    fn leave(&mut self) -> Result<()> {
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        if self.owns_tty {
            // Non-interactive output has no size; animate at the fallback.
            Ok(terminal::size().unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT)))
        } else {
            Ok(self.fixed_size)
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.buf.queue(cursor::Show)?;
        } else {
            self.buf.queue(cursor::Hide)?;
        }
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.buf.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        self.buf.queue(SetForegroundColor(to_term_color(fg)))?;
        self.buf.queue(SetBackgroundColor(to_term_color(bg)))?;
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> Result<()> {
        self.buf.queue(Print(ch))?;
        Ok(())
    }

    fn reset_colors(&mut self) -> Result<()> {
        self.buf.queue(ResetColor)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.buf.clear();
        Ok(())
    }
}

fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::DarkBlue => TermColor::DarkBlue,
        Color::DarkGreen => TermColor::DarkGreen,
        Color::DarkCyan => TermColor::DarkCyan,
        Color::DarkRed => TermColor::DarkRed,
        Color::DarkMagenta => TermColor::DarkMagenta,
        Color::DarkYellow => TermColor::DarkYellow,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::Blue => TermColor::Blue,
        Color::Green => TermColor::Green,
        Color::Cyan => TermColor::Cyan,
        Color::Red => TermColor::Red,
        Color::Magenta => TermColor::Magenta,
        Color::Yellow => TermColor::Yellow,
        Color::White => TermColor::White,
    }
}
