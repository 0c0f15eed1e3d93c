//! The terminal capability boundary.
//!
//! This is everything the engine needs from the host terminal. Any platform
//! binding implementing it can host the effects.

use anyhow::Result;

use crate::types::Color;

pub trait Terminal {
    /// Acquire the terminal for animation (raw mode, alternate screen, hidden cursor).
    fn enter(&mut self) -> Result<()>;

    /// Release everything `enter` acquired.
    fn leave(&mut self) -> Result<()>;

    /// Current size in columns and rows.
    fn size(&mut self) -> Result<(u16, u16)>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    fn move_to(&mut self, x: u16, y: u16) -> Result<()>;

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()>;

    /// Write one character at the cursor and advance it.
    fn put_char(&mut self, ch: char) -> Result<()>;

    fn reset_colors(&mut self) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// Push any queued output to the device.
    fn flush(&mut self) -> Result<()>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn enter(&mut self) -> Result<()> {
        (**self).enter()
    }

    fn leave(&mut self) -> Result<()> {
        (**self).leave()
    }

    fn size(&mut self) -> Result<(u16, u16)> {
        (**self).size()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        (**self).set_cursor_visible(visible)
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        (**self).move_to(x, y)
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> Result<()> {
        (**self).set_colors(fg, bg)
    }

    fn put_char(&mut self, ch: char) -> Result<()> {
        (**self).put_char(ch)
    }

    fn reset_colors(&mut self) -> Result<()> {
        (**self).reset_colors()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
