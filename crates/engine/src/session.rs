//! Scoped ownership of the terminal for one run.
//!
//! Entering the session switches the terminal into animation mode; the
//! matching restore runs exactly once, either through [`TerminalSession::close`]
//! or, on early return and unwinding panics, from `Drop`.

use anyhow::Result;
use tracing::debug;

use crate::term::Terminal;

pub struct TerminalSession<'a, T: Terminal + ?Sized> {
    term: &'a mut T,
    active: bool,
}

impl<'a, T: Terminal + ?Sized> TerminalSession<'a, T> {
    /// A failed `enter` is rolled back before the error is returned, since
    /// it may have switched on raw mode or the alternate screen already.
    pub fn begin(term: &'a mut T) -> Result<Self> {
        if let Err(err) = term.enter() {
            if let Err(undo) = restore(&mut *term) {
                debug!(error = %undo, "rollback after failed enter also failed");
            }
            return Err(err);
        }
        let mut session = Self { term, active: true };
        session.term.set_cursor_visible(false)?;
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut T {
        &mut *self.term
    }

    /// Restore the terminal and report the first failure, if any.
    pub fn close(mut self) -> Result<()> {
        self.active = false;
        restore(&mut *self.term)
    }
}

impl<T: Terminal + ?Sized> Drop for TerminalSession<'_, T> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(err) = restore(&mut *self.term) {
                debug!(error = %err, "terminal restore failed");
            }
        }
    }
}

/// Every step is attempted even when an earlier one fails.
fn restore<T: Terminal + ?Sized>(term: &mut T) -> Result<()> {
    let results = [
        term.reset_colors(),
        term.clear(),
        term.set_cursor_visible(true),
        term.flush(),
        term.leave(),
    ];
    results.into_iter().collect::<Result<Vec<()>>>().map(|_| ())
}
