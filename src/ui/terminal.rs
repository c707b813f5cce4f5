use std::io::Write;

use crossterm::{
    cursor::Show,
    event::PopKeyboardEnhancementFlags,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use log::warn;

/// Puts the terminal back on drop, panics included. Every step is attempted
/// even if an earlier one fails.
pub struct TerminalGuard<W: Write> {
    out: W,
    keyboard_flags: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Take this right after raw mode is enabled.
    pub fn new(out: W) -> Self {
        Self {
            out,
            keyboard_flags: false,
        }
    }

    /// Keyboard enhancement flags were pushed and must be popped.
    pub fn keyboard_flags_pushed(&mut self) {
        self.keyboard_flags = true;
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_flags {
            if let Err(e) = execute!(self.out, PopKeyboardEnhancementFlags) {
                warn!("Could not pop keyboard flags: {}", e);
            }
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Could not disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, Show) {
            warn!("Could not leave the alternate screen: {}", e);
        }
    }
}
