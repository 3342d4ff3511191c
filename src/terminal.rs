#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::panic;

use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::error;

/// Puts the terminal back into its normal state when dropped.
///
/// Created before raw mode is enabled, so an error or a panic anywhere after
/// that point still leaves a usable shell behind.
pub struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    #[must_use]
    pub fn new(restore: fn() -> io::Result<()>) -> Self {
        Self { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            error!("Failed to restore terminal: {err}");
        }
    }
}

/// Enables raw mode, the alternate screen and focus reporting.
///
/// # Errors
///
/// Returns the first crossterm failure.
pub fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableFocusChange)
}

/// Undoes [`enter_terminal`]. Safe to call more than once.
///
/// # Errors
///
/// Returns the first crossterm failure.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableFocusChange,
        crossterm::cursor::Show
    )
}

/// Restores the terminal before the panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        error!("Panic: {info}");
        default_hook(info);
    }));
}
