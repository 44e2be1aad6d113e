//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::{Context as _, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;
use tracing::info;

use crate::config::Settings;
use crate::storage::Store;

use super::controller::Controller;
use super::event::TerminalEvents;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

/// Internal implementation of terminal restoration
fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive interface until the user quits
pub fn run_tui(store: Store, settings: Settings) -> Result<()> {
    let tick_rate = Duration::from_millis(settings.tick_rate_ms);
    let terminal = init_terminal(settings.mouse_enabled)?;
    info!(path = %store.path().display(), "Starting TUI");

    let mut events = TerminalEvents::new(tick_rate);
    let mut controller = Controller::new(terminal, store, settings);
    let outcome = controller.run(&mut events);

    // Restore before reporting so the error lands on the normal screen
    restore_terminal()?;
    outcome.context("TUI stopped unexpectedly")?;

    info!("TUI closed");
    Ok(())
}
