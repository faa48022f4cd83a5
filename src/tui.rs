//! # Text-based user interface (TUI)
//!
//! Terminal plumbing for the text-based user interface (TUI): entering the
//! alternate screen and raw mode before the application runs, and leaving them
//! afterward, even if the application panics.

use std::{io::{self, stdout, Stdout}, panic, sync::{Arc, Mutex}, thread};

use crossterm::{
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The text-based user interface (TUI) type.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Apply `f` to a freshly initialized terminal, then restore the terminal. A
/// panic on the calling thread also restores the terminal before the original
/// panic hook reports it; panics on other threads are left to the original
/// hook alone.
///
/// # Arguments
///
/// * `f` - The function to apply to the TUI.
///
/// # Returns
///
/// The result of applying `f` to the TUI.
///
/// # Errors
///
/// Any error that occurs while initializing, driving, or restoring the TUI.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	// The panic hook is process-wide, so the original is shared with the
	// replacement and handed back afterward.
	let original_hook = Arc::new(Mutex::new(Some(panic::take_hook())));
	let hook_for_panics = Arc::clone(&original_hook);
	let ui_thread = thread::current().id();
	panic::set_hook(Box::new(move |info| {
		if thread::current().id() == ui_thread
		{
			// Already panicking, so a failed restore cannot be helped.
			let _ = tui_restore();
		}
		if let Ok(hook) = hook_for_panics.lock()
		{
			// The original hook may run more than once, so leave it in place.
			if let Some(hook) = hook.as_ref()
			{
				hook(info);
			}
		}
	}));
	// Initialization can fail halfway, so always restore.
	let result = tui_init().and_then(|mut terminal| f(&mut terminal));
	if let Some(hook) = original_hook.lock().ok().and_then(|mut h| h.take())
	{
		panic::set_hook(hook);
	}
	tui_restore()?;
	result
}

/// Initialize the text-based user interface (TUI).
///
/// # Returns
///
/// The initialized TUI.
///
/// # Errors
///
/// Any error that occurs while initializing the TUI.
fn tui_init() -> io::Result<Tui>
{
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	enable_raw_mode()?;
	Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore the terminal to its original state, including the cursor.
///
/// # Errors
///
/// Any error that occurs while restoring the terminal.
fn tui_restore() -> io::Result<()>
{
	let mut stdout = stdout();
	execute!(stdout, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	CrosstermBackend::new(stdout).show_cursor()
}
