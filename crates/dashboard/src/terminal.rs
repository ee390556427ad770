use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen. A panic restores the terminal first.
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let terminal = undo_on_err(enter_alternate_screen(), || {
        let _ = restore();
    })?;

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous_hook(info);
    }));

    Ok(terminal)
}

/// Run `undo` when a setup step after raw mode fails.
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn enter_alternate_screen() -> io::Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave raw mode and the alternate screen. Both steps run even if one fails.
pub fn restore() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen)?;
    raw
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_failed_setup_undoes_raw_mode() {
        let undone = Cell::new(false);
        let result: io::Result<()> =
            undo_on_err(Err(io::Error::other("no tty")), || undone.set(true));
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_keeps_raw_mode() {
        let undone = Cell::new(false);
        let result = undo_on_err(Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
