use blackjack_rs::storage::JsonFileStore;
use blackjack_rs::tui::logger::TuiLogger;
use blackjack_rs::tui::{app::AppState, controller};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "blackjack-rs TUI requires a real terminal (TTY).\nRun in Terminal and press q on the menu to quit. Version: {}",
            blackjack_rs::VERSION
        );
        return Ok(());
    }
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);

    let store = JsonFileStore::new(JsonFileStore::default_path());
    let mut app = AppState::with_store(Box::new(store));
    match TuiLogger::install(log::Level::Info) {
        Ok(buffer) => app.set_log_buffer(buffer),
        Err(err) => eprintln!("logger already installed: {err}"),
    }
    log::info!("blackjack-rs {} started", blackjack_rs::VERSION);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
