use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Route one key press. Returns `true` when the app should quit.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('?') => {
            let _ = app.handle_input(InputAction::ToggleHelp);
            return false;
        }
        KeyCode::Char('y') | KeyCode::Char('Y') if !app.bet_entry_active() => {
            let _ = app.handle_input(InputAction::ToggleHistory);
            return false;
        }
        KeyCode::Char('l') | KeyCode::Char('L') if !app.bet_entry_active() => {
            let _ = app.handle_input(InputAction::ToggleLog);
            return false;
        }
        _ => {}
    }
    if app.help_open() || app.log_open() {
        if matches!(code, KeyCode::Esc) {
            app.close_overlays();
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.bet_entry_active() {
        match code {
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::BetCancel);
            }
            KeyCode::Enter => {
                if app.handle_input(InputAction::BetSubmit) {
                    app.agents_on_turn();
                }
            }
            KeyCode::Backspace => {
                let _ = app.handle_input(InputAction::BetBackspace);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::BetIncMin);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::BetDecMin);
            }
            KeyCode::Char('.') => {
                let _ = app.handle_input(InputAction::BetDot);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let _ = app.handle_input(InputAction::BetDigit(c as u8 - b'0'));
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext);
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::MenuInc);
            }
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::MenuDec);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Table => {
            let action = match code {
                KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
                KeyCode::Char(' ') => Some(InputAction::Continue),
                KeyCode::Char('b') | KeyCode::Char('B') => Some(InputAction::BetOpen),
                KeyCode::Char('h') | KeyCode::Char('H') => Some(InputAction::Hit),
                KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::Stand),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::Double),
                KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::Split),
                KeyCode::Char('i') | KeyCode::Char('I') => Some(InputAction::Insurance),
                KeyCode::Char('e') | KeyCode::Char('E') => Some(InputAction::EvenMoney),
                KeyCode::Char('n') | KeyCode::Char('N') => Some(InputAction::DeclineInsurance),
                KeyCode::Char('t') | KeyCode::Char('T') => Some(InputAction::Hint),
                _ => None,
            };
            if let Some(action) = action {
                // run the queued intent right away instead of waiting a tick
                if app.handle_input(action) && action != InputAction::Hint {
                    app.agents_on_turn();
                }
            }
        }
    }
    false
}
