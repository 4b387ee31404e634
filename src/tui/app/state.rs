use crate::agents::{self, Action, AgentTable, BotAgent, BotProfile, HumanAgent, PlayerAgent};
use crate::money::Money;
use crate::player::{Player, PlayerKind, Seat};
use crate::settings::GameSettings;
use crate::storage::{MemoryStore, Store};
use crate::strategy::Move;
use crate::table::{Phase, Table};
use crate::tui::logger::{self, LogBuffer};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    ToggleLog,
    HistoryUp,
    HistoryDown,
    /// Deal from Betting, or clear the table after Settlement.
    Continue,
    Hit,
    Stand,
    Double,
    Split,
    Insurance,
    EvenMoney,
    DeclineInsurance,
    Hint,
    BetOpen,
    BetDigit(u8),
    BetDot,
    BetBackspace,
    BetIncMin,
    BetDecMin,
    BetSubmit,
    BetCancel,
}

#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub table: Table,
    pub agents: AgentTable,
    pub human_seat: Seat,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg: GameSettings,
    pub cfg_ai_players: usize,
    pub cfg_bot_delay_ms: u64,
    pub ai_players: usize,
    pub bot_delay_ms: u64,
    store: Box<dyn Store>,
    log_buffer: LogBuffer,
    menu_error: Option<String>,
    help_open: bool,
    history_open: bool,
    log_open: bool,
    history_offset: usize,
    bet_entry: Option<String>,
    bet_entry_error: Option<String>,
    last_bet: Option<Money>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
    hint: Option<Move>,
    notice: Option<String>,
    deal_requested: bool,
    next_auto_at: Option<Instant>,
    saved_round: u64,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("scene", &self.scene)
            .field("phase", &self.table.phase())
            .field("round", &self.table.round())
            .field("agents", &self.agents)
            .field("human_seat", &self.human_seat)
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    pub const LOG_PAGE_SIZE: usize = 30;
    pub const DEFAULT_AI_PLAYERS: usize = 3;
    pub const DEFAULT_BOT_DELAY_MS: u64 = 500;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Start on the menu with settings and bankroll loaded from `store`.
    pub fn with_store(store: Box<dyn Store>) -> Self {
        let settings = store.load_settings();
        let mut app = Self {
            scene: Scene::Menu,
            started: Instant::now(),
            table: Table::with_default_settings(),
            agents: AgentTable::default(),
            human_seat: Seat::FIRST_BASE,
            menu_index: 0,
            cfg: settings.clone(),
            cfg_ai_players: Self::DEFAULT_AI_PLAYERS,
            cfg_bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            ai_players: Self::DEFAULT_AI_PLAYERS,
            bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            store,
            log_buffer: Arc::new(Mutex::new(Vec::new())),
            menu_error: None,
            help_open: false,
            history_open: false,
            log_open: false,
            history_offset: 0,
            bet_entry: None,
            bet_entry_error: None,
            last_bet: None,
            action_error: None,
            action_error_at: None,
            hint: None,
            notice: None,
            deal_requested: false,
            next_auto_at: None,
            saved_round: 0,
        };
        app.start_table(settings);
        app
    }

    /// Render log records from `buffer` in the log overlay.
    pub fn set_log_buffer(&mut self, buffer: LogBuffer) {
        self.log_buffer = buffer;
    }

    pub fn log_lines(&self, n: usize) -> Vec<String> {
        logger::tail(&self.log_buffer, n)
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn Store {
        self.store.as_mut()
    }

    /// Replace the table with a fresh one: the human at first base with the
    /// saved bankroll, then `ai_players` bots at the following seats.
    pub(crate) fn start_table(&mut self, settings: GameSettings) {
        self.table = Table::new(settings).unwrap_or_else(|err| {
            log::warn!("invalid settings ({err}); using defaults");
            Table::with_default_settings()
        });
        let settings = self.table.settings().clone();
        let mut bankroll = self.store.load_bankroll(settings.starting_bankroll);
        if bankroll < settings.table_min {
            log::info!("bankroll {bankroll} is below the table minimum; restarting with {}", settings.starting_bankroll);
            bankroll = settings.starting_bankroll;
        }
        self.agents = AgentTable::default();
        self.agents.set_min_action_delay_ms(self.bot_delay_ms.min(150));
        for (i, seat) in Seat::all().take(1 + self.ai_players).enumerate() {
            let (player, agent): (Player, Box<dyn PlayerAgent>) = if i == 0 {
                self.human_seat = seat;
                (Player::new("You", seat, PlayerKind::Human, bankroll), Box::new(HumanAgent::new()))
            } else {
                let profile = BotProfile::default().with_delay_ms(self.bot_delay_ms);
                (
                    Player::new(format!("AI {seat}"), seat, PlayerKind::Ai, settings.starting_bankroll),
                    Box::new(BotAgent::new(profile)),
                )
            };
            if let Err(err) = self.table.seat_player(player) {
                log::warn!("cannot seat player at {seat}: {err}");
                continue;
            }
            self.agents.set_agent(seat, Some(agent));
        }
        self.saved_round = 0;
        self.deal_requested = false;
        self.next_auto_at = None;
        self.notice = None;
        self.hint = None;
        self.last_bet = None;
        self.history_offset = 0;
        self.clear_action_error();
    }

    pub fn human(&self) -> Option<&Player> {
        self.table.player(self.human_seat)
    }

    fn human_can(&self, action: Action) -> bool {
        self.scene == Scene::Table
            && self.table.phase() == action.phase()
            && self.table.is_decision_due(self.human_seat)
    }

    fn queue_action(&mut self, action: Action) -> bool {
        if !self.human_can(action) {
            return false;
        }
        self.clear_action_error();
        self.hint = None;
        self.agents.receive(self.human_seat, action)
    }

    pub fn bet_entry_active(&self) -> bool {
        self.bet_entry.is_some()
    }

    pub fn bet_entry_text(&self) -> Option<&str> {
        self.bet_entry.as_deref()
    }

    pub fn bet_entry_error(&self) -> Option<&str> {
        self.bet_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn menu_error(&self) -> Option<&str> {
        self.menu_error.as_deref()
    }

    pub(crate) fn set_menu_error(&mut self, err: Option<String>) {
        self.menu_error = err;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn hint(&self) -> Option<Move> {
        self.hint
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn log_open(&self) -> bool {
        self.log_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_overlays(&mut self) {
        self.help_open = false;
        self.history_open = false;
        self.log_open = false;
    }

    fn open_bet_entry(&mut self) -> bool {
        if !self.human_can(Action::Bet(Money::ZERO)) {
            return false;
        }
        let start = self.last_bet.unwrap_or(self.table.settings().table_min);
        self.bet_entry = Some(start.to_string().trim_start_matches('$').to_string());
        self.bet_entry_error = None;
        true
    }

    fn bet_entry_backspace(&mut self) {
        if let Some(buf) = self.bet_entry.as_mut() {
            buf.pop();
        }
        self.bet_entry_error = None;
    }

    fn bet_entry_push(&mut self, c: char) {
        if let Some(buf) = self.bet_entry.as_mut() {
            if buf.len() >= 9 || (c == '.' && buf.contains('.')) {
                return;
            }
            buf.push(c);
        }
        self.bet_entry_error = None;
    }

    fn bet_entry_adjust(&mut self, up: bool) {
        let step = self.table.settings().table_min;
        if let Some(buf) = self.bet_entry.as_mut() {
            let cur = buf.parse::<Money>().unwrap_or(Money::ZERO);
            let next = if up { cur + step } else { cur.saturating_sub(step) };
            *buf = next.to_string().trim_start_matches('$').to_string();
        }
        self.bet_entry_error = None;
    }

    fn bet_entry_submit(&mut self) -> bool {
        let Some(buf) = self.bet_entry.as_ref() else {
            return false;
        };
        let amount = match buf.parse::<Money>() {
            Ok(v) => v,
            Err(_) => {
                self.bet_entry_error = Some("Invalid amount".to_string());
                return false;
            }
        };
        let settings = self.table.settings();
        if !settings.bet_in_limits(amount) {
            self.bet_entry_error =
                Some(format!("Bet must be {} to {}", settings.table_min, settings.table_max));
            return false;
        }
        let bankroll = self.human().map(Player::bankroll).unwrap_or(Money::ZERO);
        if amount > bankroll {
            self.bet_entry_error = Some(format!("Bankroll is only {bankroll}"));
            return false;
        }
        if self.queue_action(Action::Bet(amount)) {
            self.last_bet = Some(amount);
            self.bet_entry = None;
            self.bet_entry_error = None;
            return true;
        }
        self.bet_entry_error = Some("Betting is closed".to_string());
        false
    }

    fn bet_entry_cancel(&mut self) {
        self.bet_entry = None;
        self.bet_entry_error = None;
    }

    fn show_hint(&mut self) -> bool {
        if !self.human_can(Action::Hit) {
            return false;
        }
        self.hint = agents::strategy_move(&self.table);
        self.hint.is_some()
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    let open = !self.help_open;
                    self.close_overlays();
                    self.help_open = open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    let open = !self.history_open;
                    self.close_overlays();
                    self.history_offset = 0;
                    self.history_open = open;
                }
                false
            }
            InputAction::ToggleLog => {
                let open = !self.log_open;
                self.close_overlays();
                self.log_open = open;
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.table.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::Continue => {
                if self.scene == Scene::Table {
                    self.continue_round()
                } else {
                    false
                }
            }
            InputAction::Hit => self.queue_action(Action::Hit),
            InputAction::Stand => self.queue_action(Action::Stand),
            InputAction::Double => self.queue_action(Action::Double),
            InputAction::Split => self.queue_action(Action::Split),
            InputAction::Insurance => self.queue_action(Action::Insurance),
            InputAction::EvenMoney => self.queue_action(Action::EvenMoney),
            InputAction::DeclineInsurance => self.queue_action(Action::DeclineInsurance),
            InputAction::Hint => self.show_hint(),
            InputAction::BetOpen => self.open_bet_entry(),
            InputAction::BetDigit(d) => {
                self.bet_entry_push(char::from(b'0' + d.min(9)));
                false
            }
            InputAction::BetDot => {
                self.bet_entry_push('.');
                false
            }
            InputAction::BetBackspace => {
                self.bet_entry_backspace();
                false
            }
            InputAction::BetIncMin => {
                self.bet_entry_adjust(true);
                false
            }
            InputAction::BetDecMin => {
                self.bet_entry_adjust(false);
                false
            }
            InputAction::BetSubmit => self.bet_entry_submit(),
            InputAction::BetCancel => {
                self.bet_entry_cancel();
                false
            }
        }
    }

    /// Space: request the deal while betting, or clear a settled round.
    pub fn continue_round(&mut self) -> bool {
        match self.table.phase() {
            Phase::Betting => {
                if self.human().is_some_and(|p| p.is_active() && !p.has_bet()) {
                    self.set_action_error("Place a bet first (b)".to_string());
                    return false;
                }
                self.deal_requested = true;
                true
            }
            Phase::Settlement => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self) {
        match self.table.advance_phase() {
            Ok(phase) => {
                self.hint = None;
                if phase == Phase::Settlement {
                    self.on_settlement();
                }
                if phase == Phase::Betting || phase == Phase::Shuffling {
                    self.history_offset = 0;
                }
            }
            Err(err) => {
                self.deal_requested = false;
                self.set_action_error(err.to_string());
            }
        }
    }

    fn on_settlement(&mut self) {
        if self.saved_round == self.table.round() {
            return;
        }
        self.saved_round = self.table.round();
        let Some(human) = self.table.player(self.human_seat) else {
            return;
        };
        let (bankroll, active) = (human.bankroll(), human.is_active());
        if let Err(err) = self.store.save_bankroll(bankroll) {
            log::warn!("could not save bankroll: {err}");
        }
        if !active {
            self.notice = Some(format!(
                "Bankroll {bankroll} is below the table minimum. Press M for the menu to start over."
            ));
        }
    }

    /// Phases the table moves through on its own once no seat owes a decision.
    fn auto_advance(&mut self) {
        let phase = self.table.phase();
        let ready = match phase {
            Phase::Betting => {
                self.deal_requested
                    && self.table.pending_seats().iter().all(|&s| s == self.human_seat)
            }
            Phase::Dealing | Phase::DealerAction | Phase::Shuffling => true,
            Phase::InsuranceOffer => self.table.pending_seats().is_empty(),
            Phase::PlayerActions => self.table.current_turn().is_none(),
            _ => false,
        };
        if !ready {
            return;
        }
        let now = Instant::now();
        if let Some(at) = self.next_auto_at {
            if now < at {
                return;
            }
        }
        if phase == Phase::Betting {
            self.deal_requested = false;
        }
        self.advance();
        self.next_auto_at = Some(now + Duration::from_millis(self.bot_delay_ms));
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.table) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }

    /// One controller tick: let agents act, then move the round along.
    pub fn tick(&mut self) {
        self.agents_on_turn();
        if self.scene == Scene::Table {
            self.auto_advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_app() -> AppState {
        let mut app = AppState::default();
        app.cfg_bot_delay_ms = 0;
        app.cfg_ai_players = 1;
        app.apply_menu();
        app
    }

    #[test]
    fn action_ignored_outside_turn() {
        let mut app = quick_app();
        assert_eq!(app.table.phase(), Phase::Betting);
        assert!(!app.handle_input(InputAction::Hit));
        assert!(!app.handle_input(InputAction::Insurance));
    }

    #[test]
    fn space_requires_a_bet() {
        let mut app = quick_app();
        assert!(!app.handle_input(InputAction::Continue));
        assert!(app.action_error().is_some());
    }

    #[test]
    fn bet_entry_rejects_out_of_limits() {
        let mut app = quick_app();
        assert!(app.handle_input(InputAction::BetOpen));
        assert_eq!(app.bet_entry_text(), Some("5"));
        for _ in 0..3 {
            app.handle_input(InputAction::BetDigit(0));
        }
        // $5000 is over the $500 maximum
        assert!(!app.handle_input(InputAction::BetSubmit));
        assert!(app.bet_entry_error().is_some());
        app.handle_input(InputAction::BetBackspace);
        app.handle_input(InputAction::BetBackspace);
        assert!(app.handle_input(InputAction::BetSubmit));
        app.agents_on_turn();
        assert_eq!(app.human().unwrap().total_bet(), Money::from_dollars(50));
    }
}
