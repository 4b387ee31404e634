use crate::money::Money;
use crate::player::Seat;
use crate::settings::{MAX_SPLITS_LIMIT, SUPPORTED_DECK_COUNTS};

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    TableMin,
    TableMax,
    StartingBankroll,
    Decks,
    HitSoft17,
    DoubleAfterSplit,
    MaxSplits,
    AiPlayers,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 9] = [
    MenuItem::TableMin,
    MenuItem::TableMax,
    MenuItem::StartingBankroll,
    MenuItem::Decks,
    MenuItem::HitSoft17,
    MenuItem::DoubleAfterSplit,
    MenuItem::MaxSplits,
    MenuItem::AiPlayers,
    MenuItem::BotDelayMs,
];

const MIN_STEP: Money = Money::from_dollars(5);
const MAX_STEP: Money = Money::from_dollars(50);
const BANKROLL_STEP: Money = Money::from_dollars(100);

fn on_off(v: bool) -> &'static str {
    if v {
        "On"
    } else {
        "Off"
    }
}

/// Next (or previous) supported deck count, wrapping around.
fn cycle_decks(current: u8, forward: bool) -> u8 {
    let n = SUPPORTED_DECK_COUNTS.len();
    let pos = SUPPORTED_DECK_COUNTS.iter().position(|&d| d == current).unwrap_or(0);
    let next = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
    SUPPORTED_DECK_COUNTS[next]
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        let cfg = &app.cfg;
        match self {
            MenuItem::TableMin => format!("Table Minimum: {}", cfg.table_min),
            MenuItem::TableMax => format!("Table Maximum: {}", cfg.table_max),
            MenuItem::StartingBankroll => format!("Starting Bankroll: {}", cfg.starting_bankroll),
            MenuItem::Decks => format!("Decks: {}", cfg.number_of_decks),
            MenuItem::HitSoft17 => {
                format!("Dealer Hits Soft 17: {}", on_off(cfg.dealer_hits_soft_17))
            }
            MenuItem::DoubleAfterSplit => {
                format!("Double After Split: {}", on_off(cfg.double_after_split))
            }
            MenuItem::MaxSplits => format!("Max Splits: {}", cfg.max_splits),
            MenuItem::AiPlayers => format!("AI Players: {}", app.cfg_ai_players),
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        let cfg = &mut app.cfg;
        match self {
            MenuItem::TableMin => {
                cfg.table_min = cfg.table_min + MIN_STEP;
                if cfg.table_max <= cfg.table_min {
                    cfg.table_max = cfg.table_min + MAX_STEP;
                }
            }
            MenuItem::TableMax => cfg.table_max = cfg.table_max + MAX_STEP,
            MenuItem::StartingBankroll => {
                cfg.starting_bankroll = cfg.starting_bankroll + BANKROLL_STEP;
            }
            MenuItem::Decks => cfg.number_of_decks = cycle_decks(cfg.number_of_decks, true),
            MenuItem::HitSoft17 => cfg.dealer_hits_soft_17 = !cfg.dealer_hits_soft_17,
            MenuItem::DoubleAfterSplit => cfg.double_after_split = !cfg.double_after_split,
            MenuItem::MaxSplits => {
                if cfg.max_splits < MAX_SPLITS_LIMIT {
                    cfg.max_splits += 1;
                }
            }
            MenuItem::AiPlayers => {
                if app.cfg_ai_players < Seat::COUNT - 1 {
                    app.cfg_ai_players += 1;
                }
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        let cfg = &mut app.cfg;
        match self {
            MenuItem::TableMin => {
                let next = cfg.table_min.saturating_sub(MIN_STEP);
                if !next.is_zero() {
                    cfg.table_min = next;
                }
            }
            MenuItem::TableMax => {
                let next = cfg.table_max.saturating_sub(MAX_STEP);
                if next > cfg.table_min {
                    cfg.table_max = next;
                }
            }
            MenuItem::StartingBankroll => {
                let next = cfg.starting_bankroll.saturating_sub(BANKROLL_STEP);
                if next >= cfg.table_min {
                    cfg.starting_bankroll = next;
                }
            }
            MenuItem::Decks => cfg.number_of_decks = cycle_decks(cfg.number_of_decks, false),
            MenuItem::HitSoft17 => cfg.dealer_hits_soft_17 = !cfg.dealer_hits_soft_17,
            MenuItem::DoubleAfterSplit => cfg.double_after_split = !cfg.double_after_split,
            MenuItem::MaxSplits => {
                if cfg.max_splits > 1 {
                    cfg.max_splits -= 1;
                }
            }
            MenuItem::AiPlayers => {
                app.cfg_ai_players = app.cfg_ai_players.saturating_sub(1);
            }
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_overlays();
        match self.scene {
            Scene::Menu => self.cancel_menu(),
            _ => self.open_menu(),
        }
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_overlays();
        self.menu_index = 0;
        self.cfg = self.table.settings().clone();
        self.cfg_ai_players = self.ai_players;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.set_menu_error(None);
        self.scene = Scene::Menu;
    }

    /// Validate the draft settings; on success save them and seat a new table.
    pub fn apply_menu(&mut self) {
        if let Err(err) = self.cfg.validate() {
            self.set_menu_error(Some(err.to_string()));
            return;
        }
        self.set_menu_error(None);
        let settings = self.cfg.clone();
        if let Err(err) = self.store_mut().save_settings(&settings) {
            log::warn!("could not save settings: {err}");
        }
        self.ai_players = self.cfg_ai_players.min(Seat::COUNT - 1);
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.start_table(settings);
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.set_menu_error(None);
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_count_cycles_supported_sizes() {
        assert_eq!(cycle_decks(6, true), 8);
        assert_eq!(cycle_decks(8, true), 1);
        assert_eq!(cycle_decks(1, false), 8);
        assert_eq!(cycle_decks(2, true), 4);
    }

    #[test]
    fn apply_seats_human_and_bots() {
        let mut app = AppState::default();
        app.cfg_ai_players = 2;
        app.apply_menu();
        assert_eq!(app.scene, Scene::Table);
        assert_eq!(app.table.players().len(), 3);
        assert!(app.table.players()[0].is_human());
        assert!(app.agents.any_bots());
    }

    #[test]
    fn invalid_draft_stays_on_menu() {
        let mut app = AppState::default();
        app.cfg.table_max = app.cfg.table_min;
        app.apply_menu();
        assert_eq!(app.scene, Scene::Menu);
        assert!(app.menu_error().is_some());
    }
}
