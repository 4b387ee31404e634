use crate::engine::TableEngine;
use crate::player::Seat;
use crate::strategy::{self, Move};
use crate::table::{Phase, TableError};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{apply_action, Action, AgentKind, PlayerAgent};

/// Timing knobs for a bot. Play itself is fixed basic strategy.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Think for a fixed `ms` before every action.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.min_delay_ms = ms;
        self.max_delay_ms = ms;
        self
    }

    /// Set a deterministic RNG seed for reproducible timing.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self { min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// A basic-strategy player: flat minimum bets, never insures.
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, TableError> {
        if !engine.is_decision_due(seat) {
            return Ok(false);
        }
        let now = Instant::now();
        let delay = choose_delay_ms(&self.profile, &mut self.state);
        if delay > 0 {
            match self.next_action_at {
                None => {
                    self.next_action_at = Some(now + Duration::from_millis(delay));
                    return Ok(false);
                }
                Some(next) if now < next => {
                    return Ok(false);
                }
                Some(_) => {}
            }
        }
        self.next_action_at = None;

        match decide(engine, seat) {
            Some(action) => {
                log::debug!("bot at seat {seat}: {action:?}");
                apply_action(engine, seat, action)
            }
            None => Ok(false),
        }
    }
}

/// The bot's choice for the decision currently due at `seat`.
pub fn decide(engine: &dyn TableEngine, seat: Seat) -> Option<Action> {
    match engine.phase() {
        Phase::Betting => {
            let min = engine.settings().table_min;
            (engine.bankroll(seat)? >= min).then_some(Action::Bet(min))
        }
        Phase::InsuranceOffer => Some(Action::DeclineInsurance),
        Phase::PlayerActions => Some(strategy_move(engine)?.into()),
        _ => None,
    }
}

/// Basic strategy for the hand holding the turn, replacing moves the table
/// would reject with their closest legal alternative.
pub fn strategy_move(engine: &dyn TableEngine) -> Option<Move> {
    let hand = engine.current_hand()?;
    let up = engine.dealer_up_card()?;
    let mut mv = strategy::recommend(hand, up);
    if mv == Move::Split && !engine.can_split() {
        mv = strategy::recommend_excluding_split(hand, up);
    }
    if mv == Move::Double && !engine.can_double() {
        mv = strategy::without_double(hand.cards());
    }
    Some(mv)
}

impl From<Move> for Action {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Hit => Action::Hit,
            Move::Stand => Action::Stand,
            Move::Double => Action::Double,
            Move::Split => Action::Split,
        }
    }
}

fn choose_delay_ms(profile: &BotProfile, state: &mut BotState) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        state.rng.random_range(min..=max)
    }
}
