//! Agents: pluggable seat controllers (basic-strategy bots, humans driven by
//! a front end).
//!
//! `PlayerAgent` is the per-seat trait and `AgentTable` coordinates which
//! agent controls which seat. It lives in the library so UIs stay thin and do
//! not need to implement bot coordination.

use crate::engine::TableEngine;
use crate::money::Money;
use crate::player::Seat;
use crate::table::{Phase, TableError};
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level action intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Bet(Money),
    Hit,
    Stand,
    Double,
    Split,
    Insurance,
    EvenMoney,
    DeclineInsurance,
}

impl Action {
    /// Phase in which this action can be applied.
    pub fn phase(self) -> Phase {
        match self {
            Action::Bet(_) => Phase::Betting,
            Action::Insurance | Action::EvenMoney | Action::DeclineInsurance => {
                Phase::InsuranceOffer
            }
            Action::Hit | Action::Stand | Action::Double | Action::Split => Phase::PlayerActions,
        }
    }
}

/// Apply `action` for `seat`. Returns `Ok(true)` once the engine accepted it.
pub fn apply_action(
    engine: &mut dyn TableEngine,
    seat: Seat,
    action: Action,
) -> Result<bool, TableError> {
    match action {
        Action::Bet(amount) => engine.place_bet(seat, amount),
        Action::Hit => engine.hit().map(|_| ()),
        Action::Stand => engine.stand(),
        Action::Double => engine.double_down().map(|_| ()),
        Action::Split => engine.split(),
        Action::Insurance => engine.take_insurance(seat).map(|_| ()),
        Action::EvenMoney => engine.accept_even_money(seat).map(|_| ()),
        Action::DeclineInsurance => engine.decline_insurance(seat),
    }
    .map(|_| true)
}

/// A seat controller that acts for a player when a decision is due.
pub trait PlayerAgent {
    /// Called while `seat` owes a decision. Implementations may throttle internally.
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, TableError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive a seat-intent action; default is to ignore and return false.
    fn receive(&mut self, _action: Action) -> bool {
        false
    }
}

mod bots;

pub use bots::{decide, strategy_move, BotAgent, BotProfile};

/// Executes user-intended actions once the seat's decision is due.
pub struct HumanAgent {
    pending: Option<Action>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending(&self) -> Option<Action> {
        self.pending
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(action);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, TableError> {
        if !engine.is_decision_due(seat) {
            return Ok(false);
        }
        match self.pending {
            // stale intent from an earlier phase
            Some(act) if act.phase() != engine.phase() => {
                self.pending = None;
                Ok(false)
            }
            Some(act) => {
                self.pending = None;
                apply_action(engine, seat, act)
            }
            None => Ok(false),
        }
    }
}

/// Manages one optional agent per seat and drives the agents whose decision
/// is due.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(_) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::for_seats(Seat::COUNT)
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats, min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn PlayerAgent>>) {
        let idx = seat.index();
        if idx >= self.seats.len() {
            self.seats.resize_with(idx + 1, || None);
        }
        self.seats[idx] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats.get(seat.index()).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an action intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: Seat, action: Action) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat.index()) {
            return agent.receive(action);
        }
        false
    }

    pub fn has_agent(&self, seat: Seat) -> bool {
        self.seats.get(seat.index()).is_some_and(|a| a.is_some())
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Set a global minimum delay between bot actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive every agent whose seat owes a decision, in seat order. Returns
    /// whether any agent acted.
    pub fn on_turn(&mut self, engine: &mut dyn TableEngine) -> Result<bool, TableError> {
        let mut acted_any = false;
        for (idx, slot) in self.seats.iter_mut().enumerate() {
            let Some(agent) = slot.as_deref_mut() else { continue };
            let Some(seat) = u8::try_from(idx + 1).ok().and_then(|n| Seat::new(n).ok()) else {
                continue;
            };
            if !engine.is_decision_due(seat) {
                continue;
            }
            let now = Instant::now();
            let is_bot = matches!(agent.kind(), AgentKind::Bot);
            if is_bot && self.next_action_at.is_some_and(|next| now < next) {
                continue;
            }
            let acted = agent.on_turn(engine, seat)?;
            if acted {
                acted_any = true;
                if is_bot && !self.min_action_delay.is_zero() {
                    self.next_action_at = Some(now + self.min_action_delay);
                }
            }
        }
        Ok(acted_any)
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
        self.next_action_at = None;
    }
}
