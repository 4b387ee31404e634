use crate::cards::Card;
use crate::dealer::Dealer;
use crate::hand::{Hand, HandStatus};
use crate::money::Money;
use crate::player::{Player, Seat};
use crate::rules::{self, RulesError};
use crate::settings::{ConfigError, GameSettings};
use crate::shoe::{Shoe, ShoeError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Round phases, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Phase {
    Betting,
    Dealing,
    InsuranceOffer,
    PlayerActions,
    DealerAction,
    Settlement,
    Shuffling,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Betting => "Betting",
            Phase::Dealing => "Dealing",
            Phase::InsuranceOffer => "Insurance",
            Phase::PlayerActions => "Player actions",
            Phase::DealerAction => "Dealer",
            Phase::Settlement => "Settlement",
            Phase::Shuffling => "Shuffling",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundHistoryVerb {
    Bet,
    Hit,
    Stand,
    Double,
    Split,
    Insurance,
    DeclineInsurance,
    EvenMoney,
    Blackjack,
    Win,
    Lose,
    Push,
    DealerBlackjack,
    DealerDraw,
    DealerStand,
    DealerBust,
}

impl RoundHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            RoundHistoryVerb::Bet => "Bet",
            RoundHistoryVerb::Hit => "Hit",
            RoundHistoryVerb::Stand => "Stand",
            RoundHistoryVerb::Double => "Double",
            RoundHistoryVerb::Split => "Split",
            RoundHistoryVerb::Insurance => "Insurance",
            RoundHistoryVerb::DeclineInsurance => "No insurance",
            RoundHistoryVerb::EvenMoney => "Even money",
            RoundHistoryVerb::Blackjack => "Blackjack",
            RoundHistoryVerb::Win => "Win",
            RoundHistoryVerb::Lose => "Lose",
            RoundHistoryVerb::Push => "Push",
            RoundHistoryVerb::DealerBlackjack => "Dealer blackjack",
            RoundHistoryVerb::DealerDraw => "Dealer draws",
            RoundHistoryVerb::DealerStand => "Dealer stands",
            RoundHistoryVerb::DealerBust => "Dealer busts",
        }
    }
}

/// One line of the round log. `seat` is `None` for dealer events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundHistoryEntry {
    pub seat: Option<Seat>,
    pub verb: RoundHistoryVerb,
    pub amount: Option<Money>,
    pub card: Option<Card>,
    pub phase: Phase,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("not allowed during {actual}; expected {expected}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("no bets have been placed")]
    NoBets,
    #[error("seat {0} is already taken")]
    SeatTaken(Seat),
    #[error("no player at seat {0}")]
    UnknownSeat(Seat),
    #[error("player at seat {0} is sitting out")]
    PlayerInactive(Seat),
    #[error("seat {0} already has a bet")]
    AlreadyBet(Seat),
    #[error("bet {bet} is outside table limits {min} to {max}")]
    BetOutsideLimits { bet: Money, min: Money, max: Money },
    #[error("bet {bet} exceeds bankroll {bankroll}")]
    BetExceedsBankroll { bet: Money, bankroll: Money },
    #[error("insurance is not on offer for seat {0}")]
    InsuranceNotOffered(Seat),
    #[error("players still have hands to play")]
    TurnsRemaining,
    #[error("no hand is waiting for an action")]
    NoActiveTurn,
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ShoeError> for TableError {
    fn from(err: ShoeError) -> Self {
        TableError::Rules(RulesError::Shoe(err))
    }
}

/// Position of the hand whose decision is due: index into the seat-ordered
/// player list, then index into that player's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub player: usize,
    pub hand: usize,
}

impl Cursor {
    pub const START: Cursor = Cursor { player: 0, hand: 0 };
}

/// First Active hand at or after `from`, walking players in seat order and
/// hands in index order.
pub fn next_turn(players: &[Player], from: Cursor) -> Option<Cursor> {
    players.iter().enumerate().skip(from.player).find_map(|(p, player)| {
        let start = if p == from.player { from.hand } else { 0 };
        player
            .hands()
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, h)| h.status() == HandStatus::Active)
            .map(|(h, _)| Cursor { player: p, hand: h })
    })
}

/// Result of one settled hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandOutcome {
    pub seat: Seat,
    pub hand_index: usize,
    pub status: HandStatus,
    pub bet: Money,
    pub payout: Money,
    /// Insurance wager, reported on the first hand only.
    pub insurance: Option<Money>,
}

impl HandOutcome {
    /// Payout minus everything staked on this hand, in cents.
    pub fn net_cents(&self) -> i64 {
        self.payout.signed_diff(self.bet + self.insurance.unwrap_or(Money::ZERO))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundSummary {
    pub round: u64,
    pub dealer_total: u8,
    pub dealer_blackjack: bool,
    pub dealer_busted: bool,
    pub outcomes: Vec<HandOutcome>,
}

impl RoundSummary {
    pub fn outcomes_for(&self, seat: Seat) -> impl Iterator<Item = &HandOutcome> {
        self.outcomes.iter().filter(move |o| o.seat == seat)
    }

    pub fn net_for(&self, seat: Seat) -> i64 {
        self.outcomes_for(seat).map(HandOutcome::net_cents).sum()
    }
}

/// A blackjack table: shoe, dealer, up to seven players and the round state
/// machine that moves them through each phase.
#[derive(Debug)]
#[non_exhaustive]
pub struct Table {
    pub(crate) settings: GameSettings,
    pub(crate) shoe: Shoe,
    pub(crate) dealer: Dealer,
    /// Seated players, kept sorted by seat.
    pub(crate) players: Vec<Player>,
    pub(crate) phase: Phase,
    pub(crate) cursor: Option<Cursor>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) round: u64,
    pub(crate) last_summary: Option<RoundSummary>,
    history: Vec<RoundHistoryEntry>,
}

impl Table {
    /// A table with a freshly shuffled shoe.
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        let seed: u64 = rand::rng().random();
        Self::with_seed(settings, seed)
    }

    /// Like [`Table::new`] but every shuffle is reproducible from `seed`.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut shoe = Shoe::new(settings.number_of_decks)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        shoe.shuffle_with(&mut rng);
        Ok(Self::assemble(settings, shoe, rng))
    }

    /// Default settings and a freshly shuffled six-deck shoe.
    pub fn with_default_settings() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(rand::rng().random());
        let mut shoe = Shoe::default();
        shoe.shuffle_with(&mut rng);
        Self::assemble(GameSettings::default(), shoe, rng)
    }

    /// Use `shoe` exactly as given (no initial shuffle).
    pub fn with_shoe(settings: GameSettings, shoe: Shoe) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::assemble(settings, shoe, ChaCha8Rng::seed_from_u64(0)))
    }

    fn assemble(settings: GameSettings, shoe: Shoe, rng: ChaCha8Rng) -> Self {
        Self {
            dealer: Dealer::new(settings.dealer_hits_soft_17),
            settings,
            shoe,
            players: Vec::new(),
            phase: Phase::Betting,
            cursor: None,
            rng,
            round: 0,
            last_summary: None,
            history: Vec::new(),
        }
    }

    /// Returns the table settings
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the seated players in seat order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of rounds dealt so far
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    pub fn current_turn(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn current_seat(&self) -> Option<Seat> {
        self.cursor.and_then(|c| self.players.get(c.player)).map(|p| p.seat)
    }

    pub fn current_hand(&self) -> Option<&Hand> {
        self.cursor.and_then(|c| self.players.get(c.player)?.hands.get(c.hand))
    }

    pub fn history_recent(&self, n: usize) -> Vec<RoundHistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<RoundHistoryEntry> {
        if n == 0 || self.history.is_empty() {
            return Vec::new();
        }
        let len = self.history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn record(
        &mut self,
        seat: Option<Seat>,
        verb: RoundHistoryVerb,
        amount: Option<Money>,
        card: Option<Card>,
    ) {
        self.history.push(RoundHistoryEntry { seat, verb, amount, card, phase: self.phase });
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), TableError> {
        if self.phase != expected {
            return Err(TableError::WrongPhase { expected, actual: self.phase });
        }
        Ok(())
    }

    fn index_of(&self, seat: Seat) -> Result<usize, TableError> {
        self.players.iter().position(|p| p.seat == seat).ok_or(TableError::UnknownSeat(seat))
    }

    // ---- seating and betting ----

    /// Seat a player. Only between rounds.
    pub fn seat_player(&mut self, mut player: Player) -> Result<(), TableError> {
        self.ensure_phase(Phase::Betting)?;
        if self.player(player.seat).is_some() {
            return Err(TableError::SeatTaken(player.seat));
        }
        player.reset_round();
        player.active = player.bankroll >= self.settings.table_min;
        log::info!("{} takes seat {}", player.name, player.seat);
        let at = self.players.partition_point(|p| p.seat < player.seat);
        self.players.insert(at, player);
        Ok(())
    }

    pub fn remove_player(&mut self, seat: Seat) -> Result<Player, TableError> {
        self.ensure_phase(Phase::Betting)?;
        let idx = self.index_of(seat)?;
        let mut player = self.players.remove(idx);
        // refund an unplayed bet
        player.bankroll += player.total_bet();
        player.reset_round();
        Ok(player)
    }

    /// Stake `amount` for seat `seat`; it leaves the bankroll immediately.
    pub fn place_bet(&mut self, seat: Seat, amount: Money) -> Result<(), TableError> {
        self.ensure_phase(Phase::Betting)?;
        let idx = self.index_of(seat)?;
        let (min, max) = (self.settings.table_min, self.settings.table_max);
        let player = &mut self.players[idx];
        if !player.active {
            return Err(TableError::PlayerInactive(seat));
        }
        if player.has_bet() {
            return Err(TableError::AlreadyBet(seat));
        }
        if amount < min || amount > max {
            return Err(TableError::BetOutsideLimits { bet: amount, min, max });
        }
        let Some(rest) = player.bankroll.checked_sub(amount) else {
            return Err(TableError::BetExceedsBankroll { bet: amount, bankroll: player.bankroll });
        };
        player.bankroll = rest;
        player.hands.push(Hand::new(amount));
        log::debug!("seat {seat} bets {amount}");
        self.record(Some(seat), RoundHistoryVerb::Bet, Some(amount), None);
        Ok(())
    }

    // ---- decisions ----

    /// Whether seat `seat` owes a decision in the current phase: a bet while
    /// betting, an insurance answer while insurance is offered, or a play
    /// when its hand holds the turn.
    pub fn is_decision_due(&self, seat: Seat) -> bool {
        match self.phase {
            Phase::Betting => self.player(seat).is_some_and(|p| p.active && !p.has_bet()),
            Phase::InsuranceOffer => self.insurance_pending(seat),
            Phase::PlayerActions => self.current_seat() == Some(seat),
            _ => false,
        }
    }

    /// Seats with a decision due, in seat order.
    pub fn pending_seats(&self) -> Vec<Seat> {
        self.players.iter().map(|p| p.seat).filter(|&s| self.is_decision_due(s)).collect()
    }

    /// Insurance or even money is on offer and seat `seat` has not answered.
    pub fn insurance_pending(&self, seat: Seat) -> bool {
        if self.phase != Phase::InsuranceOffer {
            return false;
        }
        let up = self.dealer.up_card();
        self.player(seat).is_some_and(|p| {
            !p.insurance_decided
                && p.hands.first().is_some_and(|h| {
                    rules::can_offer_insurance(h, up, p.bankroll)
                        || rules::can_offer_even_money(h, up)
                })
        })
    }

    pub fn can_double(&self) -> bool {
        self.cursor.is_some_and(|c| {
            let p = &self.players[c.player];
            p.hands.get(c.hand).is_some_and(|h| rules::can_double_down(h, p.bankroll, &self.settings))
        })
    }

    pub fn can_split(&self) -> bool {
        self.cursor.is_some_and(|c| {
            let p = &self.players[c.player];
            p.hands.get(c.hand).is_some_and(|h| rules::can_split(h, p, &self.settings))
        })
    }

    // ---- phase machine ----

    /// Move to the next phase, performing the work that phase entails
    /// (dealing, the dealer peek, dealer play, settlement, cleanup).
    pub fn advance_phase(&mut self) -> Result<Phase, TableError> {
        match self.phase {
            Phase::Betting => self.start_dealing()?,
            Phase::Dealing => {
                if self.dealer.should_peek() {
                    self.phase = Phase::InsuranceOffer;
                } else {
                    self.pay_naturals();
                    self.enter_player_actions()?;
                }
            }
            Phase::InsuranceOffer => self.resolve_peek()?,
            Phase::PlayerActions => {
                if self.cursor.is_some() {
                    return Err(TableError::TurnsRemaining);
                }
                let anyone_standing = self
                    .players
                    .iter()
                    .flat_map(|p| p.hands.iter())
                    .any(|h| h.status() == HandStatus::Standing);
                if anyone_standing {
                    self.run_dealer()?;
                } else {
                    log::debug!("no standing hands; dealer does not draw");
                    self.settle_round();
                }
            }
            Phase::DealerAction => self.settle_round(),
            Phase::Settlement => self.finish_round(),
            Phase::Shuffling => {
                self.shoe.shuffle_with(&mut self.rng);
                self.phase = Phase::Betting;
            }
        }
        log::info!("round {}: {}", self.round, self.phase);
        Ok(self.phase)
    }

    fn start_dealing(&mut self) -> Result<(), TableError> {
        let bettors: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active && p.has_bet())
            .map(|(i, _)| i)
            .collect();
        if bettors.is_empty() {
            return Err(TableError::NoBets);
        }
        let needed = 2 * (bettors.len() + 1);
        if self.shoe.cards_remaining() < needed {
            return Err(ShoeError::Exhausted.into());
        }
        self.round += 1;
        self.phase = Phase::Dealing;
        for _ in 0..2 {
            for &i in &bettors {
                let card = self.shoe.draw()?;
                log::debug!("dealt {card} to seat {}", self.players[i].seat);
                self.players[i].hands[0].add_card(card);
            }
            let card = self.shoe.draw()?;
            self.dealer.take(card);
        }
        if let Some(up) = self.dealer.up_card() {
            log::info!("round {}: dealer shows {up}", self.round);
        }
        Ok(())
    }

    fn resolve_peek(&mut self) -> Result<(), TableError> {
        if self.dealer.has_blackjack() {
            self.dealer.reveal_hole();
            self.record(None, RoundHistoryVerb::DealerBlackjack, None, self.dealer.hole_card());
            log::info!("round {}: dealer has blackjack", self.round);
            self.settle_round();
            return Ok(());
        }
        for p in &self.players {
            if let Some(ib) = p.insurance {
                log::debug!("seat {} loses insurance {ib}", p.seat);
            }
        }
        self.pay_naturals();
        self.enter_player_actions()
    }

    fn pay_naturals(&mut self) {
        let ratio = self.settings.blackjack_payout;
        let mut paid = Vec::new();
        for p in &mut self.players {
            if let Some(amount) = rules::pay_natural(p, 0, ratio) {
                paid.push((p.seat, amount));
            }
        }
        for (seat, amount) in paid {
            log::info!("seat {seat} blackjack pays {amount}");
            self.record(Some(seat), RoundHistoryVerb::Blackjack, Some(amount), None);
        }
    }

    fn enter_player_actions(&mut self) -> Result<(), TableError> {
        self.phase = Phase::PlayerActions;
        self.move_cursor(Cursor::START)
    }

    /// Point the cursor at the next Active hand from `from`, dealing a
    /// held-back split card if that hand is waiting for one.
    fn move_cursor(&mut self, from: Cursor) -> Result<(), TableError> {
        self.cursor = next_turn(&self.players, from);
        if let Some(c) = self.cursor {
            if self.players[c.player].hands[c.hand].needs_second_card() {
                let card = self.shoe.draw()?;
                self.players[c.player].hands[c.hand].add_card(card);
                log::debug!("seat {} split hand {} receives {card}", self.players[c.player].seat, c.hand + 1);
            }
        }
        Ok(())
    }

    fn run_dealer(&mut self) -> Result<(), TableError> {
        self.phase = Phase::DealerAction;
        let drawn = rules::play_dealer(&mut self.dealer, &mut self.shoe)?;
        for card in drawn {
            self.record(None, RoundHistoryVerb::DealerDraw, None, Some(card));
        }
        let verb = if self.dealer.is_busted() {
            RoundHistoryVerb::DealerBust
        } else {
            RoundHistoryVerb::DealerStand
        };
        self.record(None, verb, None, None);
        log::info!("round {}: dealer finishes on {}", self.round, self.dealer.total());
        Ok(())
    }

    fn settle_round(&mut self) {
        self.phase = Phase::Settlement;
        self.cursor = None;
        self.dealer.reveal_hole();
        let mut outcomes = Vec::new();
        for p in &mut self.players {
            let insurance = p.insurance;
            for (i, hand) in p.hands.iter_mut().enumerate() {
                if !hand.status().is_settled() {
                    let ins = if i == 0 { insurance } else { None };
                    let payout = rules::settle_hand(hand, &self.dealer, ins, &self.settings);
                    p.bankroll += payout;
                }
                outcomes.push(HandOutcome {
                    seat: p.seat,
                    hand_index: i,
                    status: hand.status(),
                    bet: hand.bet(),
                    payout: hand.payout().unwrap_or(Money::ZERO),
                    insurance: if i == 0 { insurance } else { None },
                });
            }
        }
        for o in &outcomes {
            let verb = match o.status {
                HandStatus::Blackjack | HandStatus::Won => RoundHistoryVerb::Win,
                HandStatus::Push => RoundHistoryVerb::Push,
                _ => RoundHistoryVerb::Lose,
            };
            log::info!("seat {} hand {}: {} ({})", o.seat, o.hand_index + 1, o.status.label(), o.payout);
            self.record(Some(o.seat), verb, Some(o.payout), None);
        }
        let min = self.settings.table_min;
        for p in &mut self.players {
            if p.active && p.bankroll < min {
                p.active = false;
                log::info!("{} at seat {} drops below the table minimum", p.name, p.seat);
            }
        }
        self.last_summary = Some(RoundSummary {
            round: self.round,
            dealer_total: self.dealer.total(),
            dealer_blackjack: self.dealer.has_blackjack(),
            dealer_busted: self.dealer.is_busted(),
            outcomes,
        });
    }

    fn finish_round(&mut self) {
        for p in &mut self.players {
            p.reset_round();
        }
        self.dealer.clear();
        self.cursor = None;
        self.history.clear();
        if self.shoe.needs_reshuffle() {
            self.phase = Phase::Shuffling;
        } else {
            self.phase = Phase::Betting;
        }
    }

    // ---- player actions ----

    fn turn(&self) -> Result<Cursor, TableError> {
        self.ensure_phase(Phase::PlayerActions)?;
        self.cursor.ok_or(TableError::NoActiveTurn)
    }

    pub fn hit(&mut self) -> Result<Card, TableError> {
        let c = self.turn()?;
        let player = &mut self.players[c.player];
        let seat = player.seat;
        let card = rules::hit(&mut player.hands[c.hand], &mut self.shoe)?;
        log::debug!("seat {seat} hits: {card}");
        self.record(Some(seat), RoundHistoryVerb::Hit, None, Some(card));
        self.move_cursor(c)?;
        Ok(card)
    }

    pub fn stand(&mut self) -> Result<(), TableError> {
        let c = self.turn()?;
        let player = &mut self.players[c.player];
        let seat = player.seat;
        rules::stand(&mut player.hands[c.hand])?;
        log::debug!("seat {seat} stands");
        self.record(Some(seat), RoundHistoryVerb::Stand, None, None);
        self.move_cursor(c)
    }

    pub fn double_down(&mut self) -> Result<Card, TableError> {
        let c = self.turn()?;
        let player = &mut self.players[c.player];
        let seat = player.seat;
        let card = rules::double_down(player, c.hand, &mut self.shoe, &self.settings)?;
        let bet = player.hands[c.hand].bet();
        log::debug!("seat {seat} doubles to {bet}: {card}");
        self.record(Some(seat), RoundHistoryVerb::Double, Some(bet), Some(card));
        self.move_cursor(c)?;
        Ok(card)
    }

    pub fn split(&mut self) -> Result<(), TableError> {
        let c = self.turn()?;
        let player = &mut self.players[c.player];
        let seat = player.seat;
        rules::split(player, c.hand, &mut self.shoe, &self.settings)?;
        let bet = player.hands[c.hand].bet();
        log::debug!("seat {seat} splits hand {}", c.hand + 1);
        self.record(Some(seat), RoundHistoryVerb::Split, Some(bet), None);
        self.move_cursor(c)
    }

    pub fn take_insurance(&mut self, seat: Seat) -> Result<Money, TableError> {
        self.ensure_phase(Phase::InsuranceOffer)?;
        let idx = self.index_of(seat)?;
        if self.players[idx].insurance_decided {
            return Err(TableError::InsuranceNotOffered(seat));
        }
        let up = self.dealer.up_card();
        let cost = rules::take_insurance(&mut self.players[idx], 0, up)?;
        self.players[idx].insurance_decided = true;
        log::debug!("seat {seat} takes insurance for {cost}");
        self.record(Some(seat), RoundHistoryVerb::Insurance, Some(cost), None);
        Ok(cost)
    }

    pub fn accept_even_money(&mut self, seat: Seat) -> Result<Money, TableError> {
        self.ensure_phase(Phase::InsuranceOffer)?;
        let idx = self.index_of(seat)?;
        if self.players[idx].insurance_decided {
            return Err(TableError::InsuranceNotOffered(seat));
        }
        let up = self.dealer.up_card();
        let paid = rules::accept_even_money(&mut self.players[idx], 0, up)?;
        self.players[idx].insurance_decided = true;
        log::debug!("seat {seat} takes even money: {paid}");
        self.record(Some(seat), RoundHistoryVerb::EvenMoney, Some(paid), None);
        Ok(paid)
    }

    pub fn decline_insurance(&mut self, seat: Seat) -> Result<(), TableError> {
        self.ensure_phase(Phase::InsuranceOffer)?;
        if !self.insurance_pending(seat) {
            return Err(TableError::InsuranceNotOffered(seat));
        }
        let idx = self.index_of(seat)?;
        self.players[idx].insurance_decided = true;
        self.record(Some(seat), RoundHistoryVerb::DeclineInsurance, None, None);
        Ok(())
    }
}
