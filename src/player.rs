use crate::hand::Hand;
use crate::money::Money;
use crate::settings::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A table position, 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 7;
    pub const COUNT: usize = 7;
    /// Seat 1, the first to act.
    pub const FIRST_BASE: Seat = Seat(Self::FIRST);

    pub fn new(number: u8) -> Result<Self, ConfigError> {
        if (Self::FIRST..=Self::LAST).contains(&number) {
            Ok(Seat(number))
        } else {
            Err(ConfigError::InvalidSeat(number))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Zero-based position, handy for per-seat arrays.
    pub const fn index(self) -> usize {
        (self.0 - Self::FIRST) as usize
    }

    pub fn all() -> impl Iterator<Item = Seat> {
        (Self::FIRST..=Self::LAST).map(Seat)
    }
}

impl TryFrom<u8> for Seat {
    type Error = ConfigError;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Seat::new(n)
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> u8 {
        seat.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) seat: Seat,
    pub(crate) kind: PlayerKind,
    pub(crate) bankroll: Money,
    pub(crate) hands: Vec<Hand>,
    pub(crate) active: bool,
    pub(crate) insurance: Option<Money>,
    pub(crate) insurance_decided: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: Seat, kind: PlayerKind, bankroll: Money) -> Self {
        Self {
            name: name.into(),
            seat,
            kind,
            bankroll,
            hands: Vec::new(),
            active: true,
            insurance: None,
            insurance_decided: false,
        }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the player's seat
    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    /// Money not currently on the table
    pub fn bankroll(&self) -> Money {
        self.bankroll
    }

    /// Returns the player's hands this round (empty when not betting)
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    /// Sitting in; inactive players are skipped until they are re-seated.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Insurance wager taken this round
    pub fn insurance(&self) -> Option<Money> {
        self.insurance
    }

    pub fn has_bet(&self) -> bool {
        !self.hands.is_empty()
    }

    /// Number of splits made this round.
    pub fn split_count(&self) -> usize {
        self.hands.len().saturating_sub(1)
    }

    /// Sum of wagers on all hands (insurance excluded).
    pub fn total_bet(&self) -> Money {
        self.hands.iter().map(|h| h.bet()).sum()
    }

    pub(crate) fn reset_round(&mut self) {
        self.hands.clear();
        self.insurance = None;
        self.insurance_decided = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_are_one_through_seven() {
        assert!(Seat::new(0).is_err());
        assert_eq!(Seat::new(1).unwrap().index(), 0);
        assert_eq!(Seat::new(7).unwrap().number(), 7);
        assert_eq!(Seat::new(8), Err(ConfigError::InvalidSeat(8)));
        assert_eq!(Seat::all().count(), Seat::COUNT);
    }

    #[test]
    fn seat_serializes_as_number() {
        let seat = Seat::new(3).unwrap();
        assert_eq!(serde_json::to_string(&seat).unwrap(), "3");
        assert!(serde_json::from_str::<Seat>("9").is_err());
    }

    #[test]
    fn split_count_follows_hands() {
        let mut p = Player::new("P1", Seat::new(1).unwrap(), PlayerKind::Human, Money::from_dollars(100));
        assert_eq!(p.split_count(), 0);
        p.hands.push(Hand::new(Money::from_dollars(5)));
        p.hands.push(Hand::new(Money::from_dollars(5)));
        assert_eq!(p.split_count(), 1);
        assert_eq!(p.total_bet(), Money::from_dollars(10));
        p.reset_round();
        assert!(!p.has_bet());
    }
}
