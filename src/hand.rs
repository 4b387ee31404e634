use crate::cards::{parse_cards, Card};
use crate::evaluator::{self, HandValue};
use crate::money::Money;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// Lifecycle of a hand within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HandStatus {
    Active,
    Standing,
    Busted,
    Blackjack,
    Won,
    Lost,
    Push,
}

impl HandStatus {
    pub fn label(self) -> &'static str {
        match self {
            HandStatus::Active => "Active",
            HandStatus::Standing => "Standing",
            HandStatus::Busted => "Busted",
            HandStatus::Blackjack => "Blackjack",
            HandStatus::Won => "Won",
            HandStatus::Lost => "Lost",
            HandStatus::Push => "Push",
        }
    }

    /// Paid or collected; nothing left to settle.
    pub fn is_settled(self) -> bool {
        matches!(self, HandStatus::Blackjack | HandStatus::Won | HandStatus::Lost | HandStatus::Push)
    }
}

/// Where a hand came from. A dealt hand can never be waiting for a second
/// card; only a split child can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandOrigin {
    Dealt,
    SplitChild { awaiting_second_card: bool },
}

/// A player's (or the dealer's) cards plus the wager riding on them.
///
/// ```
/// use blackjack_rs::hand::{Hand, HandStatus};
///
/// let mut hand: Hand = "Kd 6s".parse().unwrap();
/// assert_eq!(hand.total(), 16);
/// hand.add_card("Qh".parse().unwrap());
/// assert_eq!(hand.status(), HandStatus::Busted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub(crate) cards: Vec<Card>,
    pub(crate) bet: Money,
    pub(crate) status: HandStatus,
    pub(crate) origin: HandOrigin,
    pub(crate) payout: Option<Money>,
}

impl Hand {
    /// An empty, freshly dealt hand carrying `bet`.
    pub fn new(bet: Money) -> Self {
        Self {
            cards: Vec::with_capacity(4),
            bet,
            status: HandStatus::Active,
            origin: HandOrigin::Dealt,
            payout: None,
        }
    }

    pub fn from_cards(cards: Vec<Card>, bet: Money) -> Self {
        let mut hand = Self::new(bet);
        for card in cards {
            hand.add_card(card);
        }
        hand
    }

    /// A hand produced by a split that already holds its second card.
    pub fn from_split(cards: Vec<Card>, bet: Money) -> Self {
        let mut hand = Self::split_child(None, bet);
        for card in cards {
            hand.add_card(card);
        }
        hand
    }

    pub(crate) fn split_child(first: Option<Card>, bet: Money) -> Self {
        Self {
            cards: first.into_iter().collect(),
            bet,
            status: HandStatus::Active,
            origin: HandOrigin::SplitChild { awaiting_second_card: false },
            payout: None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Current wager on this hand (doubled after a double down).
    pub fn bet(&self) -> Money {
        self.bet
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn origin(&self) -> HandOrigin {
        self.origin
    }

    /// Amount returned to the player once the hand is settled.
    pub fn payout(&self) -> Option<Money> {
        self.payout
    }

    pub fn is_from_split(&self) -> bool {
        matches!(self.origin, HandOrigin::SplitChild { .. })
    }

    pub fn needs_second_card(&self) -> bool {
        matches!(self.origin, HandOrigin::SplitChild { awaiting_second_card: true })
    }

    /// Split from a pair of Aces; such hands take exactly one extra card.
    pub fn is_split_aces(&self) -> bool {
        self.is_from_split() && self.cards.first().is_some_and(|c| c.is_ace())
    }

    pub fn value(&self) -> HandValue {
        evaluator::evaluate(&self.cards)
    }

    pub fn total(&self) -> u8 {
        evaluator::total(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        evaluator::is_soft(&self.cards)
    }

    /// A natural: two-card 21 that did not come from a split.
    pub fn is_blackjack(&self) -> bool {
        !self.is_from_split() && evaluator::is_natural(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        evaluator::is_busted(&self.cards)
    }

    pub fn is_pair(&self) -> bool {
        evaluator::is_pair(&self.cards)
    }

    /// Add a card. Marks the hand Busted if it goes over 21 and clears a
    /// pending second-card flag.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        if let HandOrigin::SplitChild { awaiting_second_card } = &mut self.origin {
            *awaiting_second_card = false;
        }
        if self.is_busted() {
            self.status = HandStatus::Busted;
        }
    }

    pub(crate) fn await_second_card(&mut self) {
        if let HandOrigin::SplitChild { awaiting_second_card } = &mut self.origin {
            *awaiting_second_card = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    pub(crate) fn settle(&mut self, status: HandStatus, payout: Money) {
        self.status = status;
        self.payout = Some(payout);
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(Hand::from_cards(cards, Money::ZERO))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, " ({})", self.value())
    }
}
