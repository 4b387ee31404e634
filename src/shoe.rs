use crate::cards::{Card, Rank, Suit};
use crate::settings::{validate_deck_count, ConfigError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShoeError {
    #[error("shoe is exhausted")]
    Exhausted,
    #[error("no copy of {card} left in a {decks}-deck shoe")]
    NotInShoe { card: Card, decks: u8 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A multi-deck shoe dealt from the front.
///
/// `cards_remaining() + cards_dealt()` always equals `number_of_decks() * 52`.
///
/// ```
/// use blackjack_rs::shoe::Shoe;
///
/// let mut shoe = Shoe::new(6).unwrap();
/// shoe.shuffle_seeded(42);
/// let _ = shoe.deal_card();
/// assert_eq!(shoe.cards_remaining() + shoe.cards_dealt(), 6 * 52);
/// ```
#[derive(Debug, Clone)]
pub struct Shoe {
    decks: u8,
    cards: VecDeque<Card>,
    dealt: usize,
    penetration: f64,
}

impl Shoe {
    /// Build an unshuffled shoe of `decks` standard decks.
    pub fn new(decks: u8) -> Result<Self, ConfigError> {
        validate_deck_count(decks)?;
        Ok(Self {
            decks,
            cards: composition(decks).into(),
            dealt: 0,
            penetration: penetration_for(decks),
        })
    }

    /// Build a shoe whose first cards are `top`, in order, followed by the
    /// rest of the composition. Useful for reproducing a specific deal.
    pub fn stacked(decks: u8, top: &[Card]) -> Result<Self, ShoeError> {
        validate_deck_count(decks)?;
        let mut rest = composition(decks);
        for &card in top {
            match rest.iter().position(|&c| c == card) {
                Some(i) => {
                    rest.remove(i);
                }
                None => return Err(ShoeError::NotInShoe { card, decks }),
            }
        }
        let mut cards: VecDeque<Card> = top.iter().copied().collect();
        cards.extend(rest);
        Ok(Self { decks, cards, dealt: 0, penetration: penetration_for(decks) })
    }

    pub fn number_of_decks(&self) -> u8 {
        self.decks
    }

    pub fn total_cards(&self) -> usize {
        usize::from(self.decks) * 52
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards_dealt(&self) -> usize {
        self.dealt
    }

    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    /// Dealt-card count at which the shoe must be reshuffled.
    pub fn reshuffle_threshold(&self) -> usize {
        (self.total_cards() as f64 * self.penetration).floor() as usize
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.dealt >= self.reshuffle_threshold()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Gather every card back and shuffle with the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cards = composition(self.decks);
        cards.shuffle(rng);
        self.cards = cards.into();
        self.dealt = 0;
        log::info!("shuffled {}-deck shoe", self.decks);
    }

    /// Take the next card, or `None` when nothing is left.
    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.cards.pop_front()?;
        self.dealt += 1;
        Some(card)
    }

    /// Like [`Shoe::deal_card`] but treats an empty shoe as an error.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.deal_card().ok_or(ShoeError::Exhausted)
    }

    /// Upcoming cards, front first.
    pub fn peek(&self, n: usize) -> Vec<Card> {
        self.cards.iter().take(n).copied().collect()
    }
}

/// An unshuffled six-deck shoe.
impl Default for Shoe {
    fn default() -> Self {
        let decks = 6;
        Self {
            decks,
            cards: composition(decks).into(),
            dealt: 0,
            penetration: penetration_for(decks),
        }
    }
}

fn composition(decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(usize::from(decks) * 52);
    for _ in 0..decks {
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
    }
    cards
}

fn penetration_for(decks: u8) -> f64 {
    match decks {
        1 => 0.01,
        2 => 0.50,
        _ => 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_deck_shoe_has_312_cards() {
        let s = Shoe::new(6).unwrap();
        assert_eq!(s.cards_remaining(), 312);
        assert_eq!(s.reshuffle_threshold(), 234);
    }

    #[test]
    fn rejects_unsupported_deck_counts() {
        assert_eq!(Shoe::new(3).unwrap_err(), ConfigError::InvalidDeckCount(3));
        assert!(Shoe::new(0).is_err());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut s1 = Shoe::new(2).unwrap();
        let mut s2 = Shoe::new(2).unwrap();
        s1.shuffle_seeded(42);
        s2.shuffle_seeded(42);
        assert_eq!(s1.cards, s2.cards);
    }

    #[test]
    fn penetration_scales_with_decks() {
        assert!(Shoe::new(1).unwrap().needs_reshuffle());
        let two = Shoe::new(2).unwrap();
        assert_eq!(two.reshuffle_threshold(), 52);
        assert!(!two.needs_reshuffle());
    }

    #[test]
    fn two_deck_shoe_reshuffles_at_half() {
        let mut s = Shoe::new(2).unwrap();
        for _ in 0..51 {
            s.deal_card().unwrap();
        }
        assert!(!s.needs_reshuffle());
        s.deal_card().unwrap();
        assert!(s.needs_reshuffle());
        s.shuffle_seeded(1);
        assert!(!s.needs_reshuffle());
        assert_eq!(s.cards_remaining(), 104);
    }

    #[test]
    fn exhausted_shoe_returns_none() {
        let mut s = Shoe::new(1).unwrap();
        for _ in 0..52 {
            assert!(s.deal_card().is_some());
        }
        assert_eq!(s.deal_card(), None);
        assert_eq!(s.draw(), Err(ShoeError::Exhausted));
        assert_eq!(s.cards_dealt(), 52);
    }

    #[test]
    fn stacked_shoe_deals_prefix_first() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let king = Card::new(Rank::King, Suit::Hearts);
        let mut s = Shoe::stacked(1, &[ace, king]).unwrap();
        assert_eq!(s.deal_card(), Some(ace));
        assert_eq!(s.deal_card(), Some(king));
        assert_eq!(s.cards_remaining() + s.cards_dealt(), 52);
        assert!(!s.cards.contains(&ace));
    }

    #[test]
    fn stacked_shoe_respects_composition() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert!(Shoe::stacked(1, &[ace, ace]).is_err());
        assert!(Shoe::stacked(2, &[ace, ace]).is_ok());
    }
}
