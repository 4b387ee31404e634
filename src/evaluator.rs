//! Hand arithmetic: totals with Ace demotion, softness, naturals, busts and
//! pairs. Everything here is a pure function of a card slice; split origin is
//! applied by [`crate::hand::Hand`].

use crate::cards::Card;
use std::fmt;

/// Highest non-busting total.
pub const BLACKJACK: u8 = 21;

/// Total and softness of a set of cards.
///
/// ```
/// use blackjack_rs::cards::parse_cards;
/// use blackjack_rs::evaluator::evaluate;
///
/// let v = evaluate(&parse_cards("Ah 6c").unwrap());
/// assert_eq!((v.total, v.soft), (17, true));
/// assert_eq!(v.to_string(), "soft 17");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandValue {
    pub total: u8,
    pub soft: bool,
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.soft {
            write!(f, "soft {}", self.total)
        } else {
            write!(f, "{}", self.total)
        }
    }
}

pub fn evaluate(cards: &[Card]) -> HandValue {
    HandValue { total: total(cards), soft: is_soft(cards) }
}

/// Sum with every Ace counted as 1.
pub fn hard_sum(cards: &[Card]) -> u32 {
    cards.iter().map(|c| if c.is_ace() { 1 } else { u32::from(c.value()) }).sum()
}

/// Best total: Aces start at 11 and are demoted to 1, one at a time, while
/// the total is over 21.
pub fn total(cards: &[Card]) -> u8 {
    let mut sum: u32 = cards.iter().map(|c| u32::from(c.value())).sum();
    let mut aces = cards.iter().filter(|c| c.is_ace()).count();
    while sum > u32::from(BLACKJACK) && aces > 0 {
        sum -= 10;
        aces -= 1;
    }
    u8::try_from(sum).unwrap_or(u8::MAX)
}

/// An Ace can still count as 11 without busting.
pub fn is_soft(cards: &[Card]) -> bool {
    cards.iter().any(|c| c.is_ace()) && hard_sum(cards) + 10 <= u32::from(BLACKJACK)
}

/// Two cards: an Ace and a ten-value card. Split origin is not considered.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2
        && cards.iter().any(|c| c.is_ace())
        && cards.iter().any(|c| c.is_ten_value())
}

pub fn is_busted(cards: &[Card]) -> bool {
    total(cards) > BLACKJACK
}

/// Two cards of equal point value; K-Q counts.
pub fn is_pair(cards: &[Card]) -> bool {
    matches!(cards, [a, b] if a.value() == b.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn ace_demotes_when_needed() {
        let mut hand = cards("Ah 6c");
        assert_eq!(total(&hand), 17);
        assert!(is_soft(&hand));
        hand.extend(cards("8d"));
        assert_eq!(total(&hand), 15);
        assert!(!is_soft(&hand));
    }

    #[test]
    fn multiple_aces() {
        assert_eq!(total(&cards("Ah Ad")), 12);
        assert!(is_soft(&cards("Ah Ad")));
        assert_eq!(total(&cards("Ah Ad Ac As")), 14);
        assert_eq!(total(&cards("Ah Ad 9c")), 21);
        assert_eq!(total(&cards("Ah Ad 9c Kd")), 21);
        assert!(!is_soft(&cards("Ah Ad 9c Kd")));
    }

    #[test]
    fn ten_value_pair_is_not_natural() {
        let hand = cards("Ts Jh");
        assert!(is_pair(&hand));
        assert!(!is_natural(&hand));
        assert_eq!(total(&hand), 20);
    }

    #[test]
    fn three_card_21_is_not_natural() {
        let hand = cards("7s 7h 7d");
        assert_eq!(total(&hand), 21);
        assert!(!is_natural(&hand));
        assert!(is_natural(&cards("Kd As")));
    }

    #[test]
    fn bust_and_empty() {
        assert!(is_busted(&cards("Ks Qh 2c")));
        assert!(!is_busted(&cards("Ks Qh As")));
        assert_eq!(total(&[]), 0);
        assert!(!is_soft(&[]));
        assert!(!is_pair(&cards("8s")));
    }
}
