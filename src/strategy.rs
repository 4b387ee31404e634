//! Basic strategy for a six-deck shoe where the dealer hits soft 17.
//!
//! Three fixed charts (pairs, soft totals, hard totals) keyed by the player's
//! holding and the dealer's up card, with Ace counted as 11. Lookup order is
//! pair, then soft, then hard. Combinations not on a chart fall back to
//! Stand on 17 or more and Hit otherwise.

use crate::cards::Card;
use crate::evaluator;
use crate::hand::Hand;
use std::fmt;

/// A playing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Hit,
    Stand,
    Double,
    Split,
}

impl Move {
    pub fn label(self) -> &'static str {
        match self {
            Move::Hit => "Hit",
            Move::Stand => "Stand",
            Move::Double => "Double",
            Move::Split => "Split",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use self::Move::{Double as D, Hit as H, Split as P, Stand as S};

// Columns are dealer up cards 2, 3, 4, 5, 6, 7, 8, 9, 10, A.
type Row = [Move; 10];

fn pair_row(card_value: u8) -> Option<Row> {
    Some(match card_value {
        2 | 3 => [P, P, P, P, P, P, H, H, H, H],
        4 => [H, H, H, P, P, H, H, H, H, H],
        5 => [D, D, D, D, D, D, D, D, H, H],
        6 => [P, P, P, P, P, H, H, H, H, H],
        7 => [P, P, P, P, P, P, H, H, H, H],
        8 => [P; 10],
        9 => [P, P, P, P, P, S, P, P, S, S],
        10 => [S; 10],
        11 => [P; 10],
        _ => return None,
    })
}

fn soft_row(total: u8) -> Option<Row> {
    Some(match total {
        13 | 14 => [H, H, H, D, D, H, H, H, H, H],
        15 | 16 => [H, H, D, D, D, H, H, H, H, H],
        17 => [H, D, D, D, D, H, H, H, H, H],
        18 => [D, D, D, D, D, S, S, H, H, H],
        19 => [S, S, S, S, D, S, S, S, S, S],
        20 => [S; 10],
        _ => return None,
    })
}

fn hard_row(total: u8) -> Option<Row> {
    Some(match total {
        2..=8 => [H; 10],
        9 => [H, D, D, D, D, H, H, H, H, H],
        10 => [D, D, D, D, D, D, D, D, H, H],
        11 => [D; 10],
        12 => [H, H, S, S, S, H, H, H, H, H],
        13..=16 => [S, S, S, S, S, H, H, H, H, H],
        17..=20 => [S; 10],
        _ => return None,
    })
}

fn column(dealer_up: Card) -> usize {
    usize::from(dealer_up.value().clamp(2, 11) - 2)
}

fn fallback(total: u8) -> Move {
    if total >= 17 {
        Move::Stand
    } else {
        Move::Hit
    }
}

/// Recommended move for `cards` against the dealer's up card.
pub fn recommend_cards(cards: &[Card], dealer_up: Card, exclude_split: bool) -> Move {
    let col = column(dealer_up);
    if evaluator::is_pair(cards) {
        let card_value = cards[0].value();
        match pair_row(card_value).map(|row| row[col]) {
            Some(Move::Split) if exclude_split => {}
            Some(mv) => return mv,
            None => return fallback(card_value.saturating_mul(2)),
        }
    }
    let total = evaluator::total(cards);
    let row = if evaluator::is_soft(cards) { soft_row(total) } else { hard_row(total) };
    match row {
        Some(row) => row[col],
        None => fallback(total),
    }
}

/// Basic-strategy move for `hand`.
///
/// ```
/// use blackjack_rs::hand::Hand;
/// use blackjack_rs::strategy::{recommend, Move};
///
/// let hand: Hand = "5s 5d".parse().unwrap();
/// assert_eq!(recommend(&hand, "9c".parse().unwrap()), Move::Double);
/// ```
pub fn recommend(hand: &Hand, dealer_up: Card) -> Move {
    recommend_cards(hand.cards(), dealer_up, false)
}

/// Best move when a split cannot be made (hand limit or funds). Never
/// returns [`Move::Split`].
pub fn recommend_excluding_split(hand: &Hand, dealer_up: Card) -> Move {
    recommend_cards(hand.cards(), dealer_up, true)
}

/// Replacement for a Double that is not allowed: stand on soft 18 or
/// better, otherwise hit.
pub fn without_double(cards: &[Card]) -> Move {
    if evaluator::is_soft(cards) && evaluator::total(cards) >= 18 {
        Move::Stand
    } else {
        Move::Hit
    }
}
