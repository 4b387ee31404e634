use crate::cards::Card;
use crate::hand::Hand;
use crate::money::Money;

/// Dealer draw rule: stand on 18+, stand on hard 17, hit soft 17 only under
/// H17, hit anything below 17.
///
/// ```
/// use blackjack_rs::dealer::should_hit;
///
/// assert!(should_hit(17, true, true));
/// assert!(!should_hit(17, true, false));
/// assert!(!should_hit(17, false, true));
/// assert!(should_hit(16, false, false));
/// ```
pub fn should_hit(total: u8, soft: bool, hits_soft_17: bool) -> bool {
    match total {
        0..=16 => true,
        17 => soft && hits_soft_17,
        _ => false,
    }
}

/// The house hand: first card face up, second face down until revealed.
#[derive(Debug, Clone)]
pub struct Dealer {
    pub(crate) hand: Hand,
    pub(crate) hole_revealed: bool,
    pub(crate) hits_soft_17: bool,
}

impl Dealer {
    pub fn new(hits_soft_17: bool) -> Self {
        Self { hand: Hand::new(Money::ZERO), hole_revealed: false, hits_soft_17 }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    pub fn hole_card(&self) -> Option<Card> {
        self.hand.cards().get(1).copied()
    }

    pub fn hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    pub fn hits_soft_17(&self) -> bool {
        self.hits_soft_17
    }

    /// Cards a player can see: just the up card until the hole is revealed.
    pub fn visible_cards(&self) -> &[Card] {
        let cards = self.hand.cards();
        if self.hole_revealed {
            cards
        } else {
            &cards[..cards.len().min(1)]
        }
    }

    pub fn total(&self) -> u8 {
        self.hand.total()
    }

    pub fn is_soft(&self) -> bool {
        self.hand.is_soft()
    }

    pub fn has_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    pub fn is_busted(&self) -> bool {
        self.hand.is_busted()
    }

    /// Ace or ten showing: the dealer checks the hole card for blackjack.
    pub fn should_peek(&self) -> bool {
        self.up_card().is_some_and(|c| c.is_ace() || c.is_ten_value())
    }

    pub fn should_hit(&self) -> bool {
        !self.is_busted() && should_hit(self.total(), self.is_soft(), self.hits_soft_17)
    }

    pub(crate) fn take(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    pub(crate) fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    pub(crate) fn clear(&mut self) {
        self.hand = Hand::new(Money::ZERO);
        self.hole_revealed = false;
    }
}
