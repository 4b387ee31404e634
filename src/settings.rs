//! Table configuration.

use crate::money::{Money, PayoutRatio};
use serde::{Deserialize, Serialize};

/// Deck counts a shoe can be built from.
pub const SUPPORTED_DECK_COUNTS: [u8; 5] = [1, 2, 4, 6, 8];

/// Upper bound on `max_splits` (four hands per player).
pub const MAX_SPLITS_LIMIT: u8 = 3;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("seat {0} is outside 1..=7")]
    InvalidSeat(u8),
    #[error("unsupported deck count {0}; expected 1, 2, 4, 6 or 8")]
    InvalidDeckCount(u8),
    #[error("table minimum must be positive")]
    NonPositiveMinimum,
    #[error("table maximum {max} must exceed minimum {min}")]
    MaximumNotAboveMinimum { min: Money, max: Money },
    #[error("starting bankroll {bankroll} is below table minimum {min}")]
    BankrollBelowMinimum { bankroll: Money, min: Money },
    #[error("max splits {0} is outside 1..=3")]
    InvalidMaxSplits(u8),
    #[error("payout ratio denominator must be non-zero")]
    ZeroDenominator,
}

/// Rules and limits for a table session.
///
/// ```
/// use blackjack_rs::settings::GameSettings;
/// use blackjack_rs::money::Money;
///
/// let settings = GameSettings::default();
/// assert_eq!(settings.table_min, Money::from_dollars(5));
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct GameSettings {
    pub table_min: Money,
    pub table_max: Money,
    pub starting_bankroll: Money,
    pub number_of_decks: u8,
    pub dealer_hits_soft_17: bool,
    pub blackjack_payout: PayoutRatio,
    pub insurance_payout: PayoutRatio,
    pub max_splits: u8,
    pub double_after_split: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            table_min: Money::from_dollars(5),
            table_max: Money::from_dollars(500),
            starting_bankroll: Money::from_dollars(1000),
            number_of_decks: 6,
            dealer_hits_soft_17: true,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_payout: PayoutRatio::TWO_TO_ONE,
            max_splits: 3,
            double_after_split: true,
        }
    }
}

impl GameSettings {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        table_min: Money,
        table_max: Money,
        starting_bankroll: Money,
        number_of_decks: u8,
        dealer_hits_soft_17: bool,
        blackjack_payout: PayoutRatio,
        insurance_payout: PayoutRatio,
        max_splits: u8,
        double_after_split: bool,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            table_min,
            table_max,
            starting_bankroll,
            number_of_decks,
            dealer_hits_soft_17,
            blackjack_payout,
            insurance_payout,
            max_splits,
            double_after_split,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_deck_count(self.number_of_decks)?;
        if self.table_min.is_zero() {
            return Err(ConfigError::NonPositiveMinimum);
        }
        if self.table_max <= self.table_min {
            return Err(ConfigError::MaximumNotAboveMinimum {
                min: self.table_min,
                max: self.table_max,
            });
        }
        if self.starting_bankroll < self.table_min {
            return Err(ConfigError::BankrollBelowMinimum {
                bankroll: self.starting_bankroll,
                min: self.table_min,
            });
        }
        if self.max_splits == 0 || self.max_splits > MAX_SPLITS_LIMIT {
            return Err(ConfigError::InvalidMaxSplits(self.max_splits));
        }
        if self.blackjack_payout.denominator() == 0 || self.insurance_payout.denominator() == 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        Ok(())
    }

    /// Whether `bet` is within the table limits (inclusive).
    pub fn bet_in_limits(&self, bet: Money) -> bool {
        bet >= self.table_min && bet <= self.table_max
    }
}

pub fn validate_deck_count(decks: u8) -> Result<(), ConfigError> {
    if SUPPORTED_DECK_COUNTS.contains(&decks) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDeckCount(decks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(d: u64) -> Money {
        Money::from_dollars(d)
    }

    #[test]
    fn defaults_are_valid() {
        let s = GameSettings::default();
        assert!(s.validate().is_ok());
        assert!(s.dealer_hits_soft_17);
        assert_eq!(s.max_splits, 3);
    }

    #[test]
    fn rejects_bad_limits() {
        let mut s = GameSettings::default();
        s.table_min = Money::ZERO;
        assert_eq!(s.validate(), Err(ConfigError::NonPositiveMinimum));

        let mut s = GameSettings::default();
        s.table_max = s.table_min;
        assert!(matches!(s.validate(), Err(ConfigError::MaximumNotAboveMinimum { .. })));

        let mut s = GameSettings::default();
        s.starting_bankroll = dollars(1);
        assert!(matches!(s.validate(), Err(ConfigError::BankrollBelowMinimum { .. })));

        for splits in [0u8, 4] {
            let mut s = GameSettings::default();
            s.max_splits = splits;
            assert_eq!(s.validate(), Err(ConfigError::InvalidMaxSplits(splits)));
        }
    }

    #[test]
    fn rejects_unsupported_decks() {
        for decks in [0u8, 3, 5, 7, 9] {
            let mut s = GameSettings::default();
            s.number_of_decks = decks;
            assert_eq!(s.validate(), Err(ConfigError::InvalidDeckCount(decks)));
        }
    }

    #[test]
    fn constructor_validates() {
        let err = GameSettings::new(
            dollars(10),
            dollars(10),
            dollars(100),
            6,
            true,
            PayoutRatio::THREE_TO_TWO,
            PayoutRatio::TWO_TO_ONE,
            3,
            true,
        );
        assert!(err.is_err());
        let ok = GameSettings::new(
            dollars(10),
            dollars(200),
            dollars(100),
            2,
            false,
            PayoutRatio::SIX_TO_FIVE,
            PayoutRatio::TWO_TO_ONE,
            1,
            false,
        )
        .unwrap();
        assert!(ok.bet_in_limits(dollars(10)));
        assert!(ok.bet_in_limits(dollars(200)));
        assert!(!ok.bet_in_limits(dollars(201)));
    }

    #[test]
    fn json_uses_cents_and_fills_defaults() {
        let s: GameSettings = serde_json::from_str(r#"{"table_min": 1000}"#).unwrap();
        assert_eq!(s.table_min, dollars(10));
        assert_eq!(s.number_of_decks, 6);
    }
}
