//! Currency amounts and payout ratios.
//!
//! Amounts are whole cents so bankroll arithmetic is exact. Anything that
//! divides (half-bet insurance, 3:2 payouts) floors to the cent.

use crate::settings::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// A non-negative amount of money, stored as cents.
///
/// ```
/// use blackjack_rs::money::Money;
///
/// let bet = Money::from_dollars(25);
/// assert_eq!(bet.half().to_string(), "$12.50");
/// assert_eq!("$12.50".parse::<Money>().unwrap(), bet.half());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Money(dollars.saturating_mul(100))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Half the amount, floored to the cent.
    pub const fn half(self) -> Self {
        Money(self.0 / 2)
    }

    /// Apply a payout ratio, flooring to the cent.
    pub fn scale(self, ratio: PayoutRatio) -> Self {
        let scaled = u128::from(self.0) * u128::from(ratio.numerator)
            / u128::from(ratio.denominator.max(1));
        Money(u64::try_from(scaled).unwrap_or(u64::MAX))
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// Signed difference in cents, used for net round results.
    pub fn signed_diff(self, rhs: Money) -> i64 {
        let diff = i128::from(self.0) - i128::from(rhs.0);
        i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<u64> for Money {
    type Output = Money;
    fn mul(self, rhs: u64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

/// Format a signed cent amount the way round results are shown: `+$15`, `-$10`.
pub fn format_net(cents: i64) -> String {
    let sign = if cents < 0 { '-' } else { '+' };
    format!("{sign}{}", Money::from_cents(cents.unsigned_abs()))
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoneyParseError {
    #[error("invalid amount: '{0}'")]
    Invalid(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoneyParseError::Invalid(s.to_string());
        let t = s.trim();
        let t = t.strip_prefix('$').unwrap_or(t);
        let (whole, frac) = match t.split_once('.') {
            Some((w, f)) => (w, f),
            None => (t, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let dollars: u64 = whole.parse().map_err(|_| invalid())?;
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(invalid)
    }
}

/// A payout ratio such as 3:2 (blackjack) or 2:1 (insurance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutRatio {
    numerator: u32,
    denominator: u32,
}

impl PayoutRatio {
    pub const EVEN: PayoutRatio = PayoutRatio { numerator: 1, denominator: 1 };
    pub const THREE_TO_TWO: PayoutRatio = PayoutRatio { numerator: 3, denominator: 2 };
    pub const SIX_TO_FIVE: PayoutRatio = PayoutRatio { numerator: 6, denominator: 5 };
    pub const TWO_TO_ONE: PayoutRatio = PayoutRatio { numerator: 2, denominator: 1 };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ConfigError> {
        if denominator == 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        Ok(Self { numerator, denominator })
    }

    pub const fn numerator(self) -> u32 {
        self.numerator
    }

    pub const fn denominator(self) -> u32 {
        self.denominator
    }
}

impl fmt::Display for PayoutRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}
