//! Fixed-point money for bids and per-slot values.
//!
//! ## Overview
//!
//! Bids arrive already priced by the upstream pricing stage. The referee only
//! compares and sums them, so they are stored as `u64` scaled by 10^8 and
//! wrapped in [`Money`] to keep raw integers and amounts apart.
//!
//! ## Per-Slot Value
//!
//! A bundle's bid covers all of its sub-items. Ranking needs the value of one
//! slot, which is `bid / count`. That division goes through `rust_decimal`
//! so a bid of 1.00 split three ways still ranks correctly against 0.33.
//!
//! ## Examples
//!
//! ```
//! use ad_referee::types::money::{Money, SCALE};
//!
//! let bid = Money::parse("2.5").unwrap();
//! assert_eq!(bid.raw(), 250_000_000);
//! assert_eq!(bid.to_string(), "2.5");
//! assert_eq!(Money::from_units(3).raw(), 3 * SCALE);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

/// A non-negative monetary amount in fixed-point (scaled by 10^8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Wrap an already scaled value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Money(raw)
    }

    /// Whole currency units, e.g. `from_units(7)` is 7.00000000.
    ///
    /// Saturates at `u64::MAX` rather than wrapping.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Money(units.saturating_mul(SCALE))
    }

    /// Parse a decimal string such as `"0.35"`.
    ///
    /// Returns `None` for negative, malformed, or out-of-range input.
    pub fn parse(s: &str) -> Option<Self> {
        Decimal::from_str(s).ok().and_then(Self::from_decimal)
    }

    /// Round a decimal amount to the nearest 10^-8.
    ///
    /// Returns `None` below zero or past `u64::MAX` raw units.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() {
            return None;
        }
        amount
            .checked_mul(Decimal::from(SCALE))?
            .round_dp(0)
            .to_u64()
            .map(Money)
    }

    /// The scaled integer value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Exact decimal form of this amount.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(SCALE)
    }

    /// Value of one slot when this amount pays for `slots` slots.
    ///
    /// A zero slot count yields the amount itself; equipment that occupies no
    /// slots is ranked by its bid like a single.
    pub fn per_slot(self, slots: usize) -> Decimal {
        let total = self.to_decimal();
        if slots <= 1 {
            return total;
        }
        total
            .checked_div(Decimal::from(slots as u64))
            .unwrap_or(total)
    }

    /// Saturating addition.
    #[inline]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_smallest_unit() {
        assert_eq!(Money::parse("0.00000001"), Some(Money::from_raw(1)));
        assert_eq!(Money::parse("1"), Some(Money::from_units(1)));
        assert_eq!(Money::parse("0"), Some(Money::ZERO));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "abc", "-2", "1e40"] {
            assert!(Money::parse(input).is_none(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_from_decimal_rounds() {
        let d = Decimal::from_str("0.123456789").unwrap();
        assert_eq!(Money::from_decimal(d), Some(Money::from_raw(12_345_679)));
    }

    #[test]
    fn test_money_parse_and_display() {
        let m = Money::parse("12.75").unwrap();
        assert_eq!(m.raw(), 1_275_000_000);
        assert_eq!(m.to_string(), "12.75");
        assert_eq!(Money::from_units(3).to_string(), "3");
        assert!(Money::parse("-0.1").is_none());
    }

    #[test]
    fn test_money_ordering() {
        assert!(Money::from_units(7) > Money::from_units(3));
        assert!(Money::parse("0.1").unwrap() < Money::parse("0.2").unwrap());
    }

    #[test]
    fn test_money_sum_saturates() {
        let total: Money = [Money::from_units(1), Money::from_units(2), Money::from_units(3)]
            .iter()
            .sum();
        assert_eq!(total, Money::from_units(6));

        let huge = Money::from_raw(u64::MAX) + Money::from_units(1);
        assert_eq!(huge.raw(), u64::MAX);
    }

    #[test]
    fn test_per_slot_single() {
        let bid = Money::from_units(7);
        assert_eq!(bid.per_slot(1), Decimal::from(7));
        assert_eq!(bid.per_slot(0), Decimal::from(7));
    }

    #[test]
    fn test_per_slot_bundle() {
        let bid = Money::from_units(6);
        assert_eq!(bid.per_slot(3), Decimal::from(2));

        // 1.00 over three slots still outranks 0.33
        let third = Money::from_units(1).per_slot(3);
        assert!(third > Money::parse("0.33").unwrap().to_decimal());
        assert!(third < Money::parse("0.34").unwrap().to_decimal());
    }
}
