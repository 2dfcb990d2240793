//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are stored as plain decimals; `Price` pairs an amount with
//! a currency for display. The storefront trades in rupees and renders them
//! with Indian digit grouping (`₹1,23,456`).

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a rupee price.
    #[must_use]
    pub const fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }
}

impl fmt::Display for Price {
    /// Formats as symbol, grouped whole units, and two-digit fraction when non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            f.write_str("-")?;
        }

        let abs = rounded.abs();
        let whole = abs.trunc();
        let cents = ((abs - whole) * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u32()
            .unwrap_or(0);

        let digits = whole.normalize().to_string();
        write!(
            f,
            "{}{}",
            self.currency_code.symbol(),
            group_digits(&digits, self.currency_code.group_size())
        )?;

        if cents > 0 {
            write!(f, ".{cents:02}")?;
        }
        Ok(())
    }
}

/// Insert thousands separators.
///
/// The lowest group is always three digits; higher groups use `group_size`
/// (2 for the Indian system, 3 for the Western one).
fn group_digits(digits: &str, group_size: usize) -> String {
    let mut reversed = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in digits.chars().rev().enumerate() {
        if i >= 3 && (i - 3) % group_size == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }
    reversed.chars().rev().collect()
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
        }
    }

    /// Size of digit groups above the lowest thousand.
    #[must_use]
    const fn group_size(self) -> usize {
        match self {
            Self::INR => 2,
            Self::USD => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(Price::inr(Decimal::from(690)).to_string(), "₹690");
        assert_eq!(Price::inr(Decimal::ZERO).to_string(), "₹0");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(Price::inr(Decimal::from(1699)).to_string(), "₹1,699");
        assert_eq!(Price::inr(Decimal::from(15_000)).to_string(), "₹15,000");
        assert_eq!(Price::inr(Decimal::from(123_456)).to_string(), "₹1,23,456");
        assert_eq!(
            Price::inr(Decimal::from(12_345_678)).to_string(),
            "₹1,23,45,678"
        );
    }

    #[test]
    fn test_western_grouping() {
        let price = Price::new(Decimal::from(1_234_567), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$1,234,567");
    }

    #[test]
    fn test_fraction_rendered_with_two_digits() {
        assert_eq!(Price::inr(Decimal::new(12_505, 1)).to_string(), "₹1,250.50");
        assert_eq!(Price::inr(Decimal::new(1999, 2)).to_string(), "₹19.99");
    }

    #[test]
    fn test_trailing_zero_scale_is_ignored() {
        assert_eq!(Price::inr(Decimal::new(169_900, 2)).to_string(), "₹1,699");
    }
}
