//! Money type for representing monetary values.
//!
//! Uses minor-unit integer amounts so that cart arithmetic never drifts.
//! Storefront prices arrive from the API as major units (taka) and are
//! converted once, at the mapping boundary.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BDT,
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "BDT").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BDT => "BDT",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "৳").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BDT => "\u{09f3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "BDT" => Some(Currency::BDT),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (poisha for BDT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a major-unit amount.
    ///
    /// ```
    /// use kolaz_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1499.5, Currency::BDT);
    /// assert_eq!(price.amount_cents, 149950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a Money value from whole major units.
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "৳1,499.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format the amount with thousands separators and no symbol.
    pub fn display_amount(&self) -> String {
        let per = self.currency.minor_per_major();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let major = abs / per as u64;
        let minor = abs % per as u64;

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            format!("{}{}", sign, grouped)
        } else {
            format!("{}{}.{:0places$}", sign, grouped, minor)
        }
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a fractional rate (e.g. `0.15` for 15%), rounding half away from zero.
    pub fn multiply_rate(&self, rate: f64) -> Money {
        let amount = (self.amount_cents as f64 * rate).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Sum Money values, returning None on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Sum Money values in `currency`, telling a currency mismatch apart from overflow.
    pub fn checked_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        let mut total = Money::zero(currency);
        for m in iter {
            if m.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: m.currency.code().to_string(),
                });
            }
            total = total.try_add(m).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }
}

impl PartialOrd for Money {
    /// Money values only compare within one currency.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount_cents.cmp(&other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(2000, Currency::BDT);
        assert_eq!(m.amount_cents, 200_000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::from_major(12500, Currency::BDT).display(), "\u{09f3}12,500.00");
        assert_eq!(Money::new(1_000_000, Currency::JPY).display(), "\u{00a5}1,000,000");
        assert_eq!(Money::new(-150, Currency::USD).display_amount(), "-1.50");
    }

    #[test]
    fn test_money_checked_arithmetic() {
        let a = Money::new(1000, Currency::BDT);
        let b = Money::new(300, Currency::BDT);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1300);
        assert_eq!(a.try_subtract(&b).unwrap().amount_cents, 700);
        assert_eq!(a.try_multiply(3).unwrap().amount_cents, 3000);
        assert!(Money::new(i64::MAX, Currency::BDT).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let bdt = Money::new(1000, Currency::BDT);
        let usd = Money::new(1000, Currency::USD);
        assert!(bdt.try_add(&usd).is_none());
        assert!(bdt.partial_cmp(&usd).is_none());
    }

    #[test]
    fn test_multiply_rate_rounds() {
        let m = Money::new(333, Currency::BDT);
        assert_eq!(m.multiply_rate(0.1).amount_cents, 33);
        assert_eq!(Money::new(350_000, Currency::BDT).multiply_rate(0.15).amount_cents, 52_500);
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::new(100, Currency::BDT), Money::new(250, Currency::BDT)];
        let total = Money::try_sum(values.iter(), Currency::BDT).unwrap();
        assert_eq!(total.amount_cents, 350);

        let mixed = [Money::new(100, Currency::BDT), Money::new(250, Currency::USD)];
        assert!(Money::try_sum(mixed.iter(), Currency::BDT).is_none());
    }

    #[test]
    fn test_checked_sum_reports_mismatch_and_overflow() {
        let mixed = [Money::new(100, Currency::BDT), Money::new(250, Currency::USD)];
        assert_eq!(
            Money::checked_sum(mixed.iter(), Currency::BDT),
            Err(CommerceError::CurrencyMismatch {
                expected: "BDT".into(),
                got: "USD".into(),
            })
        );

        let huge = [Money::new(i64::MAX, Currency::BDT), Money::new(1, Currency::BDT)];
        assert_eq!(Money::checked_sum(huge.iter(), Currency::BDT), Err(CommerceError::Overflow));
        assert_eq!(
            Money::checked_sum([].iter(), Currency::USD),
            Ok(Money::zero(Currency::USD))
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("BDT"), Some(Currency::BDT));
        assert_eq!(Currency::from_code(" eur "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
