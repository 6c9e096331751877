//! Cart totals and shipping.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat shipping fee waived above a subtotal threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShippingRule {
    /// Shipping is free when the subtotal is strictly above this.
    pub free_threshold: Money,
    /// Fee charged otherwise.
    pub flat_fee: Money,
}

impl ShippingRule {
    pub fn new(free_threshold: Money, flat_fee: Money) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    pub fn currency(&self) -> Currency {
        self.flat_fee.currency
    }

    /// Shipping charged for a subtotal in the rule's currency.
    pub fn fee_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        for rule_money in [&self.free_threshold, &self.flat_fee] {
            if rule_money.currency != subtotal.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: rule_money.currency.code().to_string(),
                    got: subtotal.currency.code().to_string(),
                });
            }
        }

        if subtotal.amount_cents > self.free_threshold.amount_cents {
            Ok(Money::zero(subtotal.currency))
        } else {
            Ok(self.flat_fee)
        }
    }
}

impl Default for ShippingRule {
    /// Free over ৳2000, ৳60 otherwise.
    fn default() -> Self {
        Self::new(
            Money::from_major(2000, Currency::BDT),
            Money::from_major(60, Currency::BDT),
        )
    }
}

/// Price breakdown of a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of display price times quantity.
    pub subtotal: Money,
    /// Coupon discount.
    pub discount: Money,
    /// Shipping (zero when not requested).
    pub shipping: Money,
    /// subtotal - discount + shipping
    pub total: Money,
}

impl CartTotals {
    /// Compute totals from a subtotal, coupon rate and optional shipping rule.
    pub fn compute(
        subtotal: Money,
        rate: f64,
        shipping: Option<&ShippingRule>,
    ) -> Result<Self, CommerceError> {
        let discount = subtotal.multiply_rate(rate);
        let shipping = match shipping {
            Some(rule) => rule.fee_for(&subtotal)?,
            None => Money::zero(subtotal.currency),
        };

        let total = subtotal
            .try_subtract(&discount)
            .and_then(|m| m.try_add(&shipping))
            .ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: shipping.currency.code().to_string(),
            })?;

        Ok(Self {
            subtotal,
            discount,
            shipping,
            total,
        })
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bdt(amount: i64) -> Money {
        Money::from_major(amount, Currency::BDT)
    }

    #[test]
    fn test_shipping_threshold_is_strict() {
        let rule = ShippingRule::default();
        assert_eq!(rule.fee_for(&bdt(2000)), Ok(bdt(60)));
        assert!(rule.fee_for(&bdt(2001)).unwrap().is_zero());
        assert_eq!(rule.fee_for(&bdt(0)), Ok(bdt(60)));
    }

    #[test]
    fn test_shipping_rejects_other_currency() {
        let rule = ShippingRule::default();
        assert_eq!(
            rule.fee_for(&Money::from_major(10, Currency::USD)),
            Err(CommerceError::CurrencyMismatch {
                expected: "BDT".into(),
                got: "USD".into(),
            })
        );
        assert!(CartTotals::compute(Money::from_major(10, Currency::USD), 0.0, Some(&rule)).is_err());
        assert!(CartTotals::compute(Money::from_major(10, Currency::USD), 0.0, None).is_ok());
    }

    #[test]
    fn test_totals_with_coupon_and_shipping() {
        let totals = CartTotals::compute(bdt(1500), 0.10, Some(&ShippingRule::default())).unwrap();
        assert_eq!(totals.discount, bdt(150));
        assert_eq!(totals.shipping, bdt(60));
        assert_eq!(totals.total, bdt(1410));
        assert!(totals.has_discount());
    }

    #[test]
    fn test_totals_without_shipping() {
        let totals = CartTotals::compute(bdt(3500), 0.15, None).unwrap();
        assert_eq!(totals.discount, bdt(525));
        assert!(totals.is_free_shipping());
        assert_eq!(totals.total, bdt(2975));
    }
}
