//! Coupon codes.

use serde::{Deserialize, Serialize};

/// Message returned for codes that are not in the book.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid or expired coupon code";

/// A coupon applied to a cart: a code with a flat percentage rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Normalized (upper-case) code.
    pub code: String,
    /// Fraction of the subtotal taken off (0.10 = 10%).
    pub rate: f64,
    /// Confirmation message shown when applied.
    pub message: String,
}

impl Coupon {
    pub fn new(code: impl Into<String>, rate: f64, message: impl Into<String>) -> Self {
        Self {
            code: normalize_code(&code.into()),
            rate,
            message: message.into(),
        }
    }

    /// Rate as a whole-number percentage.
    pub fn percent(&self) -> i64 {
        (self.rate * 100.0).round() as i64
    }
}

/// Outcome of looking up a code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponValidation {
    pub is_valid: bool,
    /// Discount rate, 0 when invalid.
    pub rate: f64,
    pub message: String,
}

/// Static lookup table of the codes the store accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    /// Build a book from an explicit list.
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// Look up a code, trimming and upper-casing it first.
    pub fn find(&self, code: &str) -> Option<&Coupon> {
        let code = normalize_code(code);
        self.coupons.iter().find(|c| c.code == code)
    }

    pub fn validate(&self, code: &str) -> CouponValidation {
        match self.find(code) {
            Some(coupon) => CouponValidation {
                is_valid: true,
                rate: coupon.rate,
                message: coupon.message.clone(),
            },
            None => CouponValidation {
                is_valid: false,
                rate: 0.0,
                message: INVALID_COUPON_MESSAGE.to_string(),
            },
        }
    }

    /// Codes in the book, for hints.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.coupons.iter().map(|c| c.code.as_str())
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::new(vec![
            Coupon::new("KOLAZ10", 0.10, "10% discount applied!"),
            Coupon::new("WELCOME20", 0.20, "20% welcome discount applied!"),
            Coupon::new("SAVE15", 0.15, "15% discount applied!"),
        ])
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
