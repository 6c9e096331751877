//! Shopping cart module.
//!
//! Contains the cart, its items, coupons, and totals.

mod cart;
mod coupon;
mod pricing;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use coupon::{Coupon, CouponBook, CouponValidation, INVALID_COUPON_MESSAGE};
pub use pricing::{CartTotals, ShippingRule};
