//! Order placement.

use crate::cart::{Cart, ShippingRule};
use crate::checkout::{Address, Order, OrderStatus, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// What the customer enters at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutDetails {
    pub user_id: Option<UserId>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutDetails {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Shipping address built from the form fields.
    pub fn shipping_address(&self) -> Address {
        Address::new(
            self.full_name(),
            self.phone.trim(),
            self.address.trim(),
            self.city.trim(),
            self.zip.trim(),
        )
    }
}

/// Place an order from the cart.
///
/// The order is only recorded locally; nothing is submitted. On success the
/// cart is emptied and its coupon removed.
#[instrument(skip_all, fields(items = cart.items.len()))]
pub fn place_order(
    cart: &mut Cart,
    details: CheckoutDetails,
    shipping: &ShippingRule,
) -> Result<Order, CommerceError> {
    place_order_at(cart, details, shipping, current_millis())
}

/// [`place_order`] with an explicit timestamp (unix millis).
pub fn place_order_at(
    cart: &mut Cart,
    details: CheckoutDetails,
    shipping: &ShippingRule,
    now_millis: i64,
) -> Result<Order, CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let totals = cart.totals(Some(shipping))?;
    let order = Order {
        id: OrderId::from_millis(now_millis),
        user_id: details.user_id.clone(),
        email: details.email.trim().to_string(),
        items: cart.items.clone(),
        totals,
        total: totals.total,
        coupon_code: cart.coupon.as_ref().map(|c| c.code.clone()),
        status: OrderStatus::Pending,
        payment_method: details.payment_method,
        shipping_address: details.shipping_address(),
        created_at: now_millis,
        tracking_id: None,
    };

    cart.clear();
    info!(order = %order.id, total = %order.total, "order placed");
    Ok(order)
}

fn current_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
