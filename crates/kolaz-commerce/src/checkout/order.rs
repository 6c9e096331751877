//! Order types.

use crate::cart::{CartItem, CartTotals};
use crate::checkout::Address;
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tracking ids shorter than this are rejected on lookup.
pub const MIN_TRACKING_ID_LEN: usize = 8;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order handed to the courier.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }

    /// The status that follows in the fulfilment sequence.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CommerceError::ValidationError(format!("unknown order status: {}", s)))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// SSLCommerz online gateway.
    #[serde(rename = "sslcommerz")]
    SslCommerz,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::SslCommerz => "sslcommerz",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::SslCommerz => "SSLCommerz",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" => Ok(PaymentMethod::CashOnDelivery),
            "sslcommerz" => Ok(PaymentMethod::SslCommerz),
            other => Err(CommerceError::ValidationError(format!(
                "unknown payment method: {}",
                other
            ))),
        }
    }
}

/// One step on the order tracking timeline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackingStep {
    pub label: &'static str,
    pub completed: bool,
}

/// A placed order. Orders only exist locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// `ORD-<unix millis>`
    pub id: OrderId,
    /// Customer user ID (None for guest).
    pub user_id: Option<UserId>,
    /// Contact email given at checkout.
    pub email: String,
    /// Snapshot of the cart lines.
    pub items: Vec<CartItem>,
    /// Breakdown at the time of ordering.
    pub totals: CartTotals,
    /// Amount charged.
    pub total: Money,
    /// Code of the coupon used, if any.
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
    /// Courier tracking id, set once shipped.
    pub tracking_id: Option<String>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Cancel the order.
    pub fn cancel(&mut self) -> Result<(), CommerceError> {
        if !self.status.can_cancel() {
            return Err(self.transition_error(OrderStatus::Cancelled));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Move to the next fulfilment status.
    pub fn advance(&mut self) -> Result<OrderStatus, CommerceError> {
        let next = self.status.next().ok_or_else(|| CommerceError::InvalidStatusTransition {
            from: self.status.as_str().to_string(),
            to: "next".to_string(),
        })?;
        self.status = next;
        Ok(next)
    }

    /// Mark the order shipped with a courier tracking id.
    pub fn ship(&mut self, tracking_id: impl Into<String>) -> Result<(), CommerceError> {
        if !matches!(self.status, OrderStatus::Pending | OrderStatus::Processing) {
            return Err(self.transition_error(OrderStatus::Shipped));
        }
        let tracking_id = tracking_id.into();
        if tracking_id.trim().len() < MIN_TRACKING_ID_LEN {
            return Err(CommerceError::ValidationError(format!(
                "tracking id must be at least {} characters",
                MIN_TRACKING_ID_LEN
            )));
        }
        self.tracking_id = Some(tracking_id.trim().to_string());
        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// Timeline shown on the tracking page.
    pub fn timeline(&self) -> Vec<TrackingStep> {
        let reached = match self.status {
            OrderStatus::Pending => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Cancelled => 1,
        };
        ["Order Placed", "Processing", "Shipped", "Delivered"]
            .into_iter()
            .enumerate()
            .map(|(i, label)| TrackingStep {
                label,
                completed: i < reached,
            })
            .collect()
    }

    fn transition_error(&self, to: OrderStatus) -> CommerceError {
        CommerceError::InvalidStatusTransition {
            from: self.status.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

/// Find an order by its id or its courier tracking id.
pub fn find_order<'a>(orders: &'a [Order], reference: &str) -> Result<&'a Order, CommerceError> {
    let reference = reference.trim();
    if reference.len() < MIN_TRACKING_ID_LEN {
        return Err(CommerceError::ValidationError(format!(
            "tracking id must be at least {} characters",
            MIN_TRACKING_ID_LEN
        )));
    }
    orders
        .iter()
        .find(|o| o.id.as_str() == reference || o.tracking_id.as_deref() == Some(reference))
        .ok_or_else(|| CommerceError::ValidationError(format!("no order found for {}", reference)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn order() -> Order {
        let zero = Money::zero(Currency::BDT);
        Order {
            id: OrderId::from_millis(1_700_000_000_000),
            user_id: None,
            email: "a@example.com".to_string(),
            items: vec![],
            totals: CartTotals {
                subtotal: zero,
                discount: zero,
                shipping: zero,
                total: zero,
            },
            total: zero,
            coupon_code: None,
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::CashOnDelivery,
            shipping_address: Address::new("A", "0171", "Road 1", "Dhaka", "1000"),
            created_at: 1_700_000_000_000,
            tracking_id: None,
        }
    }

    #[test]
    fn test_order_status_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(serde_json::to_string(&OrderStatus::Cancelled).unwrap(), "\"cancelled\"");
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::SslCommerz).unwrap(), "\"sslcommerz\"");
        assert_eq!("COD".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_advance_through_lifecycle() {
        let mut o = order();
        assert_eq!(o.advance().unwrap(), OrderStatus::Processing);
        assert_eq!(o.advance().unwrap(), OrderStatus::Shipped);
        assert_eq!(o.advance().unwrap(), OrderStatus::Delivered);
        assert!(o.advance().is_err());
        assert!(o.cancel().is_err());
    }

    #[test]
    fn test_ship_sets_tracking() {
        let mut o = order();
        assert!(o.ship("TRK1").is_err());
        o.ship("TRK123456789").unwrap();
        assert_eq!(o.status, OrderStatus::Shipped);
        assert_eq!(o.tracking_id.as_deref(), Some("TRK123456789"));
        assert!(o.ship("TRK987654321").is_err());
    }

    #[test]
    fn test_timeline() {
        let mut o = order();
        o.advance().unwrap();
        let done: Vec<_> = o.timeline().iter().map(|s| s.completed).collect();
        assert_eq!(done, vec![true, true, false, false]);
    }

    #[test]
    fn test_find_order() {
        let mut shipped = order();
        shipped.ship("TRK123456789").unwrap();
        let orders = vec![shipped];

        assert!(find_order(&orders, "ORD-1700000000000").is_ok());
        assert!(find_order(&orders, "TRK123456789").is_ok());
        assert!(find_order(&orders, "short").is_err());
        assert!(find_order(&orders, "TRK000000000").is_err());
    }
}
