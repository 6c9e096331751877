//! Admin order table.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One row of the admin order table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    /// Customer name.
    pub customer: String,
    pub email: String,
    pub total: Money,
    pub status: OrderStatus,
    /// Unix millis.
    pub created_at: i64,
    pub item_count: i64,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            customer: order.shipping_address.full_name.clone(),
            email: order.email.clone(),
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            item_count: order.item_count(),
        }
    }
}

/// Search box and status dropdown of the order table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderFilter {
    /// Case-insensitive substring of id, customer or email.
    pub search: String,
    /// `None` shows every status.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &OrderSummary) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || order.id.as_str().to_lowercase().contains(&needle)
            || order.customer.to_lowercase().contains(&needle)
            || order.email.to_lowercase().contains(&needle);
        let matches_status = self.status.map_or(true, |s| s == order.status);
        matches_search && matches_status
    }

    pub fn apply<'a>(&self, orders: &'a [OrderSummary]) -> Vec<&'a OrderSummary> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Header cards of the order table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStats {
    pub total_orders: usize,
    /// Count per status, in lifecycle order.
    pub by_status: Vec<(OrderStatus, usize)>,
    /// Sum of every order total.
    pub revenue: Money,
}

impl OrderStats {
    pub fn compute(orders: &[OrderSummary], currency: Currency) -> Result<Self, CommerceError> {
        let by_status = OrderStatus::ALL
            .into_iter()
            .map(|status| (status, orders.iter().filter(|o| o.status == status).count()))
            .collect();
        let revenue = Money::checked_sum(orders.iter().map(|o| &o.total), currency)?;

        Ok(Self {
            total_orders: orders.len(),
            by_status,
            revenue,
        })
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}
