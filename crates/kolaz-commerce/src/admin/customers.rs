//! Admin customer table.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{CustomerId, OrderId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

/// An order in a customer's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerOrder {
    pub id: OrderId,
    /// Unix millis.
    pub date: i64,
    pub total: Money,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
    pub total_orders: i64,
    pub total_spent: Money,
    pub average_order_value: Money,
    /// Unix millis of the first order.
    pub joined_at: i64,
    /// Newest first.
    pub orders: Vec<CustomerOrder>,
}

/// Group orders into customers keyed by email.
///
/// Customers with a non-terminal order are active.
pub fn customers_from_orders(orders: &[Order], currency: Currency) -> Result<Vec<Customer>, CommerceError> {
    let mut grouped: BTreeMap<String, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        grouped
            .entry(order.email.to_lowercase())
            .or_default()
            .push(order);
    }

    grouped
        .into_iter()
        .map(|(email, mut placed)| {
            placed.sort_by_key(|o| std::cmp::Reverse(o.created_at));
            let total_spent = Money::checked_sum(placed.iter().map(|o| &o.total), currency)?;
            let total_orders = placed.len() as i64;
            let latest = placed[0];
            let active = placed.iter().any(|o| !o.status.is_terminal());

            Ok(Customer {
                id: CustomerId::new(email.clone()),
                name: latest.shipping_address.full_name.clone(),
                email,
                phone: latest.shipping_address.phone.clone(),
                status: if active {
                    CustomerStatus::Active
                } else {
                    CustomerStatus::Inactive
                },
                total_orders,
                total_spent,
                average_order_value: Money::new(total_spent.amount_cents / total_orders, currency),
                joined_at: placed.iter().map(|o| o.created_at).min().unwrap_or(0),
                orders: placed
                    .iter()
                    .map(|o| CustomerOrder {
                        id: o.id.clone(),
                        date: o.created_at,
                        total: o.total,
                        status: o.status,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Search box and status dropdown of the customer table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerFilter {
    /// Case-insensitive on name and email; plain substring on phone.
    pub search: String,
    /// `None` shows every status.
    pub status: Option<CustomerStatus>,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        let raw = self.search.trim();
        let needle = raw.to_lowercase();
        let matches_search = raw.is_empty()
            || customer.name.to_lowercase().contains(&needle)
            || customer.email.to_lowercase().contains(&needle)
            || customer.phone.contains(raw);
        matches_search && self.status.map_or(true, |s| s == customer.status)
    }

    pub fn apply<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerStats {
    pub total: usize,
    pub active: usize,
    /// Mean of the customers' average order values.
    pub average_order_value: Money,
    pub total_spent: Money,
}

impl CustomerStats {
    pub fn compute(customers: &[Customer], currency: Currency) -> Result<Self, CommerceError> {
        let total_spent = Money::checked_sum(customers.iter().map(|c| &c.total_spent), currency)?;
        let aov_sum =
            Money::checked_sum(customers.iter().map(|c| &c.average_order_value), currency)?;
        let average_order_value = if customers.is_empty() {
            Money::zero(currency)
        } else {
            Money::new(aov_sum.amount_cents / customers.len() as i64, currency)
        };

        Ok(Self {
            total: customers.len(),
            active: customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Active)
                .count(),
            average_order_value,
            total_spent,
        })
    }
}
