//! Checkout module.
//!
//! Contains addresses, orders and the simulated order placement.

mod address;
mod flow;
mod order;

pub use address::Address;
pub use flow::{place_order, place_order_at, CheckoutDetails};
pub use order::{
    find_order, Order, OrderStatus, PaymentMethod, TrackingStep, MIN_TRACKING_ID_LEN,
};
