//! Storefront domain types and logic for Kolaz.
//!
//! This crate holds everything the storefront and the admin back-office
//! compute locally, independent of where the data came from:
//!
//! - **Catalog**: the flat product shape shown in listings and detail pages
//! - **Cart**: line items keyed by variant, the coupon table, totals
//! - **Checkout**: addresses, payment methods, simulated order placement
//! - **Search**: shop filters, sorting, pagination and facets
//! - **Store**: the session state and the actions that mutate it
//! - **Admin**: order, customer and product listings with summary stats
//!
//! # Example
//!
//! ```rust,ignore
//! use kolaz_commerce::prelude::*;
//!
//! let mut store = Store::default();
//! store.dispatch(Action::AddToCart {
//!     product: product.clone(),
//!     size: "32".to_string(),
//!     color: "Indigo".to_string(),
//!     quantity: 1,
//! })?;
//! store.dispatch(Action::ApplyCoupon("kolaz10".to_string()))?;
//!
//! let totals = store.state().cart.totals(Some(&ShippingRule::default()))?;
//! println!("Total: {}", totals.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{FeatureFlag, Product, ProductColor};

    // Cart
    pub use crate::cart::{
        Cart, CartItem, CartTotals, Coupon, CouponBook, CouponValidation, ShippingRule,
    };

    // Checkout
    pub use crate::checkout::{
        place_order, Address, CheckoutDetails, Order, OrderStatus, PaymentMethod,
    };

    // Search
    pub use crate::search::{Pagination, SearchResults, ShopFilter, ShopQuery, SortOption};

    // Store
    pub use crate::store::{Action, AppState, Store, User};
}
