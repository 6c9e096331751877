//! Application state and the action reducer.
//!
//! `Store` is the single owner of session state. Every mutation goes through
//! [`Store::dispatch`], so the cart and coupon rules are enforced in one place.

use crate::cart::{Cart, CartTotals, Coupon, CouponBook, ShippingRule};
use crate::catalog::{Product, ProductColor};
use crate::checkout::{place_order, Address, CheckoutDetails, Order};
use crate::error::CommerceError;
use crate::money::Currency;
use crate::ids::{LineItemId, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A signed-in customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub addresses: Vec<Address>,
}

impl User {
    /// The address marked default, or the first one.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }
}

/// Everything the storefront keeps for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    pub cart: Cart,
    pub is_cart_open: bool,
    pub products: Vec<Product>,
    pub featured_products: Vec<Product>,
    pub best_seller_products: Vec<Product>,
    /// Orders placed this session, newest first.
    pub orders: Vec<Order>,
    pub colors: Vec<ProductColor>,
    pub categories: Vec<String>,
    pub is_loading: bool,
}

/// State changes the storefront can request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetUser(Option<User>),
    AddToCart {
        product: Product,
        size: String,
        color: String,
        quantity: i64,
    },
    RemoveFromCart(LineItemId),
    UpdateCartQuantity {
        id: LineItemId,
        quantity: i64,
    },
    ClearCart,
    ToggleCart,
    SetColors(Vec<ProductColor>),
    SetCategories(Vec<String>),
    SetProducts(Vec<Product>),
    SetFeaturedProducts(Vec<Product>),
    SetBestSellerProducts(Vec<Product>),
    SetOrders(Vec<Order>),
    SetLoading(bool),
    ApplyCoupon(String),
    RemoveCoupon,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetUser(_) => "set_user",
            Action::AddToCart { .. } => "add_to_cart",
            Action::RemoveFromCart(_) => "remove_from_cart",
            Action::UpdateCartQuantity { .. } => "update_cart_quantity",
            Action::ClearCart => "clear_cart",
            Action::ToggleCart => "toggle_cart",
            Action::SetColors(_) => "set_colors",
            Action::SetCategories(_) => "set_categories",
            Action::SetProducts(_) => "set_products",
            Action::SetFeaturedProducts(_) => "set_featured_products",
            Action::SetBestSellerProducts(_) => "set_best_seller_products",
            Action::SetOrders(_) => "set_orders",
            Action::SetLoading(_) => "set_loading",
            Action::ApplyCoupon(_) => "apply_coupon",
            Action::RemoveCoupon => "remove_coupon",
        }
    }
}

/// Owner of [`AppState`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: AppState,
    coupons: CouponBook,
    shipping: ShippingRule,
}

impl Store {
    /// A store whose cart is priced in the shipping rule's currency.
    pub fn new(coupons: CouponBook, shipping: ShippingRule) -> Self {
        let state = AppState {
            cart: Cart::new(shipping.currency()),
            ..AppState::default()
        };
        Self {
            state,
            coupons,
            shipping,
        }
    }

    /// Resume from saved state.
    ///
    /// An empty saved cart is moved to the store currency. A non-empty one keeps
    /// its currency, and checkout fails if that differs from the shipping rule.
    pub fn with_state(mut self, mut state: AppState) -> Self {
        if state.cart.is_empty() {
            state.cart.currency = self.currency();
        }
        self.state = state;
        self
    }

    pub fn currency(&self) -> Currency {
        self.shipping.currency()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn coupons(&self) -> &CouponBook {
        &self.coupons
    }

    pub fn shipping(&self) -> &ShippingRule {
        &self.shipping
    }

    /// Apply an action to the state.
    ///
    /// Failed actions leave the state unchanged.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: Action) -> Result<(), CommerceError> {
        let state = &mut self.state;
        match action {
            Action::SetUser(user) => state.user = user,
            Action::AddToCart {
                product,
                size,
                color,
                quantity,
            } => {
                state.cart.add_item(product, size, color, quantity)?;
            }
            Action::RemoveFromCart(id) => {
                if !state.cart.remove_item(&id) {
                    debug!(line = %id, "no such cart line");
                }
            }
            Action::UpdateCartQuantity { id, quantity } => {
                if !state.cart.update_quantity(&id, quantity)? {
                    debug!(line = %id, "no such cart line");
                }
            }
            Action::ClearCart => state.cart.clear(),
            Action::ToggleCart => state.is_cart_open = !state.is_cart_open,
            Action::SetColors(colors) => state.colors = colors,
            Action::SetCategories(categories) => state.categories = categories,
            Action::SetProducts(products) => state.products = products,
            Action::SetFeaturedProducts(products) => state.featured_products = products,
            Action::SetBestSellerProducts(products) => state.best_seller_products = products,
            Action::SetOrders(orders) => state.orders = orders,
            Action::SetLoading(loading) => state.is_loading = loading,
            Action::ApplyCoupon(code) => {
                state.cart.apply_coupon(&code, &self.coupons)?;
            }
            Action::RemoveCoupon => {
                state.cart.remove_coupon();
            }
        }
        Ok(())
    }

    /// Apply a coupon and return it, for showing its message.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Coupon, CommerceError> {
        self.state
            .cart
            .apply_coupon(code, &self.coupons)
            .map(Coupon::clone)
    }

    /// Cart totals including shipping.
    pub fn checkout_totals(&self) -> Result<CartTotals, CommerceError> {
        self.state.cart.totals(Some(&self.shipping))
    }

    /// Place an order from the cart and keep it in the session.
    pub fn checkout(&mut self, mut details: CheckoutDetails) -> Result<Order, CommerceError> {
        if details.user_id.is_none() {
            details.user_id = self.state.user.as_ref().map(|u| u.id.clone());
        }
        let order = place_order(&mut self.state.cart, details, &self.shipping)?;
        self.state.orders.insert(0, order.clone());
        Ok(order)
    }

    pub fn find_product(&self, id: &str) -> Result<&Product, CommerceError> {
        self.state
            .products
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}
