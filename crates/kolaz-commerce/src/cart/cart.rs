//! Cart and cart item types.

use crate::cart::coupon::normalize_code;
use crate::cart::{CartTotals, Coupon, CouponBook, ShippingRule};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A product in the cart with its chosen variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// `{product_id}-{size}-{color}`
    pub id: LineItemId,
    /// Product snapshot taken when the item was added.
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl CartItem {
    pub fn new(
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Self {
        let size = size.into();
        let color = color.into();
        Self {
            id: LineItemId::for_variant(&product.id, &size, &color),
            product,
            size,
            color,
            quantity,
        }
    }

    /// Display price of one unit.
    pub fn unit_price(&self) -> Money {
        self.product.display_price()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// "Size: 32 | Color: Indigo"
    pub fn variant_label(&self) -> String {
        format!("Size: {} | Color: {}", self.size, self.color)
    }
}

/// The shopping cart, with at most one coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// Applied coupon, if any.
    pub coupon: Option<Coupon>,
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart in a currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            coupon: None,
            currency,
        }
    }

    /// Add a product variant to the cart.
    ///
    /// Adding a size and color already in the cart increases that line's
    /// quantity instead of creating a second line.
    pub fn add_item(
        &mut self,
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let price = product.display_price();
        if price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: price.currency.code().to_string(),
            });
        }

        let item = CartItem::new(product, size, color, quantity);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            debug!(line = %existing.id, quantity = new_quantity, "merged cart line");
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let id = item.id.clone();
        debug!(line = %id, quantity, "added cart line");
        self.items.push(item);
        Ok(id)
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Returns whether a line was changed.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.id == line_item_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Remove every line and the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    /// Apply a coupon code from the book.
    pub fn apply_coupon(&mut self, code: &str, book: &CouponBook) -> Result<&Coupon, CommerceError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(CommerceError::EmptyCouponCode);
        }
        if let Some(applied) = &self.coupon {
            return Err(CommerceError::CouponAlreadyApplied(applied.code.clone()));
        }

        let coupon = book
            .find(&code)
            .cloned()
            .ok_or(CommerceError::InvalidDiscountCode(code))?;

        debug!(code = %coupon.code, rate = coupon.rate, "applied coupon");
        Ok(&*self.coupon.insert(coupon))
    }

    /// Drop the applied coupon. Returns it, if there was one.
    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Sum of each line's display price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;

        Money::checked_sum(lines.iter(), self.currency)
    }

    /// Discount rate of the applied coupon, 0 without one.
    pub fn discount_rate(&self) -> f64 {
        self.coupon.as_ref().map(|c| c.rate).unwrap_or(0.0)
    }

    /// Totals with the coupon applied. Pass a shipping rule for the
    /// checkout view; `None` leaves shipping out.
    pub fn totals(&self, shipping: Option<&ShippingRule>) -> Result<CartTotals, CommerceError> {
        CartTotals::compute(self.subtotal()?, self.discount_rate(), shipping)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major(price, Currency::BDT))
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        let id = cart.add_item(product("P1", 1200), "32", "Indigo", 2).unwrap();

        assert_eq!(id.as_str(), "P1-32-Indigo");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_same_variant_merges() {
        let mut cart = Cart::default();
        cart.add_item(product("P1", 1200), "32", "Indigo", 1).unwrap();
        cart.add_item(product("P1", 1200), "32", "Indigo", 2).unwrap();
        cart.add_item(product("P1", 1200), "34", "Indigo", 1).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_add_invalid_quantity() {
        let mut cart = Cart::default();
        let result = cart.add_item(product("P1", 100), "M", "Black", 0);
        assert_eq!(result, Err(CommerceError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_in_other_currency() {
        let mut cart = Cart::new(Currency::USD);
        let result = cart.add_item(product("P1", 100), "M", "Black", 1);
        assert_eq!(
            result,
            Err(CommerceError::CurrencyMismatch {
                expected: "USD".into(),
                got: "BDT".into(),
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_exceeds_limit() {
        let mut cart = Cart::default();
        cart.add_item(product("P1", 100), "M", "Black", MAX_QUANTITY_PER_ITEM).unwrap();
        let result = cart.add_item(product("P1", 100), "M", "Black", 1);
        assert!(matches!(result, Err(CommerceError::QuantityExceedsLimit(10000, _))));
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::default();
        let id = cart.add_item(product("P1", 100), "M", "Black", 3).unwrap();

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.items[0].quantity, 5);

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
        assert!(!cart.update_quantity(&id, 2).unwrap());
    }

    #[test]
    fn test_subtotal_uses_sale_price() {
        let mut cart = Cart::default();
        let mut p = product("P1", 2000);
        p.sale_price = Some(Money::from_major(1500, Currency::BDT));
        cart.add_item(p, "M", "Black", 2).unwrap();
        cart.add_item(product("P2", 500), "L", "White", 1).unwrap();

        assert_eq!(cart.subtotal().unwrap(), Money::from_major(3500, Currency::BDT));
    }

    #[test]
    fn test_one_coupon_at_a_time() {
        let book = CouponBook::default();
        let mut cart = Cart::default();

        assert_eq!(cart.apply_coupon("   ", &book), Err(CommerceError::EmptyCouponCode));
        assert_eq!(
            cart.apply_coupon("nope", &book),
            Err(CommerceError::InvalidDiscountCode("NOPE".to_string()))
        );

        let applied = cart.apply_coupon(" kolaz10", &book).unwrap();
        assert_eq!(applied.code, "KOLAZ10");

        assert_eq!(
            cart.apply_coupon("SAVE15", &book),
            Err(CommerceError::CouponAlreadyApplied("KOLAZ10".to_string()))
        );

        assert!(cart.remove_coupon().is_some());
        assert!(cart.apply_coupon("SAVE15", &book).is_ok());
    }

    #[test]
    fn test_totals() {
        let book = CouponBook::default();
        let mut cart = Cart::default();
        cart.add_item(product("P1", 1000), "M", "Black", 1).unwrap();
        cart.apply_coupon("WELCOME20", &book).unwrap();

        let sidebar = cart.totals(None).unwrap();
        assert_eq!(sidebar.total, Money::from_major(800, Currency::BDT));

        let checkout = cart.totals(Some(&ShippingRule::default())).unwrap();
        assert_eq!(checkout.shipping, Money::from_major(60, Currency::BDT));
        assert_eq!(checkout.total, Money::from_major(860, Currency::BDT));
    }

    #[test]
    fn test_clear_drops_coupon() {
        let mut cart = Cart::default();
        cart.add_item(product("P1", 100), "M", "Black", 1).unwrap();
        cart.apply_coupon("SAVE15", &CouponBook::default()).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }

    #[test]
    fn test_subtotal_currency_mismatch() {
        // A resumed session can hold lines priced before the store currency changed.
        let mut cart = Cart::new(Currency::USD);
        cart.items.push(CartItem::new(product("P1", 100), "M", "Black", 1));
        assert!(matches!(
            cart.subtotal(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }
}
