//! Cart management. The cart lives in the saved session.

use anyhow::{bail, Context as _, Result};
use kolaz_commerce::cart::{Cart, CartTotals};
use kolaz_commerce::catalog::Product;
use kolaz_commerce::store::{Action, Store};
use kolaz_commerce::LineItemId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;

    match args.command {
        CartCommand::Show => {}
        CartCommand::Add {
            id,
            size,
            color,
            quantity,
        } => {
            let catalog = ctx.catalog()?;
            let product = catalog
                .by_id(&id)
                .await
                .with_context(|| format!("Failed to load product {}", id))?;
            check_variant(&product, &size, &color)?;
            let name = product.name.clone();
            store.dispatch(Action::AddToCart {
                product,
                size,
                color,
                quantity,
            })?;
            ctx.output
                .success(&format!("Added {} x {} to cart", quantity, name));
        }
        CartCommand::Update { line, quantity } => {
            let id = existing_line(&store, &line)?;
            store.dispatch(Action::UpdateCartQuantity { id, quantity })?;
            if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", line));
            } else {
                ctx.output
                    .success(&format!("Set {} to quantity {}", line, quantity));
            }
        }
        CartCommand::Remove { line } => {
            let id = existing_line(&store, &line)?;
            store.dispatch(Action::RemoveFromCart(id))?;
            ctx.output.success(&format!("Removed {}", line));
        }
        CartCommand::Clear => {
            store.dispatch(Action::ClearCart)?;
            ctx.output.success("Cart cleared");
        }
        CartCommand::Coupon { code } => {
            let coupon = store.apply_coupon(&code)?;
            ctx.output.success(&coupon.message);
        }
        CartCommand::Uncoupon => {
            if store.state().cart.coupon.is_none() {
                ctx.output.info("No coupon applied");
            } else {
                store.dispatch(Action::RemoveCoupon)?;
                ctx.output.success("Coupon removed");
            }
        }
    }

    ctx.save_store(&store)?;
    print_cart(ctx, &store)
}

/// Reject sizes and colors the product is not offered in.
fn check_variant(product: &Product, size: &str, color: &str) -> Result<()> {
    if !product.sizes.is_empty() && !product.has_size(size) {
        bail!(
            "{} is not available in size {} (sizes: {})",
            product.name,
            size,
            product.sizes.join(", ")
        );
    }
    if !product.colors.is_empty() && !product.has_color(color) {
        bail!(
            "{} is not available in {} (colors: {})",
            product.name,
            color,
            product.color_names().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}

fn existing_line(store: &Store, line: &str) -> Result<LineItemId> {
    let id = LineItemId::new(line);
    if store.state().cart.get_item(&id).is_none() {
        bail!("No cart line {}. Run `kolaz cart show` to list line ids.", line);
    }
    Ok(id)
}

/// Print cart lines with checkout totals.
pub fn print_cart(ctx: &Context, store: &Store) -> Result<()> {
    let cart = &store.state().cart;
    let totals = store.checkout_totals()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cart": cart, "totals": totals }));
        return Ok(());
    }

    ctx.output
        .header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    print_lines(ctx, cart)?;
    print_totals(ctx, cart, &totals);
    Ok(())
}

fn print_lines(ctx: &Context, cart: &Cart) -> Result<()> {
    let widths = [24, 28, 24, 4, 14];
    ctx.output
        .table_row(&["LINE", "PRODUCT", "VARIANT", "QTY", "TOTAL"], &widths);
    for item in &cart.items {
        let quantity = item.quantity.to_string();
        let total = item.line_total()?.to_string();
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &truncate(&item.product.name, 28),
                &format!("{} / {}", item.size, item.color),
                &quantity,
                &total,
            ],
            &widths,
        );
    }
    Ok(())
}

/// Subtotal, discount, shipping and total lines.
pub fn print_totals(ctx: &Context, cart: &Cart, totals: &CartTotals) {
    ctx.output.kv("subtotal", &totals.subtotal.to_string());
    if let Some(coupon) = &cart.coupon {
        ctx.output.kv(
            &format!("discount ({} -{}%)", coupon.code, coupon.percent()),
            &format!("-{}", totals.discount),
        );
    }
    let shipping = if totals.is_free_shipping() {
        "Free".to_string()
    } else {
        totals.shipping.to_string()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("total", &totals.total.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolaz_commerce::catalog::ProductColor;
    use kolaz_commerce::{Currency, Money};

    #[test]
    fn test_check_variant() {
        let mut p = Product::new("A", "Slim Jeans", Money::from_major(2000, Currency::BDT));
        assert!(check_variant(&p, "any", "any").is_ok());

        p.sizes = vec!["30".into(), "32".into()];
        p.colors = vec![ProductColor::new("Indigo", "#191970")];
        assert!(check_variant(&p, "32", "Indigo").is_ok());
        assert!(check_variant(&p, "34", "Indigo").is_err());
        assert!(check_variant(&p, "32", "Black").is_err());
    }
}
