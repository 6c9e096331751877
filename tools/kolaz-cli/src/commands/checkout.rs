//! Simulated checkout.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};
use kolaz_commerce::checkout::{CheckoutDetails, PaymentMethod};

use super::cart::print_totals;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    if store.state().cart.is_empty() {
        bail!("Cart is empty. Add items with `kolaz cart add` before checkout.");
    }

    let payment_method: PaymentMethod = args.payment.parse()?;
    let interactive = !args.yes && !ctx.output.is_json();

    // Missing flags fall back to the signed-in user's default address.
    let user = store.state().user.as_ref();
    let saved = user.and_then(|u| u.default_address());
    let (first, last) = saved
        .map(|a| split_name(&a.full_name))
        .unwrap_or_default();
    let details = CheckoutDetails {
        user_id: None,
        email: field(args.email.or_else(|| user.map(|u| u.email.clone())), "Email", interactive)?,
        first_name: field(args.first_name.or(first), "First name", interactive)?,
        last_name: field(args.last_name.or(last), "Last name", interactive)?,
        phone: field(args.phone.or_else(|| saved.map(|a| a.phone.clone())), "Phone", interactive)?,
        address: field(args.address.or_else(|| saved.map(|a| a.address.clone())), "Address", interactive)?,
        city: field(args.city.or_else(|| saved.map(|a| a.city.clone())), "City", interactive)?,
        zip: field(args.zip.or_else(|| saved.map(|a| a.zip.clone())), "ZIP code", interactive)?,
        payment_method,
    };

    let totals = store.checkout_totals()?;
    if !ctx.output.is_json() {
        ctx.output.header("Order summary");
        print_totals(ctx, &store.state().cart, &totals);
        ctx.output.kv("payment", payment_method.display_name());
        ctx.output.kv("ship to", &details.shipping_address().one_line());
    }

    if interactive {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", totals.total))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let order = store.checkout(details)?;
    ctx.save_store(&store)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Order {} placed. Total {}.",
        order.id, order.total
    ));
    ctx.output
        .info(&format!("Track it with `kolaz orders track {}`", order.id));
    Ok(())
}

/// First word and the rest of a full name, skipping empty parts.
fn split_name(full_name: &str) -> (Option<String>, Option<String>) {
    let mut parts = full_name.trim().splitn(2, ' ');
    let first = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
    let last = parts.next().map(str::trim).filter(|p| !p.is_empty()).map(str::to_string);
    (first, last)
}

/// A form field from its flag, or prompted for when interactive.
fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Karim  Hasan Chowdhury"),
            (Some("Karim".into()), Some("Hasan Chowdhury".into()))
        );
        assert_eq!(split_name("Karim"), (Some("Karim".into()), None));
        assert_eq!(split_name("  "), (None, None));
    }

    #[test]
    fn test_field_without_prompt() {
        assert_eq!(field(Some("Dhaka".into()), "City", false).unwrap(), "Dhaka");
        assert_eq!(field(None, "City", false).unwrap(), "");
    }
}
