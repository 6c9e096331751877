//! The saved session.

use anyhow::Result;
use dialoguer::Confirm;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionCommand::Show => {
            let state = ctx.session.load()?;
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "path": ctx.session.path(),
                    "cart_items": state.cart.item_count(),
                    "coupon": state.cart.coupon.as_ref().map(|c| &c.code),
                    "orders": state.orders.len(),
                    "user": state.user.as_ref().map(|u| &u.email),
                }));
                return Ok(());
            }

            ctx.output.header("Session");
            ctx.output
                .kv("file", &ctx.session.path().display().to_string());
            ctx.output
                .kv("cart items", &state.cart.item_count().to_string());
            if let Some(coupon) = &state.cart.coupon {
                ctx.output.kv("coupon", &coupon.code);
            }
            ctx.output.kv("orders", &state.orders.len().to_string());
            if let Some(user) = &state.user {
                ctx.output.kv("signed in", &user.email);
            }
        }
        SessionCommand::Reset { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Forget the cart and all placed orders?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Session kept");
                    return Ok(());
                }
            }
            if ctx.session.clear()? {
                ctx.output.success("Session reset");
            } else {
                ctx.output.info("No saved session");
            }
        }
    }

    Ok(())
}
