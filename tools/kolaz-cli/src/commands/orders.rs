//! Orders placed in the session.

use anyhow::{Context as _, Result};
use kolaz_commerce::checkout::{find_order, Order};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let orders = &store.state().orders;

    match args.command {
        OrdersCommand::List => {
            if ctx.output.is_json() {
                ctx.output.json(orders);
                return Ok(());
            }
            ctx.output.header(&format!("Orders ({})", orders.len()));
            if orders.is_empty() {
                ctx.output.info("No orders yet");
                return Ok(());
            }
            let widths = [18, 17, 5, 16, 12];
            ctx.output
                .table_row(&["ORDER", "PLACED", "ITEMS", "TOTAL", "STATUS"], &widths);
            for order in orders {
                let items = order.item_count().to_string();
                ctx.output.table_row(
                    &[
                        order.id.as_str(),
                        &format_timestamp(order.created_at),
                        &items,
                        &order.total.to_string(),
                        &status_badge(order.status),
                    ],
                    &widths,
                );
            }
        }
        OrdersCommand::Show { id } => {
            let order = orders
                .iter()
                .find(|o| o.id.as_str() == id.trim())
                .with_context(|| format!("No order {}", id))?;
            print_order(ctx, order);
        }
        OrdersCommand::Track { reference } => {
            let order = find_order(orders, &reference)?;
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "id": order.id,
                    "status": order.status,
                    "tracking_id": order.tracking_id,
                    "timeline": order.timeline(),
                }));
                return Ok(());
            }
            ctx.output.header(&format!("Tracking {}", order.id));
            ctx.output.kv("status", &status_badge(order.status));
            if let Some(tracking) = &order.tracking_id {
                ctx.output.kv("tracking id", tracking);
            }
            for step in order.timeline() {
                let mark = if step.completed { "✓" } else { "·" };
                ctx.output.list_item(&format!("{} {}", mark, step.label));
            }
        }
    }

    Ok(())
}

fn print_order(ctx: &Context, order: &Order) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("placed", &format_timestamp(order.created_at));
    ctx.output.kv("status", &status_badge(order.status));
    ctx.output.kv("payment", order.payment_method.display_name());
    ctx.output.kv("email", &order.email);
    ctx.output.kv("ship to", &order.shipping_address.one_line());
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x {} ({})",
            item.quantity,
            item.product.name,
            item.variant_label()
        ));
    }
    ctx.output.kv("subtotal", &order.totals.subtotal.to_string());
    if let Some(code) = &order.coupon_code {
        ctx.output
            .kv(&format!("discount ({})", code), &format!("-{}", order.totals.discount));
    }
    ctx.output.kv("shipping", &order.totals.shipping.to_string());
    ctx.output.kv("total", &order.total.to_string());
}
