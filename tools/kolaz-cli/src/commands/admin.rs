//! Admin back-office: products, orders and customers.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use kolaz_commerce::admin::{
    customers_from_orders, low_stock, CustomerFilter, CustomerStats, CustomerStatus, OrderFilter,
    OrderStats, OrderSummary, ProductFilter,
};
use kolaz_commerce::catalog::Product;
use kolaz_commerce::checkout::OrderStatus;
use kolaz_commerce::Currency;
use kolaz_data::wire::{CategoryInfo, Pricing, ProductInput};

use super::products::{price_label, print_product};
use super::{AdminArgs, AdminCommand, AdminProductsCommand, ProductFields};
use crate::context::Context;
use crate::output::{format_timestamp, status_badge, truncate};

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Products { command } => products(command, ctx).await,
        AdminCommand::Orders { search, status } => orders(search, status, ctx),
        AdminCommand::Advance { id, tracking } => advance(&id, tracking, ctx),
        AdminCommand::Cancel { id, yes } => cancel(&id, yes, ctx),
        AdminCommand::Customers { search, status } => customers(search, status, ctx),
    }
}

async fn products(command: AdminProductsCommand, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = ctx.config.store.currency();

    match command {
        AdminProductsCommand::List {
            search,
            category,
            low_stock: threshold,
        } => {
            let spinner = ctx.output.spinner("Loading products...");
            let all = catalog.all().await;
            spinner.finish_and_clear();
            let all = all?;

            let filter = ProductFilter { search, category };
            let mut rows = filter.apply(&all);
            if let Some(threshold) = threshold {
                let low: Vec<&Product> = low_stock(&all, threshold);
                rows = low.into_iter().filter(|p| filter.matches(p)).collect();
            }

            if ctx.output.is_json() {
                ctx.output.json(&rows);
                return Ok(());
            }
            ctx.output
                .header(&format!("Products ({} of {})", rows.len(), all.len()));
            let widths = [14, 30, 10, 30, 6];
            ctx.output
                .table_row(&["SKU", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
            for p in rows {
                let stock = p.stock.to_string();
                ctx.output.table_row(
                    &[
                        p.id.as_str(),
                        &truncate(&p.name, 28),
                        &p.category,
                        &price_label(p),
                        &stock,
                    ],
                    &widths,
                );
            }
        }
        AdminProductsCommand::Create { sku, fields } => {
            if fields.name.is_none() || fields.price.is_none() {
                bail!("--name and --price are required to create a product");
            }
            let mut input = product_input(&fields, currency);
            input.sku = Some(sku);
            let product = catalog.create(&input).await?;
            ctx.output.success(&format!("Created {}", product.id));
            print_product(ctx, &product);
        }
        AdminProductsCommand::Update { id, fields } => {
            let input = product_input(&fields, currency);
            if input.is_empty() {
                bail!("Nothing to update. Pass at least one field flag.");
            }
            let product = catalog.update(&id, &input).await?;
            ctx.output.success(&format!("Updated {}", product.id));
            print_product(ctx, &product);
        }
        AdminProductsCommand::Delete { id, yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete product {}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Delete cancelled");
                    return Ok(());
                }
            }
            catalog.delete(&id).await?;
            ctx.output.success(&format!("Deleted {}", id));
        }
    }

    Ok(())
}

/// Request body with only the flags that were passed.
fn product_input(fields: &ProductFields, currency: Currency) -> ProductInput {
    let pricing = fields.price.map(|base_price| Pricing {
        base_price,
        sale_price: fields.sale_price,
        currency: currency.code().to_string(),
        discount_percentage: fields
            .sale_price
            .filter(|sale| base_price > 0.0 && *sale < base_price)
            .map(|sale| ((base_price - sale) / base_price * 100.0).round()),
        is_on_sale: fields.sale_price.map_or(false, |sale| sale < base_price),
    });
    let category = fields.category.as_ref().map(|main| CategoryInfo {
        main: main.clone(),
        sub_categories: Vec::new(),
        hierarchy: vec![main.clone()],
    });

    ProductInput {
        name: fields.name.clone(),
        slug: fields.name.as_deref().map(slugify),
        description: fields.description.clone(),
        stock: fields.stock,
        pricing,
        category,
        is_featured: fields.featured,
        is_best_seller: fields.best_seller,
        is_new_arrival: fields.new_arrival,
        ..ProductInput::default()
    }
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn orders(search: String, status: Option<String>, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let status = status.map(|s| s.parse::<OrderStatus>()).transpose()?;
    let summaries: Vec<OrderSummary> = store.state().orders.iter().map(OrderSummary::from).collect();
    let stats = OrderStats::compute(&summaries, ctx.config.store.currency())?;
    let rows = OrderFilter { search, status }.apply(&summaries);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "stats": stats, "orders": rows }));
        return Ok(());
    }

    ctx.output.header("Orders");
    ctx.output.kv("total orders", &stats.total_orders.to_string());
    for (status, count) in &stats.by_status {
        ctx.output.kv(status.display_name(), &count.to_string());
    }
    ctx.output.kv("revenue", &stats.revenue.to_string());
    ctx.output.info("");

    if rows.is_empty() {
        ctx.output.info("No matching orders");
        return Ok(());
    }
    let widths = [18, 20, 17, 14, 12];
    ctx.output
        .table_row(&["ORDER", "CUSTOMER", "PLACED", "TOTAL", "STATUS"], &widths);
    for order in rows {
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &truncate(&order.customer, 18),
                &format_timestamp(order.created_at),
                &order.total.to_string(),
                &status_badge(order.status),
            ],
            &widths,
        );
    }
    Ok(())
}

fn advance(id: &str, tracking: Option<String>, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    let mut orders = store.state().orders.clone();
    let order = orders
        .iter_mut()
        .find(|o| o.id.as_str() == id.trim())
        .with_context(|| format!("No order {}", id))?;

    if order.status.next() == Some(OrderStatus::Shipped) {
        let tracking = tracking.context("--tracking is required to ship an order")?;
        order.ship(tracking)?;
    } else {
        order.advance()?;
    }
    let status = order.status;
    let order_id = order.id.clone();

    store.dispatch(kolaz_commerce::store::Action::SetOrders(orders))?;
    ctx.save_store(&store)?;
    ctx.output
        .success(&format!("Order {} is now {}", order_id, status_badge(status)));
    Ok(())
}

fn cancel(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    let mut orders = store.state().orders.clone();
    let order = orders
        .iter_mut()
        .find(|o| o.id.as_str() == id.trim())
        .with_context(|| format!("No order {}", id))?;

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Cancel order {}?", order.id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order left unchanged");
            return Ok(());
        }
    }
    order.cancel()?;
    let order_id = order.id.clone();

    store.dispatch(kolaz_commerce::store::Action::SetOrders(orders))?;
    ctx.save_store(&store)?;
    ctx.output.success(&format!("Order {} cancelled", order_id));
    Ok(())
}

fn customers(search: String, status: Option<String>, ctx: &Context) -> Result<()> {
    let status = match status.as_deref().map(str::trim) {
        None => None,
        Some("active") => Some(CustomerStatus::Active),
        Some("inactive") => Some(CustomerStatus::Inactive),
        Some(other) => bail!("Unknown customer status '{}'. Use active or inactive.", other),
    };

    let store = ctx.store()?;
    let currency = ctx.config.store.currency();
    let all = customers_from_orders(&store.state().orders, currency)?;
    let stats = CustomerStats::compute(&all, currency)?;
    let rows = CustomerFilter { search, status }.apply(&all);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "stats": stats, "customers": rows }));
        return Ok(());
    }

    ctx.output.header("Customers");
    ctx.output.kv("total", &stats.total.to_string());
    ctx.output.kv("active", &stats.active.to_string());
    ctx.output
        .kv("average order", &stats.average_order_value.to_string());
    ctx.output.kv("total spent", &stats.total_spent.to_string());
    ctx.output.info("");

    let widths = [20, 26, 8, 14, 10];
    ctx.output
        .table_row(&["NAME", "EMAIL", "ORDERS", "SPENT", "STATUS"], &widths);
    for customer in rows {
        let orders = customer.total_orders.to_string();
        ctx.output.table_row(
            &[
                &truncate(&customer.name, 18),
                &truncate(&customer.email, 24),
                &orders,
                &customer.total_spent.to_string(),
                customer.status.as_str(),
            ],
            &widths,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_input_only_sets_passed_fields() {
        let fields = ProductFields {
            stock: Some(3),
            ..ProductFields::default()
        };
        let input = product_input(&fields, Currency::BDT);
        assert_eq!(input.stock, Some(3));
        assert!(input.pricing.is_none());
        assert!(input.name.is_none());
        assert!(product_input(&ProductFields::default(), Currency::BDT).is_empty());
    }

    #[test]
    fn test_product_input_pricing() {
        let fields = ProductFields {
            name: Some("Slim Fit Indigo Jeans".into()),
            price: Some(2000.0),
            sale_price: Some(1500.0),
            category: Some("Jeans".into()),
            ..ProductFields::default()
        };
        let input = product_input(&fields, Currency::BDT);
        let pricing = input.pricing.unwrap();
        assert_eq!(pricing.currency, "BDT");
        assert!(pricing.is_on_sale);
        assert_eq!(pricing.discount_percentage, Some(25.0));
        assert_eq!(input.slug.as_deref(), Some("slim-fit-indigo-jeans"));
        assert_eq!(input.category.unwrap().main, "Jeans");
    }
}
