//! Catalog browsing.

use anyhow::{Context as _, Result};
use kolaz_commerce::catalog::Product;
use kolaz_data::PrefetchPlan;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Loading products...");

    match args.command {
        ProductsCommand::List { category } => {
            let products = match category.as_deref() {
                Some(category) => catalog.by_category(category).await,
                None => catalog.all().await,
            }
            .context("Failed to load products")?;
            spinner.finish_and_clear();
            let title = match category {
                Some(category) => format!("Products in {}", category),
                None => "All products".to_string(),
            };
            print_products(ctx, &title, &products);
        }
        ProductsCommand::Featured => {
            let products = catalog.featured().await.context("Failed to load featured products")?;
            spinner.finish_and_clear();
            print_products(ctx, "Featured", &products);
        }
        ProductsCommand::BestSellers => {
            let products = catalog
                .best_sellers()
                .await
                .context("Failed to load best sellers")?;
            spinner.finish_and_clear();
            print_products(ctx, "Best sellers", &products);
        }
        ProductsCommand::New => {
            let products = catalog
                .new_arrivals()
                .await
                .context("Failed to load new arrivals")?;
            spinner.finish_and_clear();
            print_products(ctx, "New arrivals", &products);
        }
        ProductsCommand::Show { id } => {
            let product = catalog
                .by_id(&id)
                .await
                .with_context(|| format!("Failed to load product {}", id))?;
            spinner.finish_and_clear();
            print_product(ctx, &product);
        }
        ProductsCommand::Colors => {
            let colors = catalog.colors().await.context("Failed to load colors")?;
            spinner.finish_and_clear();
            if ctx.output.is_json() {
                ctx.output.json(&colors);
                return Ok(());
            }
            ctx.output.header("Colors");
            for color in &colors {
                ctx.output.list_item(&format!("{} ({})", color.name, color.hex));
            }
        }
        ProductsCommand::Categories => {
            let categories = catalog
                .categories()
                .await
                .context("Failed to load categories")?;
            spinner.finish_and_clear();
            if ctx.output.is_json() {
                ctx.output.json(&categories);
                return Ok(());
            }
            ctx.output.header("Categories");
            for category in &categories {
                ctx.output.list_item(category);
            }
        }
        ProductsCommand::Related { id } => {
            let products = catalog
                .related(&id)
                .await
                .with_context(|| format!("Failed to load products related to {}", id))?;
            spinner.finish_and_clear();
            print_products(ctx, &format!("Related to {}", id), &products);
        }
        ProductsCommand::Prefetch { category, related } => {
            let report = catalog
                .prefetch(&PrefetchPlan {
                    category,
                    related_id: related,
                })
                .await;
            spinner.finish_and_clear();
            if ctx.output.is_json() {
                let loaded: Vec<String> = report.loaded.iter().map(ToString::to_string).collect();
                let failed: Vec<_> = report
                    .failed
                    .iter()
                    .map(|(key, error)| serde_json::json!({ "key": key.to_string(), "error": error }))
                    .collect();
                ctx.output.json(&serde_json::json!({ "loaded": loaded, "failed": failed }));
                return Ok(());
            }
            for key in &report.loaded {
                ctx.output.success(&key.to_string());
            }
            for (key, error) in &report.failed {
                ctx.output.warn(&format!("{}: {}", key, error));
            }
        }
    }

    Ok(())
}

/// Price column, with the base price and discount when on sale.
pub fn price_label(product: &Product) -> String {
    match product.discount_percentage() {
        Some(percent) => format!(
            "{} (was {}, -{}%)",
            product.display_price(),
            product.price,
            percent
        ),
        None => product.display_price().to_string(),
    }
}

/// Print a product table, or the products as JSON.
pub fn print_products(ctx: &Context, title: &str, products: &[Product]) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    ctx.output.header(&format!("{} ({})", title, products.len()));
    if products.is_empty() {
        ctx.output.info("No products found");
        return;
    }

    let widths = [14, 32, 30, 12, 6];
    ctx.output
        .table_row(&["SKU", "NAME", "PRICE", "CATEGORY", "STOCK"], &widths);
    for p in products {
        let stock = p.stock.to_string();
        ctx.output.table_row(
            &[
                p.id.as_str(),
                &truncate(&p.name, 32),
                &price_label(p),
                &p.category,
                &stock,
            ],
            &widths,
        );
    }
}

pub fn print_product(ctx: &Context, p: &Product) {
    if ctx.output.is_json() {
        ctx.output.json(p);
        return;
    }

    ctx.output.header(&p.name);
    ctx.output.kv("sku", p.id.as_str());
    ctx.output.kv("price", &price_label(p));
    ctx.output.kv("brand", &p.brand);
    let category = if p.subcategory.is_empty() {
        p.category.clone()
    } else {
        format!("{} / {}", p.category, p.subcategory)
    };
    ctx.output.kv("category", &category);
    ctx.output.kv("colors", &p.color_names().collect::<Vec<_>>().join(", "));
    ctx.output.kv("sizes", &p.sizes.join(", "));
    let stock = if p.is_in_stock() {
        p.stock.to_string()
    } else {
        "out of stock".to_string()
    };
    ctx.output.kv("stock", &stock);
    ctx.output
        .kv("rating", &format!("{:.1} ({} reviews)", p.rating, p.review_count));
    if !p.tags.is_empty() {
        ctx.output.kv("tags", &p.tags.join(", "));
    }
    if !p.description.is_empty() {
        ctx.output.kv("description", &truncate(&p.description, 120));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolaz_commerce::{Currency, Money};

    #[test]
    fn test_price_label() {
        let mut p = Product::new("A", "Jeans", Money::from_major(2000, Currency::BDT));
        assert_eq!(price_label(&p), "\u{09f3}2,000.00");

        p.sale_price = Some(Money::from_major(1500, Currency::BDT));
        assert_eq!(
            price_label(&p),
            "\u{09f3}1,500.00 (was \u{09f3}2,000.00, -25%)"
        );
    }
}
