//! Shop listing with filters, sorting and pages.

use anyhow::{Context as _, Result};
use kolaz_commerce::catalog::Product;
use kolaz_commerce::search::{SearchResults, ShopFilter, ShopQuery, SortOption, DEFAULT_MAX_PRICE};
use kolaz_commerce::Money;

use super::products::print_products;
use super::ShopArgs;
use crate::context::Context;

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args, ctx)?;

    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Loading products...");
    let products = catalog.all().await.context("Failed to load products")?;
    spinner.finish_and_clear();

    let results = query.run(&products);
    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    print_results(ctx, &query, &results);
    Ok(())
}

fn build_query(args: &ShopArgs, ctx: &Context) -> Result<ShopQuery> {
    let sort: SortOption = args
        .sort
        .parse()
        .with_context(|| format!("Unknown sort option: {}", args.sort))?;

    let currency = ctx.config.store.currency();
    let min = Money::from_major(args.min_price.unwrap_or(0), currency);
    let max = Money::from_major(args.max_price.unwrap_or(DEFAULT_MAX_PRICE), currency);
    if min.amount_cents > max.amount_cents {
        anyhow::bail!("--min-price must not exceed --max-price");
    }

    let filter = ShopFilter::new()
        .with_categories(args.categories.clone())
        .with_colors(args.colors.clone())
        .with_sizes(args.sizes.clone())
        .with_price_range(min, max);
    let per_page = args.per_page.unwrap_or(ctx.config.store.items_per_page);

    Ok(ShopQuery::new()
        .with_filter(filter)
        .with_sort(sort)
        .with_pagination(args.page, per_page))
}

fn print_results(ctx: &Context, query: &ShopQuery, results: &SearchResults<Product>) {
    let page = &results.pagination;
    print_products(ctx, "Shop", &results.items);

    ctx.output.info(&format!(
        "Showing {}-{} of {} products, page {} of {} ({})",
        page.start_item(),
        page.end_item(),
        page.total,
        page.page,
        page.total_pages,
        query.sort().display_name()
    ));
    if query.active_filter_count() > 0 {
        ctx.output
            .info(&format!("{} filter(s) active", query.active_filter_count()));
    }

    for facet in &results.facets {
        if facet.values.is_empty() {
            continue;
        }
        let values: Vec<String> = facet
            .values
            .iter()
            .map(|v| {
                if v.selected {
                    format!("[{}] ({})", v.value, v.count)
                } else {
                    format!("{} ({})", v.value, v.count)
                }
            })
            .collect();
        ctx.output.kv(&facet.name, &values.join(", "));
    }
}
