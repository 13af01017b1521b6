//! Catalog browsing commands.

use anyhow::Result;
use spice_commerce::money::Money;
use spice_commerce::search::{Filter, SearchQuery};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::format_rating;

const WIDTHS: [usize; 5] = [4, 26, 7, 11, 10];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut query = SearchQuery::new().with_sort(args.sort);
    if let Some(text) = args.search {
        query = query.with_query(text);
    }
    if let Some(category) = args.category {
        query = query.with_category(category);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let currency = ctx.config.store.currency;
        let to_money = |amount: f64| Money::from_decimal(amount, currency);
        query = query.with_filter(Filter::price_range(
            args.min_price.map(to_money),
            args.max_price.map(to_money),
        ));
    }
    if let Some(min) = args.min_rating {
        query = query.with_filter(Filter::min_rating(min));
    }

    let hits = ctx.catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&hits);
        return Ok(());
    }

    if hits.is_empty() {
        ctx.output.info("No products found. Try a different search or category.");
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products ({})",
        hits.len(),
        ctx.catalog.len(),
        args.sort.display_name()
    ));
    ctx.output
        .table_row(&["ID", "NAME", "WEIGHT", "PRICE", "RATING"], &WIDTHS);
    for product in &hits {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.product_name,
                &product.weight,
                &product.price.display(),
                &format_rating(product.rating),
            ],
            &WIDTHS,
        );
    }

    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let categories = ctx.catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        let count = ctx
            .catalog
            .products()
            .iter()
            .filter(|p| p.has_tag(category))
            .count();
        ctx.output.list_item(&format!("{} ({})", category, count));
    }

    Ok(())
}
