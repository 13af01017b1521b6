//! Product detail command.

use anyhow::Result;
use spice_commerce::ids::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::format_rating;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.find(&ProductId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.product_name);
    ctx.output.kv("Brand", &product.business_name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Weight", &product.weight);
    ctx.output.kv("Rating", &format_rating(product.rating));
    if !product.tags.is_empty() {
        ctx.output.kv("Categories", &product.tags.join(", "));
    }
    ctx.output.kv("Images", &format!("{}, {}", product.main_image, product.secondary_image));
    ctx.output.text("");
    ctx.output.text(&format!("  {}", product.description));
    ctx.output.text("");
    ctx.output.info(&format!(
        "Add it to an order with: spice order --item {}",
        product.id
    ));

    Ok(())
}
