//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod order;
pub mod product;

use clap::{Args, Subcommand};
use spice_commerce::catalog::MAX_RATING;
use spice_commerce::ids::ProductId;
use spice_commerce::search::SortOption;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Text to look for in names, descriptions and categories.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show products in this category ("all" for every category).
    #[arg(short = 't', long)]
    pub category: Option<String>,

    /// Lowest unit price to show, in the store currency.
    #[arg(long, value_parser = parse_amount)]
    pub min_price: Option<f64>,

    /// Highest unit price to show, in the store currency.
    #[arg(long, value_parser = parse_amount)]
    pub max_price: Option<f64>,

    /// Only show products rated at least this high (0-5).
    #[arg(long, value_parser = parse_rating)]
    pub min_rating: Option<f32>,

    /// Sort order: name, featured, rating, price, price-desc.
    #[arg(long, default_value = "name", value_parser = parse_sort)]
    pub sort: SortOption,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// One `--item` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Item to order as ID or ID=QTY. Repeat for more items.
    #[arg(short, long = "item", value_name = "ID[=QTY]", value_parser = parse_item)]
    pub items: Vec<CartItem>,

    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Customer phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Delivery note.
    #[arg(long)]
    pub note: Option<String>,

    /// Prompt for customer details and confirm before sending.
    #[arg(short = 'I', long)]
    pub interactive: bool,

    /// Open the link in WhatsApp instead of printing it.
    #[arg(long)]
    pub open: bool,

    /// Exit right after sending instead of waiting for the checkout reset.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a storefront.toml with default settings.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    s.parse()
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s.parse().map_err(|_| format!("invalid amount '{}'", s))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount must be a non-negative number, got '{}'", s));
    }
    Ok(amount)
}

fn parse_rating(s: &str) -> Result<f32, String> {
    let rating: f32 = s.parse().map_err(|_| format!("invalid rating '{}'", s))?;
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(format!("rating must be between 0 and {}", MAX_RATING));
    }
    Ok(rating)
}

fn parse_item(s: &str) -> Result<CartItem, String> {
    let (id, quantity) = match s.split_once('=') {
        Some((id, qty)) => {
            let quantity: u32 = qty
                .trim()
                .parse()
                .map_err(|_| format!("invalid quantity '{}'", qty))?;
            (id, quantity)
        }
        None => (s, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err("product id is empty".to_string());
    }
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok(CartItem {
        product_id: ProductId::new(id),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_defaults_to_one() {
        assert_eq!(
            parse_item("3").unwrap(),
            CartItem {
                product_id: ProductId::new("3"),
                quantity: 1
            }
        );
    }

    #[test]
    fn test_parse_item_with_quantity() {
        let item = parse_item(" 2 = 4").unwrap();
        assert_eq!(item.product_id.as_str(), "2");
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_parse_amount_and_rating() {
        assert_eq!(parse_amount("25.5"), Ok(25.5));
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("NaN").is_err());
        assert_eq!(parse_rating("4.8"), Ok(4.8));
        assert!(parse_rating("5.5").is_err());
        assert!(parse_rating("high").is_err());
    }

    #[test]
    fn test_parse_item_rejects_bad_input() {
        assert!(parse_item("").is_err());
        assert!(parse_item("=2").is_err());
        assert!(parse_item("1=0").is_err());
        assert!(parse_item("1=-3").is_err());
        assert!(parse_item("1=two").is_err());
    }
}
