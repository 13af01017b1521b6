//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A search filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Products carrying this tag (exact match).
    Category(String),
    /// Case-insensitive search in name, description and tags.
    Text(String),
    /// Filter by price range (inclusive).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Filter by minimum rating.
    Rating { min: f32 },
}

impl Filter {
    /// Create a category filter.
    pub fn category(tag: impl Into<String>) -> Self {
        Filter::Category(tag.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a minimum rating filter.
    pub fn min_rating(min: f32) -> Self {
        Filter::Rating { min }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(tag) => product.has_tag(tag),
            Filter::Text(query) => product.matches_text(query),
            Filter::PriceRange { min, max } => {
                let cents = product.price.amount_cents;
                min.map_or(true, |m| cents >= m.amount_cents)
                    && max.map_or(true, |m| cents <= m.amount_cents)
            }
            Filter::Rating { min } => product.rating >= *min,
        }
    }
}
