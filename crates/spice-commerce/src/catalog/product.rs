//! Product type.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Brand shown above the product name.
    pub business_name: String,
    /// Product name.
    pub product_name: String,
    /// Unit price.
    pub price: Money,
    /// Pack size label (e.g., "250g").
    pub weight: String,
    /// Category labels, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Primary image reference.
    pub main_image: String,
    /// Alternate image reference.
    pub secondary_image: String,
    /// Average rating on a 0-5 scale.
    pub rating: f32,
    /// Long-form description.
    pub description: String,
}

impl Product {
    /// Check the product's own invariants.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("id is blank"));
        }
        if self.product_name.trim().is_empty() {
            return Err(invalid("product name is blank"));
        }
        if self.price.is_negative() {
            return Err(invalid("price is negative"));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(invalid("rating must be between 0 and 5"));
        }
        Ok(())
    }

    /// Check whether the product carries a tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match over name, description and tags.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.product_name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product {
            id: ProductId::new("1"),
            business_name: "JENNY'S ORGANIC SPICES".to_string(),
            product_name: "ALL PURPOSE SPICE MIX".to_string(),
            price: Money::new(2500, Currency::GHS),
            weight: "250g".to_string(),
            tags: vec!["STEWS".to_string(), "SOUPS".to_string()],
            main_image: "/images/main.png".to_string(),
            secondary_image: "/images/alt.png".to_string(),
            rating: 5.0,
            description: "A versatile blend".to_string(),
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(product().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = product();
        p.price = Money::new(-1, Currency::GHS);
        assert!(matches!(p.validate(), Err(CommerceError::InvalidProduct { .. })));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut p = product();
        p.rating = 5.5;
        assert!(p.validate().is_err());
        p.rating = -0.1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let p = product();
        assert!(p.matches_text("purpose"));
        assert!(p.matches_text("soup"));
        assert!(p.matches_text("VERSATILE"));
        assert!(!p.matches_text("curry"));
    }
}
