//! Search query builder.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    Featured,
    /// Sort by name A-Z.
    #[default]
    NameAsc,
    /// Sort by highest rated.
    Rating,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::NameAsc => "name",
            SortOption::Rating => "rating",
            SortOption::PriceAsc => "price",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::Rating => "Highest Rated",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::NameAsc => a.product_name.cmp(&b.product_name),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
            SortOption::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured" => Ok(SortOption::Featured),
            "name" => Ok(SortOption::NameAsc),
            "rating" => Ok(SortOption::Rating),
            "price" | "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// A search query.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Text query, if any.
    pub query: Option<String>,
    /// Filters to apply (all must match).
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl SearchQuery {
    /// Create an empty query that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank input is ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        if !trimmed.is_empty() {
            self.query = Some(trimmed.to_string());
            self.filters.push(Filter::Text(trimmed.to_string()));
        }
        self
    }

    /// Restrict to a category. `"all"` leaves the query unrestricted.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.is_empty() && category != ALL_CATEGORIES {
            self.filters.push(Filter::Category(category));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter and sort a product slice. Sorting is stable, so ties keep catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut hits: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        hits.sort_by(|a, b| self.sort.compare(a, b));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::{Currency, Money};

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_sorted_by_name() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new());
        assert_eq!(ids(&hits), vec!["1", "4", "2", "3"]);
    }

    #[test]
    fn test_featured_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new().with_sort(SortOption::Featured));
        assert_eq!(ids(&hits), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_text_query_matches_tags() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new().with_query("street"));
        assert_eq!(ids(&hits), vec!["3"]);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let query = SearchQuery::new().with_query("   ");
        assert!(query.query.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_all_category_is_unrestricted() {
        let query = SearchQuery::new().with_category(ALL_CATEGORIES);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_category_and_text_combine() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new().with_category("CHICKEN").with_query("spice");
        assert_eq!(ids(&catalog.search(&query)), vec!["4"]);

        let query = SearchQuery::new().with_category("CHICKEN").with_query("curry");
        assert!(catalog.search(&query).is_empty());
    }

    #[test]
    fn test_price_and_rating_filters_combine() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new()
            .with_filter(Filter::price_range(
                Some(Money::new(2000, Currency::GHS)),
                Some(Money::new(2800, Currency::GHS)),
            ))
            .with_filter(Filter::min_rating(4.9))
            .with_sort(SortOption::PriceAsc);
        assert_eq!(ids(&catalog.search(&query)), vec!["3", "1", "4"]);
    }

    #[test]
    fn test_sort_by_name() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new().with_sort(SortOption::NameAsc));
        assert_eq!(ids(&hits), vec!["1", "4", "2", "3"]);
    }

    #[test]
    fn test_sort_by_rating_is_stable() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new().with_sort(SortOption::Rating));
        assert_eq!(ids(&hits), vec!["1", "4", "3", "2"]);
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(&SearchQuery::new().with_sort(SortOption::PriceAsc));
        assert_eq!(ids(&hits), vec!["3", "1", "4", "2"]);

        let hits = catalog.search(&SearchQuery::new().with_sort(SortOption::PriceDesc));
        assert_eq!(ids(&hits), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_sort_option_from_str() {
        assert_eq!("Rating".parse::<SortOption>(), Ok(SortOption::Rating));
        assert_eq!("price".parse::<SortOption>(), Ok(SortOption::PriceAsc));
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
