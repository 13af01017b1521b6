//! Catalog search module.
//!
//! In-memory text search, category filters and sorting for the shop page.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption, ALL_CATEGORIES};
