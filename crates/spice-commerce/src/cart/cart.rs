//! Cart store.

use std::collections::HashMap;

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One cart line as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry<'a> {
    /// Product being purchased.
    pub product_id: &'a ProductId,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

/// Product id to quantity mapping for one shopping session.
///
/// Entries never hold a zero quantity: every path that would reach zero
/// deletes the entry instead. Display order follows first insertion; an id
/// that is removed and added again goes to the end.
///
/// The store performs no catalog checks. Unknown ids are kept and later
/// dropped by the order summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartStore {
    quantities: HashMap<ProductId, u32>,
    order: Vec<ProductId>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product_id: impl Into<ProductId>) {
        let product_id = product_id.into();
        let quantity = match self.quantities.get_mut(&product_id) {
            Some(quantity) => {
                *quantity = quantity.saturating_add(1);
                *quantity
            }
            None => {
                self.insert(product_id.clone(), 1);
                1
            }
        };
        tracing::debug!(product_id = %product_id, quantity, "cart add");
    }

    /// Set a product's quantity directly. Zero or negative removes it.
    pub fn set_quantity(&mut self, product_id: impl Into<ProductId>, quantity: i64) {
        let product_id = product_id.into();
        if quantity <= 0 {
            self.delete(&product_id);
            tracing::debug!(product_id = %product_id, "cart set to zero, entry removed");
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.quantities.get_mut(&product_id) {
            Some(existing) => *existing = quantity,
            None => self.insert(product_id.clone(), quantity),
        }
        tracing::debug!(product_id = %product_id, quantity, "cart set quantity");
    }

    /// Remove one unit of a product; deletes the entry at 1. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: &ProductId) {
        let Some(quantity) = self.quantities.get_mut(product_id) else {
            return;
        };
        if *quantity > 1 {
            *quantity -= 1;
            tracing::debug!(product_id = %product_id, quantity = *quantity, "cart remove");
            return;
        }
        self.delete(product_id);
        tracing::debug!(product_id = %product_id, "cart entry removed");
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.quantities.clear();
        self.order.clear();
        tracing::debug!("cart cleared");
    }

    /// Sum of all quantities (the cart badge number).
    pub fn total_item_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// Quantity for a product, 0 when absent.
    pub fn quantity(&self, product_id: &ProductId) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.quantities.contains_key(product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = CartEntry<'_>> + '_ {
        self.order.iter().filter_map(move |id| {
            self.quantities.get(id).map(|&quantity| CartEntry {
                product_id: id,
                quantity,
            })
        })
    }

    fn insert(&mut self, product_id: ProductId, quantity: u32) {
        self.order.push(product_id.clone());
        self.quantities.insert(product_id, quantity);
    }

    fn delete(&mut self, product_id: &ProductId) {
        if self.quantities.remove(product_id).is_some() {
            self.order.retain(|id| id != product_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn assert_invariants(cart: &CartStore) {
        assert!(cart.entries().all(|e| e.quantity > 0));
        let sum: u64 = cart.entries().map(|e| u64::from(e.quantity)).sum();
        assert_eq!(cart.total_item_count(), sum);
        assert_eq!(cart.entries().count(), cart.len());
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = CartStore::new();
        cart.add("1");
        assert_eq!(cart.quantity(&id("1")), 1);
        cart.add("1");
        assert_eq!(cart.quantity(&id("1")), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_accepts_unknown_ids() {
        let mut cart = CartStore::new();
        cart.add("not-in-catalog");
        assert!(cart.contains(&id("not-in-catalog")));
    }

    #[test]
    fn test_set_quantity_is_not_additive() {
        let mut cart = CartStore::new();
        cart.add("1");
        cart.set_quantity("1", 5);
        assert_eq!(cart.quantity(&id("1")), 5);
        cart.set_quantity("1", 2);
        assert_eq!(cart.quantity(&id("1")), 2);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = CartStore::new();
        cart.set_quantity("1", 3);
        cart.set_quantity("1", 0);
        assert!(!cart.contains(&id("1")));

        cart.set_quantity("2", 3);
        cart.set_quantity("2", -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_on_absent_is_noop() {
        let mut cart = CartStore::new();
        cart.set_quantity("1", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = CartStore::new();
        cart.set_quantity("1", 2);
        cart.remove(&id("1"));
        assert_eq!(cart.quantity(&id("1")), 1);
        cart.remove(&id("1"));
        assert!(!cart.contains(&id("1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartStore::new();
        cart.remove(&id("1"));
        assert!(cart.is_empty());

        cart.add("2");
        cart.remove(&id("1"));
        assert_eq!(cart.quantity(&id("2")), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add("1");
        cart.set_quantity("2", 4);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_total_item_count() {
        let mut cart = CartStore::new();
        cart.add("1");
        cart.add("1");
        cart.set_quantity("2", 3);
        cart.add("3");
        assert_eq!(cart.total_item_count(), 6);
    }

    #[test]
    fn test_entries_follow_insertion_order() {
        let mut cart = CartStore::new();
        cart.add("3");
        cart.add("1");
        cart.add("2");
        cart.remove(&id("3"));
        cart.add("3");

        let order: Vec<&str> = cart.entries().map(|e| e.product_id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_large_quantity_saturates() {
        let mut cart = CartStore::new();
        cart.set_quantity("1", i64::MAX);
        assert_eq!(cart.quantity(&id("1")), u32::MAX);
        cart.add("1");
        assert_eq!(cart.quantity(&id("1")), u32::MAX);
    }

    #[test]
    fn test_invariants_hold_across_operation_sequences() {
        let mut cart = CartStore::new();
        let ids = ["1", "2", "3", "ghost"];
        // Deterministic pseudo-random walk over all operations.
        let mut seed: u64 = 0x5eed;
        for step in 0..2_000 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let target = ids[(seed >> 33) as usize % ids.len()];
            match (seed >> 40) % 5 {
                0 | 1 => cart.add(target),
                2 => cart.remove(&id(target)),
                3 => cart.set_quantity(target, ((seed >> 48) % 7) as i64 - 2),
                _ if step % 97 == 0 => cart.clear(),
                _ => cart.add(target),
            }
            assert_invariants(&cart);
        }
    }
}
