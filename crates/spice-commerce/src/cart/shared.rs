//! Cart handle shared with the checkout reset task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::CartStore;

/// A cloneable handle to one cart.
///
/// Clones point at the same cart. The checkout dispatcher keeps a clone so
/// its reset task can empty the cart without the caller's help.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<CartStore>>,
}

impl SharedCart {
    /// Create a handle to an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the cart. Every cart operation leaves it consistent, so a
    /// poisoned lock is taken over as is.
    pub fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> CartStore {
        self.lock().clone()
    }

    /// Sum of all quantities.
    pub fn total_item_count(&self) -> u64 {
        self.lock().total_item_count()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl From<CartStore> for SharedCart {
    fn from(cart: CartStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cart)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    #[test]
    fn test_clones_share_one_cart() {
        let cart = SharedCart::new();
        let view = cart.clone();

        cart.lock().add("1");
        cart.lock().set_quantity("4", 2);
        assert_eq!(view.total_item_count(), 3);

        view.lock().clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut seeded = CartStore::new();
        seeded.add("2");
        let cart = SharedCart::from(seeded);

        let snapshot = cart.snapshot();
        cart.lock().add("2");

        assert_eq!(snapshot.quantity(&ProductId::new("2")), 1);
        assert_eq!(cart.lock().quantity(&ProductId::new("2")), 2);
    }
}
