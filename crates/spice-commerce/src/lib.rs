//! Storefront domain logic for a single-vendor spice shop.
//!
//! This crate provides:
//!
//! - **Catalog**: static, validated product list with search and categories
//! - **Cart**: product id to quantity store with insertion-ordered display,
//!   plus a shared handle the checkout reset can clear
//! - **Checkout**: order summary formatting and a WhatsApp deep-link dispatcher
//!
//! There is no payment processing. Checkout renders the cart into a text
//! message and hands a `https://wa.me/...` link to the host environment.
//!
//! # Example
//!
//! ```rust,ignore
//! use spice_commerce::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Catalog::builtin();
//! let cart = SharedCart::new();
//! cart.lock().add("1");
//! cart.lock().add("1");
//!
//! let opener = Arc::new(RecordingOpener::new());
//! let mut checkout = CheckoutDispatcher::new(opener, &StorefrontConfig::default());
//! checkout.set_customer(CustomerInfo::new("Ama", "0244000000", "Osu, Accra"));
//!
//! let sent = checkout.submit(&cart, &catalog).await?;
//! println!("{}", sent.link);
//! checkout.wait_for_reset().await;
//! assert!(cart.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CheckoutSettings, DeliverySettings, StoreProfile, StorefrontConfig};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{CartEntry, CartStore, SharedCart};

    // Checkout
    pub use crate::checkout::{
        CheckoutDispatcher, CheckoutState, CustomerInfo, DeepLink, DeliveryPolicy, LinkOpener,
        OrderSummary, RecordingOpener, ResetSignal, Submission, SummaryLine,
    };

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};
}
