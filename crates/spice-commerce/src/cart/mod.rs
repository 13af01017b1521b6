//! Shopping cart module.
//!
//! `CartStore` is a plain owned value. `SharedCart` wraps one for code that
//! must reach it from a spawned task.

#[allow(clippy::module_inception)]
mod cart;
mod shared;

pub use cart::{CartEntry, CartStore};
pub use shared::SharedCart;
