//! Storefront domain types and logic for VelocityTel.
//!
//! This crate provides:
//!
//! - **Catalog**: the static, read-only list of plans, eSIMs and accessories
//! - **Cart**: line items, the in-memory cart, and the session's `CartStore`
//!   that keeps the cart in durable storage and notifies observers
//! - **Summary**: subtotal, tax and total for presentation
//!
//! # Example
//!
//! ```rust,ignore
//! use velocity_cache::{Cache, MemoryStore};
//! use velocity_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin()?;
//! let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
//!
//! let plan = catalog.require(&ProductId::new("gaming-1"))?;
//! store.add_item(LineItemInput::from(plan))?;
//!
//! let summary = CartSummary::from_items(store.items(), &TaxPolicy::default())?;
//! println!("Total: {}", summary.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{image_icon, Catalog, CategoryCount, CategoryFilter, Product};

    // Cart
    pub use crate::cart::{
        Cart, CartChange, CartEvent, CartLineItem, CartObserver, CartStore, CartSummary,
        LineItemInput, LoadSource, SubscriptionId, SummaryLine, TaxPolicy, DEFAULT_CART_KEY,
    };
}
