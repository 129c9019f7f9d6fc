//! Shopping cart module.
//!
//! Contains the line-item model, the in-memory cart, the persistent cart
//! store and the order summary.

mod cart;
mod line_item;
mod store;
mod summary;

pub use cart::Cart;
pub use line_item::{CartLineItem, LineItemInput};
pub use store::{
    CartChange, CartEvent, CartObserver, CartStore, LoadSource, SubscriptionId, DEFAULT_CART_KEY,
};
pub use summary::{CartSummary, SummaryLine, TaxPolicy, DEFAULT_TAX_RATE};
