//! Durable key-value storage for the VelocityTel storefront.
//!
//! Provides a small [`KeyValueStore`] seam with in-memory, file and browser
//! backends, and a typed [`Cache`] that reads and writes values as JSON text.
//!
//! # Example
//!
//! ```rust,ignore
//! use velocity_cache::{Cache, FileStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct CartLineItem {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let mut cache = Cache::new(FileStore::open(".velocity")?);
//!
//! // Store a value
//! cache.set("velocitytel-cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartLineItem>> = cache.get("velocitytel-cart")?;
//!
//! // Delete a value
//! cache.delete("velocitytel-cart")?;
//! ```

mod error;
mod file;
mod kv;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
