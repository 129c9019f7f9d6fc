//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product handed to the cart is missing or has an unusable field.
    #[error("Invalid product {field}: {reason}")]
    InvalidProduct { field: &'static str, reason: String },

    /// The catalog document could not be read or is inconsistent.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CommerceError::InvalidProduct {
            field,
            reason: reason.into(),
        }
    }
}

impl From<velocity_cache::CacheError> for CommerceError {
    fn from(e: velocity_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for CommerceError {
    fn from(e: std::io::Error) -> Self {
        CommerceError::CatalogError(e.to_string())
    }
}
