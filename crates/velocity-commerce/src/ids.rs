//! Newtype IDs for type-safe identifiers.
//!
//! Product ids double as cart line-item keys, so they are kept distinct from
//! arbitrary strings at the type level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("gaming-1");
        assert_eq!(id.as_str(), "gaming-1");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "family-2".into();
        assert_eq!(id.as_str(), "family-2");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("esim-travel");
        assert_eq!(format!("{}", id), "esim-travel");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("sim-kit");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""sim-kit""#);
        let back: ProductId = serde_json::from_str(r#""sim-kit""#).unwrap();
        assert_eq!(back, id);
    }
}
