//! Key-Value store abstraction with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A durable byte-oriented key-value store.
///
/// Implemented by [`MemoryStore`](crate::MemoryStore),
/// [`FileStore`](crate::FileStore) and, in the browser,
/// `LocalStorage`. A failed `set` must leave the previous value in place.
pub trait KeyValueStore {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Default)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartLineItem>> = cache.get("velocitytel-cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("velocitytel-cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the cache and return the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Entry> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            id: "gaming-1".into(),
            quantity: 2,
        }];
        cache.set("cart", &entries).unwrap();

        let loaded: Vec<Entry> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, entries);
        assert!(cache.exists("cart").unwrap());
    }

    #[test]
    fn test_values_are_json_text() {
        let mut cache = Cache::new(MemoryStore::new());
        cache.set("cart", &Vec::<Entry>::new()).unwrap();
        assert_eq!(cache.store().get("cart").unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_get_wrong_shape_is_error() {
        let mut cache = Cache::new(MemoryStore::new());
        cache.store_mut().set("cart", b"{\"not\":\"a list\"}").unwrap();
        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_delete() {
        let mut cache = Cache::new(MemoryStore::new());
        cache.set("cart", &1u32).unwrap();
        cache.delete("cart").unwrap();
        assert!(!cache.exists("cart").unwrap());
        assert!(cache.keys().unwrap().is_empty());
    }
}
