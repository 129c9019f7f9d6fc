//! Browser `localStorage` backend.

use crate::{CacheError, KeyValueStore};

/// Store backed by the window's `localStorage`.
///
/// Values are kept as UTF-8 text, which is what the JSON [`Cache`](crate::Cache)
/// writes anyway.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the current window's local storage.
    pub fn open() -> Result<Self, CacheError> {
        let window = web_sys::window()
            .ok_or_else(|| CacheError::OpenError("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::OpenError(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::OpenError("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.storage
            .get_item(key)
            .map(|v| v.map(String::into_bytes))
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let text = std::str::from_utf8(value)
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        // Browsers throw QuotaExceededError here when storage is full.
        self.storage
            .set_item(key, text)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let len = self
            .storage
            .length()
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self
                .storage
                .key(index)
                .map_err(|e| CacheError::StoreError(format!("{:?}", e)))?
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
