//! In-process store with an optional byte quota.

use std::collections::BTreeMap;

use crate::{CacheError, KeyValueStore};

/// Key-value store held in memory.
///
/// With a quota it behaves like browser local storage: a write that would
/// push the total size (keys plus values) past the limit is refused and the
/// old value is kept.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses writes past `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(limit),
        }
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        if let Some(limit) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(CacheError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let mut store = MemoryStore::new();
        store.set("a", b"1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        // Deleting again is fine
        store.delete("a").unwrap();
    }

    #[test]
    fn test_quota_refuses_oversized_write() {
        let mut store = MemoryStore::with_quota(10);
        store.set("key", b"1234").unwrap();
        assert_eq!(store.used_bytes(), 7);

        let err = store.set("key", b"123456789").unwrap_err();
        assert!(matches!(
            err,
            CacheError::QuotaExceeded {
                needed: 12,
                limit: 10
            }
        ));
        // Old value survives
        assert_eq!(store.get("key").unwrap(), Some(b"1234".to_vec()));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let mut store = MemoryStore::with_quota(8);
        store.set("key", b"12345").unwrap();
        store.set("key", b"54321").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_keys_sorted() {
        let mut store = MemoryStore::new();
        store.set("b", b"").unwrap();
        store.set("a", b"").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
