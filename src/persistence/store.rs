//! Store trait, in-memory backend, and errors

use std::collections::HashMap;
use std::fmt;

/// Errors that can occur while reading or writing persisted values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No storage backend (e.g. storage disabled by the browser)
    Unavailable,

    /// The backend rejected a read or write
    Access { key: String, reason: String },

    /// A stored value could not be decoded
    Malformed { key: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Storage is unavailable"),
            StoreError::Access { key, reason } => {
                write!(f, "Storage access failed for '{}': {}", key, reason)
            }
            StoreError::Malformed { key, reason } => {
                write!(f, "Malformed value for '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// String key/value storage with session lifetime
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("highScore"), Ok(None));
        store.set("highScore", "4").unwrap();
        assert_eq!(store.get("highScore"), Ok(Some("4".to_string())));
        store.remove("highScore").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Malformed {
            key: "highScore".to_string(),
            reason: "expected a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed value for 'highScore': expected a number"
        );
    }
}
