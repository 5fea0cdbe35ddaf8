//! Session high score
//!
//! Persisted under a single session-storage key as a JSON number. A missing
//! key is a distinct state from a stored zero: neither is shown on the HUD,
//! but an unset score always takes the next recorded value.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Session storage key
pub const STORAGE_KEY: &str = "highScore";

/// Best score seen this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighScore {
    /// Nothing recorded yet
    #[default]
    Unset,
    /// A run ended before clearing any row
    Zero,
    Positive(NonZeroU32),
}

impl HighScore {
    pub fn from_value(value: Option<u32>) -> Self {
        match value {
            None => HighScore::Unset,
            Some(n) => NonZeroU32::new(n).map_or(HighScore::Zero, HighScore::Positive),
        }
    }

    /// Stored numeric value, `None` when unset
    pub fn value(&self) -> Option<u32> {
        match self {
            HighScore::Unset => None,
            HighScore::Zero => Some(0),
            HighScore::Positive(n) => Some(n.get()),
        }
    }

    /// Record a score; returns true if the stored value changed
    pub fn record(&mut self, score: u32) -> bool {
        let improved = match self.value() {
            None => true,
            Some(best) => score > best,
        };
        if improved {
            *self = Self::from_value(Some(score));
        }
        improved
    }

    /// HUD label: only positive scores are shown
    pub fn label(&self) -> String {
        match self {
            HighScore::Positive(n) => format!("High: {}", n),
            HighScore::Unset | HighScore::Zero => String::new(),
        }
    }

    /// Load from the store; a missing or malformed value is treated as unset
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                HighScore::Unset
            }
        }
    }

    pub fn try_load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let Some(raw) = store.get(STORAGE_KEY)? else {
            return Ok(HighScore::Unset);
        };
        let value: u32 = serde_json::from_str(raw.trim()).map_err(|e| StoreError::Malformed {
            key: STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_value(Some(value)))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        match self.value() {
            Some(n) => {
                let json = serde_json::to_string(&n).map_err(|e| StoreError::Malformed {
                    key: STORAGE_KEY.to_string(),
                    reason: e.to_string(),
                })?;
                store.set(STORAGE_KEY, &json)
            }
            None => store.remove(STORAGE_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_unset_takes_first_score() {
        let mut high = HighScore::Unset;
        assert!(high.record(0));
        assert_eq!(high, HighScore::Zero);
        assert_eq!(high.label(), "");
    }

    #[test]
    fn test_only_improvements_are_recorded() {
        let mut high = HighScore::from_value(Some(5));
        assert!(!high.record(3));
        assert!(!high.record(5));
        assert!(high.record(6));
        assert_eq!(high.value(), Some(6));
        assert_eq!(high.label(), "High: 6");
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store), HighScore::Unset);

        HighScore::from_value(Some(12)).save(&mut store).unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("12"));
        assert_eq!(HighScore::load(&store).value(), Some(12));
    }

    #[test]
    fn test_malformed_value_loads_as_unset() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "undefined").unwrap();
        assert!(matches!(
            HighScore::try_load(&store),
            Err(StoreError::Malformed { .. })
        ));
        assert_eq!(HighScore::load(&store), HighScore::Unset);
    }

    #[test]
    fn test_saving_unset_clears_key() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "3").unwrap();
        HighScore::Unset.save(&mut store).unwrap();
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn prop_high_score_is_running_max(scores in prop::collection::vec(0u32..1000, 1..50)) {
            let mut high = HighScore::Unset;
            for &s in &scores {
                high.record(s);
            }
            prop_assert_eq!(high.value(), scores.iter().copied().max());
        }
    }
}
