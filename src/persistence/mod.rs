//! Key/value persistence
//!
//! The game persists two small values per browser session: the high score
//! and the player's settings. Both go through `KeyValueStore`, so the
//! simulation never touches browser APIs directly and tests run against
//! `MemoryStore`.

pub mod store;

pub use store::{KeyValueStore, MemoryStore, StoreError};
