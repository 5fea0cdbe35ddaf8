//! Browser sessionStorage backend

use web_sys::Storage;

use crate::persistence::{KeyValueStore, StoreError};

/// `window.sessionStorage`; values vanish when the tab closes
pub struct SessionStore {
    storage: Storage,
}

impl SessionStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn access_error(key: &str, err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Access {
        key: key.to_string(),
        reason: format!("{:?}", err),
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| access_error(key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| access_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| access_error(key, e))
    }
}
