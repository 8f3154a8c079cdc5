//! `localStorage` backend for form drafts and preferences

use form_state::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// Origin-scoped browser storage
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's `localStorage`
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("No window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe(&e)))?
            .ok_or_else(|| StoreError::Unavailable("No localStorage".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::ReadFailed {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: describe(&e),
            })
    }
}

/// Message of a thrown JS value (e.g. `QuotaExceededError`)
fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let mut store = LocalStorage::open().unwrap();
        store.set("form_test-storage", r#"{"a":"1"}"#).unwrap();
        assert_eq!(
            store.get("form_test-storage").unwrap().as_deref(),
            Some(r#"{"a":"1"}"#)
        );

        store.remove("form_test-storage").unwrap();
        assert_eq!(store.get("form_test-storage").unwrap(), None);
    }
}
