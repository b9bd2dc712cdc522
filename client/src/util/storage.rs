//! `localStorage` backend for the session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`BrowserStorage`] is the [`KeyValueStore`] the browser auth client is
//! built over. Keys are written verbatim (`authenticated`, `user`) so the
//! stored layout is readable from the devtools storage panel.
//!
//! TRADE-OFFS
//! ==========
//! Outside the browser (SSR, native tests) there is no storage at all; every
//! call reports [`StorageError::Unavailable`] and the session core reads that
//! as "no session".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::store::{KeyValueStore, StorageError};

/// Handle to `window.localStorage`. Holds nothing; each call looks it up.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(js_error(&e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

#[cfg(feature = "hydrate")]
fn js_error(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(not(feature = "hydrate"))]
fn offline() -> StorageError {
    StorageError::Unavailable("not running in a browser".to_owned())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(js_error(&e)))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(offline())
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write { key: key.to_owned(), reason: js_error(&e) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(offline())
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Write { key: key.to_owned(), reason: js_error(&e) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(offline())
        }
    }
}
