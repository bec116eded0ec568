//! `window.localStorage` backend

use wasm_bindgen::{JsCast, JsValue};

use crate::error::{SidebarError, SidebarResult};
use crate::storage::KeyValueStore;

/// Per-origin browser storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> SidebarResult<web_sys::Storage> {
        let window = web_sys::window().ok_or(SidebarError::StorageUnavailable)?;
        // Throws when storage is disabled, returns null in some sandboxed frames
        window
            .local_storage()
            .map_err(|_| SidebarError::StorageUnavailable)?
            .ok_or(SidebarError::StorageUnavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> SidebarResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SidebarError::StorageRead {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> SidebarResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SidebarError::StorageWrite {
                key: key.to_string(),
                reason: describe(&e),
            })
    }
}

fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
