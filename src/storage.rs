//! Key-value storage abstraction
//!
//! The controller never touches `window.localStorage` directly. It talks to a
//! [`KeyValueStore`], which the browser binding implements over `web_sys::Storage`
//! and tests implement with [`MemoryStore`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{SidebarError, SidebarResult};

/// Synchronous string key-value storage scoped to one origin
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if the key is absent
    fn get_item(&self, key: &str) -> SidebarResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> SidebarResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> SidebarResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> SidebarResult<()> {
        (**self).set_item(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> SidebarResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> SidebarResult<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory store for native hosts and tests.
///
/// Reads and writes can be switched to fail, which stands in for disabled
/// storage or an exceeded quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw value under `key`, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> SidebarResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(SidebarError::StorageRead {
                key: key.to_string(),
                reason: "reads disabled".to_string(),
            });
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SidebarResult<()> {
        if self.fail_writes.get() {
            return Err(SidebarError::StorageWrite {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failure_injection() {
        let store = MemoryStore::with_entry("k", "v");
        store.set_fail_reads(true);
        assert!(matches!(store.get_item("k"), Err(SidebarError::StorageRead { .. })));

        store.set_fail_writes(true);
        assert!(matches!(store.set_item("k", "w"), Err(SidebarError::StorageWrite { .. })));
        assert_eq!(store.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_shared_handles_see_same_entries() {
        let store = Rc::new(MemoryStore::new());
        let handle = Rc::clone(&store);
        handle.set_item("k", "v").unwrap();
        assert_eq!((&*store).get_item("k").unwrap().as_deref(), Some("v"));
    }
}
