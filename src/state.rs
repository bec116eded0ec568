//! Persisted expand/collapse state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SidebarResult;
use crate::storage::KeyValueStore;

/// Mapping from menu item identifier to its expanded flag.
///
/// Serializes as a plain JSON object, e.g. `{"/guide/intro": true}`. The key is
/// shared with other scripts on the same origin, so entries whose value is
/// not a boolean are carried through untouched: they read as collapsed and
/// are written back as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    items: BTreeMap<String, Value>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored flag for `id`, `None` when the item was never recorded or its
    /// value is not a boolean
    pub fn get(&self, id: &str) -> Option<bool> {
        self.items.get(id).and_then(Value::as_bool)
    }

    /// Lookup with the collapsed default for unknown items
    pub fn is_expanded(&self, id: &str) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        self.items.insert(id.into(), Value::Bool(expanded));
    }

    /// Number of entries, including ones that are not booleans
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Boolean entries only
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.items
            .iter()
            .filter_map(|(id, value)| value.as_bool().map(|expanded| (id.as_str(), expanded)))
    }
}

impl FromIterator<(String, bool)> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(id, expanded)| (id, Value::Bool(expanded)))
                .collect(),
        }
    }
}

/// Reads and writes [`ExpansionState`] under one storage key.
///
/// This is where storage failures stop: they are logged as warnings and the
/// feature degrades to "no persistence" instead of breaking the page.
#[derive(Debug)]
pub struct StatePersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StatePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted map, empty if missing, malformed or unreadable
    pub fn load_state(&self) -> ExpansionState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Failed to read sidebar state from storage: {}", e);
                ExpansionState::new()
            }
        }
    }

    /// Serialize and store the map; failures are logged and dropped
    pub fn save_state(&self, state: &ExpansionState) {
        if let Err(e) = self.try_save(state) {
            log::warn!("Failed to save sidebar state to storage: {}", e);
        }
    }

    /// Fresh read-modify-write of a single identifier
    pub fn update(&self, id: &str, expanded: bool) {
        let mut state = self.load_state();
        state.set(id, expanded);
        self.save_state(&state);
    }

    /// Forget every recorded item
    pub fn reset_state(&self) {
        self.save_state(&ExpansionState::new());
    }

    fn try_load(&self) -> SidebarResult<ExpansionState> {
        match self.store.get_item(&self.key)? {
            // An empty string counts as "nothing stored"
            Some(raw) if !raw.is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(ExpansionState::new()),
        }
    }

    fn try_save(&self, state: &ExpansionState) -> SidebarResult<()> {
        let raw = serde_json::to_string(state)?;
        self.store.set_item(&self.key, &raw)
    }
}
