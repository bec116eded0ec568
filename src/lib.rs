//! Sidebar State - expand/collapse persistence for documentation sidebars
//!
//! Remembers which sections of a documentation site's navigation menu are
//! expanded across page loads, and makes sure the current page is always
//! visible by opening every section that contains it.
//!
//! The core is target-independent and works against two seams:
//! - [`storage::KeyValueStore`] for the persisted map (`localStorage` in the browser)
//! - [`menu::MenuView`] for the menu structure (the DOM in the browser)
//!
//! The `wasm` feature binds both to the real page; `autostart` additionally
//! runs the controller as soon as the module is loaded.
//!
//! ## Example
//! ```rust
//! use sidebar_state::prelude::*;
//!
//! let mut tree = MenuTree::new();
//! let guide = tree.add_root(Some(ItemLink::new("/guide/", "Guide")));
//! let intro = tree.add_child(guide, Some(ItemLink::new("/guide/intro", "Intro")));
//! tree.set_active(intro);
//!
//! let controller = SidebarController::new(MemoryStore::new(), &SidebarConfig::default());
//! let outcome = controller.initialize(&tree);
//!
//! // The active page's section is opened and remembered
//! assert!(tree.is_expanded(&guide));
//! assert!(controller.load_state().is_expanded("/guide/"));
//!
//! // Clicking the expand stub collapses it again
//! controller.activate(&tree, &outcome.bindings[0]);
//! assert!(!tree.is_expanded(&guide));
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod menu;
pub mod state;
pub mod storage;
pub mod transition;

// Re-export common types
pub mod prelude {
    pub use crate::config::{SidebarConfig, DEFAULT_STORAGE_KEY};
    pub use crate::controller::{Binding, InitOutcome, SidebarController};
    pub use crate::error::{SidebarError, SidebarResult};
    pub use crate::menu::{item_identifier, ItemLink, MenuItemId, MenuTree, MenuView};
    pub use crate::state::{ExpansionState, StatePersistence};
    pub use crate::storage::{KeyValueStore, MemoryStore};
    pub use crate::transition::{transition, Affordance, Transition};
}

#[cfg(feature = "wasm")]
pub mod wasm;
