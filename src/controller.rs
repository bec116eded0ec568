//! Sidebar State Controller

use crate::config::SidebarConfig;
use crate::menu::MenuView;
use crate::state::{ExpansionState, StatePersistence};
use crate::storage::KeyValueStore;
use crate::transition::{transition, Affordance, Transition};

/// A toggle target the dispatcher should listen on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<I> {
    pub item: I,
    pub identifier: String,
    pub affordance: Affordance,
}

/// Result of [`SidebarController::initialize`]
#[derive(Debug, Clone)]
pub struct InitOutcome<I> {
    /// Handlers to attach, expand stubs first for each item
    pub bindings: Vec<Binding<I>>,
    /// Items restored from storage
    pub restored: usize,
    /// Expandable items without a derivable identifier
    pub skipped: usize,
    /// Ancestors of the active page that were forced open
    pub expanded_ancestors: usize,
}

/// Restores, toggles and persists the expanded state of menu items
#[derive(Debug)]
pub struct SidebarController<S> {
    persistence: StatePersistence<S>,
}

impl<S: KeyValueStore> SidebarController<S> {
    pub fn new(store: S, config: &SidebarConfig) -> Self {
        Self {
            persistence: StatePersistence::new(store, config.storage_key.clone()),
        }
    }

    pub fn persistence(&self) -> &StatePersistence<S> {
        &self.persistence
    }

    pub fn load_state(&self) -> ExpansionState {
        self.persistence.load_state()
    }

    pub fn save_state(&self, state: &ExpansionState) {
        self.persistence.save_state(state)
    }

    pub fn reset_state(&self) {
        self.persistence.reset_state()
    }

    /// Apply persisted state to `view`, collect toggle bindings, then open the
    /// active page's ancestors.
    pub fn initialize<V: MenuView>(&self, view: &V) -> InitOutcome<V::Item> {
        let state = self.persistence.load_state();
        let mut bindings = Vec::new();
        let mut restored = 0;
        let mut skipped = 0;

        for item in view.expandable_items() {
            let Some(identifier) = view.identifier(&item) else {
                skipped += 1;
                continue;
            };

            let expanded = state.is_expanded(&identifier);
            view.set_expanded(&item, expanded);
            if expanded {
                restored += 1;
            }

            if view.has_header_toggle(&item) {
                bindings.push(Binding {
                    item: item.clone(),
                    identifier: identifier.clone(),
                    affordance: Affordance::ExpandStub,
                });
                bindings.push(Binding {
                    item,
                    identifier,
                    affordance: Affordance::HeaderLink,
                });
            } else {
                bindings.push(Binding {
                    item,
                    identifier,
                    affordance: Affordance::ExpandStub,
                });
            }
        }

        let expanded_ancestors = self.expand_active_ancestry(view);

        log::debug!(
            "Sidebar initialized: {} bindings, {} restored, {} skipped, {} ancestors expanded",
            bindings.len(),
            restored,
            skipped,
            expanded_ancestors
        );

        InitOutcome {
            bindings,
            restored,
            skipped,
            expanded_ancestors,
        }
    }

    /// Handle one activation of a bound target.
    ///
    /// The returned [`Transition`] tells the dispatcher how to treat the
    /// originating event.
    pub fn activate<V: MenuView>(&self, view: &V, binding: &Binding<V::Item>) -> Transition {
        let t = transition(view.is_expanded(&binding.item), binding.affordance);
        view.set_expanded(&binding.item, t.expanded);
        self.persistence.update(&binding.identifier, t.expanded);
        log::trace!("Toggled '{}' -> expanded={}", binding.identifier, t.expanded);
        t
    }

    /// Expand every menu item containing the active one.
    ///
    /// Returns the number of ancestors visited. Ancestors without an
    /// identifier are opened but not persisted.
    pub fn expand_active_ancestry<V: MenuView>(&self, view: &V) -> usize {
        let Some(active) = view.active_item() else {
            return 0;
        };

        let mut count = 0;
        let mut current = view.parent_item(&active);
        while let Some(item) = current {
            view.set_expanded(&item, true);
            if let Some(identifier) = view.identifier(&item) {
                self.persistence.update(&identifier, true);
            }
            count += 1;
            current = view.parent_item(&item);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ItemLink, MenuTree};
    use crate::storage::MemoryStore;

    fn controller(raw: Option<&str>) -> SidebarController<MemoryStore> {
        let config = SidebarConfig::default();
        let store = match raw {
            Some(raw) => MemoryStore::with_entry(&config.storage_key, raw),
            None => MemoryStore::new(),
        };
        SidebarController::new(store, &config)
    }

    fn guide_tree() -> (MenuTree, Vec<crate::menu::MenuItemId>) {
        let mut tree = MenuTree::new();
        let guide = tree.add_root(Some(ItemLink::new("/guide/", "Guide")));
        let intro = tree.add_child(guide, Some(ItemLink::new("/guide/intro", "Intro")));
        tree.add_child(intro, Some(ItemLink::new("/guide/intro/setup", "Setup")));
        let api = tree.add_root(Some(ItemLink::header("API")));
        tree.add_child(api, Some(ItemLink::new("/api/", "Overview")));
        (tree, vec![guide, intro, api])
    }

    #[test]
    fn test_initialize_restores_only_true_entries() {
        let ctl = controller(Some(r#"{"/guide/":true,"/guide/intro":false}"#));
        let (tree, items) = guide_tree();
        tree.set_expanded(&items[1], true);

        let outcome = ctl.initialize(&tree);

        assert!(tree.is_expanded(&items[0]));
        assert!(!tree.is_expanded(&items[1]));
        assert!(!tree.is_expanded(&items[2]));
        assert_eq!(outcome.restored, 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_header_link_gets_second_binding() {
        let ctl = controller(None);
        let (tree, items) = guide_tree();

        let outcome = ctl.initialize(&tree);

        let api_bindings: Vec<_> = outcome
            .bindings
            .iter()
            .filter(|b| b.item == items[2])
            .map(|b| (b.identifier.as_str(), b.affordance))
            .collect();
        assert_eq!(
            api_bindings,
            vec![("API", Affordance::ExpandStub), ("API", Affordance::HeaderLink)]
        );
        assert_eq!(outcome.bindings.len(), 4);
    }

    #[test]
    fn test_item_without_link_is_skipped() {
        let ctl = controller(None);
        let mut tree = MenuTree::new();
        let bare = tree.add_root(None);
        tree.add_child(bare, Some(ItemLink::new("/child", "Child")));

        let outcome = ctl.initialize(&tree);

        assert!(outcome.bindings.is_empty());
        assert_eq!(outcome.skipped, 1);
        assert!(ctl.load_state().is_empty());
    }

    #[test]
    fn test_activate_header_link_prevents_default() {
        let ctl = controller(None);
        let (tree, items) = guide_tree();
        let outcome = ctl.initialize(&tree);
        let header = outcome
            .bindings
            .iter()
            .find(|b| b.affordance == Affordance::HeaderLink)
            .unwrap();

        let t = ctl.activate(&tree, header);

        assert!(t.prevent_default && t.stop_propagation && t.expanded);
        assert!(tree.is_expanded(&items[2]));
        assert_eq!(ctl.load_state().get("API"), Some(true));
    }

    #[test]
    fn test_ancestry_without_active_item() {
        let ctl = controller(None);
        let (tree, _) = guide_tree();
        assert_eq!(ctl.expand_active_ancestry(&tree), 0);
        assert!(ctl.persistence().store().is_empty());
    }

    #[test]
    fn test_ancestor_without_identifier_is_opened_not_persisted() {
        let ctl = controller(None);
        let mut tree = MenuTree::new();
        let bare = tree.add_root(None);
        let leaf = tree.add_child(bare, Some(ItemLink::new("/leaf", "Leaf")));
        tree.set_active(leaf);

        assert_eq!(ctl.expand_active_ancestry(&tree), 1);
        assert!(tree.is_expanded(&bare));
        assert!(ctl.load_state().is_empty());
    }
}
