//! Menu structure as seen by the controller
//!
//! [`MenuView`] is the DOM contract the controller depends on: which items can
//! expand, what their links look like, where the active page sits, and how
//! to flip the expanded marker. The browser binding implements it over
//! `web_sys::Element`; [`MenuTree`] implements it in memory.

use std::cell::Cell;

/// The navigational link of a menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLink {
    /// Value of the `href` attribute, if any
    pub href: Option<String>,
    /// Visible label text, untrimmed
    pub text: String,
}

impl ItemLink {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
        }
    }

    /// Section header link with no destination
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            href: None,
            text: text.into(),
        }
    }
}

/// Derive the persistence identifier of a menu item.
///
/// Prefers a non-empty href, falls back to the trimmed label, and yields
/// `None` when the item has no link at all.
pub fn item_identifier(link: Option<&ItemLink>) -> Option<String> {
    let link = link?;
    match link.href.as_deref() {
        Some(href) if !href.is_empty() => Some(href.to_string()),
        _ => Some(link.text.trim().to_string()),
    }
}

/// Read/write access to an expandable navigation menu
pub trait MenuView {
    /// Handle to one list item
    type Item: Clone;

    /// Items that own an expand affordance, in document order
    fn expandable_items(&self) -> Vec<Self::Item>;

    /// The item's navigational link, if it has one
    fn item_link(&self, item: &Self::Item) -> Option<ItemLink>;

    /// Whether the item's header holds a second toggle target that is not a link
    fn has_header_toggle(&self, item: &Self::Item) -> bool;

    fn is_expanded(&self, item: &Self::Item) -> bool;

    fn set_expanded(&self, item: &Self::Item, expanded: bool);

    /// The item representing the current page
    fn active_item(&self) -> Option<Self::Item>;

    /// Nearest menu item containing `item`
    fn parent_item(&self, item: &Self::Item) -> Option<Self::Item>;

    fn identifier(&self, item: &Self::Item) -> Option<String> {
        item_identifier(self.item_link(item).as_ref())
    }
}

/// Index of a node inside a [`MenuTree`].
///
/// Only meaningful for the tree that issued it. Lookups with an id from
/// another tree either hit an unrelated node or find nothing; the [`MenuView`]
/// methods treat a missing node as an item with no link, no parent and no
/// expanded marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuItemId(usize);

#[derive(Debug)]
struct MenuNode {
    link: Option<ItemLink>,
    parent: Option<MenuItemId>,
    children: Vec<MenuItemId>,
    active: bool,
    expanded: Cell<bool>,
}

/// In-memory menu for native hosts and tests.
///
/// An item is expandable once it has children, mirroring the expand stub the
/// site generator renders next to every nested list.
#[derive(Debug, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level item
    pub fn add_root(&mut self, link: Option<ItemLink>) -> MenuItemId {
        self.push(link, None)
    }

    /// Add an item nested under `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn add_child(&mut self, parent: MenuItemId, link: Option<ItemLink>) -> MenuItemId {
        let id = self.push(link, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Mark `item` as the current page, clearing any previous mark. An unknown
    /// id leaves the tree without an active item.
    pub fn set_active(&mut self, item: MenuItemId) {
        for node in &mut self.nodes {
            node.active = false;
        }
        if let Some(node) = self.nodes.get_mut(item.0) {
            node.active = true;
        }
    }

    pub fn children(&self, item: MenuItemId) -> &[MenuItemId] {
        self.node(item)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// First item whose link points at `href`
    pub fn find_by_href(&self, href: &str) -> Option<MenuItemId> {
        self.nodes
            .iter()
            .position(|node| {
                node.link
                    .as_ref()
                    .is_some_and(|link| link.href.as_deref() == Some(href))
            })
            .map(MenuItemId)
    }

    fn node(&self, item: MenuItemId) -> Option<&MenuNode> {
        self.nodes.get(item.0)
    }

    fn push(&mut self, link: Option<ItemLink>, parent: Option<MenuItemId>) -> MenuItemId {
        let id = MenuItemId(self.nodes.len());
        self.nodes.push(MenuNode {
            link,
            parent,
            children: Vec::new(),
            active: false,
            expanded: Cell::new(false),
        });
        id
    }
}

impl MenuView for MenuTree {
    type Item = MenuItemId;

    fn expandable_items(&self) -> Vec<MenuItemId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.children.is_empty())
            .map(|(index, _)| MenuItemId(index))
            .collect()
    }

    fn item_link(&self, item: &MenuItemId) -> Option<ItemLink> {
        self.node(*item).and_then(|node| node.link.clone())
    }

    fn has_header_toggle(&self, item: &MenuItemId) -> bool {
        self.node(*item).is_some_and(|node| {
            !node.children.is_empty()
                && node.link.as_ref().is_some_and(|link| link.href.is_none())
        })
    }

    fn is_expanded(&self, item: &MenuItemId) -> bool {
        self.node(*item).is_some_and(|node| node.expanded.get())
    }

    fn set_expanded(&self, item: &MenuItemId, expanded: bool) {
        if let Some(node) = self.node(*item) {
            node.expanded.set(expanded);
        }
    }

    fn active_item(&self) -> Option<MenuItemId> {
        self.nodes.iter().position(|node| node.active).map(MenuItemId)
    }

    fn parent_item(&self, item: &MenuItemId) -> Option<MenuItemId> {
        self.node(*item).and_then(|node| node.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(ItemLink::new("/guide/intro", "Intro")), Some("/guide/intro"))]
    #[case(Some(ItemLink::new("", "  Getting Started \n")), Some("Getting Started"))]
    #[case(Some(ItemLink::header("  Reference ")), Some("Reference"))]
    #[case(Some(ItemLink::header("   ")), Some(""))]
    #[case(None, None)]
    fn test_item_identifier(#[case] link: Option<ItemLink>, #[case] expected: Option<&str>) {
        assert_eq!(item_identifier(link.as_ref()).as_deref(), expected);
    }

    #[test]
    fn test_tree_relations() {
        let mut tree = MenuTree::new();
        let guide = tree.add_root(Some(ItemLink::new("/guide/", "Guide")));
        let intro = tree.add_child(guide, Some(ItemLink::new("/guide/intro", "Intro")));
        let leaf = tree.add_child(intro, Some(ItemLink::new("/guide/intro/setup", "Setup")));
        tree.set_active(leaf);

        assert_eq!(tree.expandable_items(), vec![guide, intro]);
        assert_eq!(tree.active_item(), Some(leaf));
        assert_eq!(tree.parent_item(&leaf), Some(intro));
        assert_eq!(tree.parent_item(&guide), None);
        assert_eq!(tree.children(guide), &[intro]);
        assert_eq!(tree.find_by_href("/guide/intro"), Some(intro));
        assert_eq!(tree.identifier(&intro).as_deref(), Some("/guide/intro"));
    }

    #[test]
    fn test_header_toggle_needs_children_and_no_href() {
        let mut tree = MenuTree::new();
        let section = tree.add_root(Some(ItemLink::header("API")));
        let page = tree.add_child(section, Some(ItemLink::new("/api/", "Overview")));
        let lone_header = tree.add_root(Some(ItemLink::header("Empty")));

        assert!(tree.has_header_toggle(&section));
        assert!(!tree.has_header_toggle(&page));
        assert!(!tree.has_header_toggle(&lone_header));
    }

    #[test]
    fn test_foreign_id_is_treated_as_missing() {
        let mut big = MenuTree::new();
        let root = big.add_root(Some(ItemLink::new("/a/", "A")));
        big.add_child(root, Some(ItemLink::new("/a/b", "B")));
        let foreign = big.add_root(Some(ItemLink::new("/c/", "C")));

        let mut tree = MenuTree::new();
        tree.add_root(Some(ItemLink::header("Only")));
        tree.set_active(foreign);

        assert_eq!(tree.item_link(&foreign), None);
        assert_eq!(tree.identifier(&foreign), None);
        assert!(!tree.has_header_toggle(&foreign));
        tree.set_expanded(&foreign, true);
        assert!(!tree.is_expanded(&foreign));
        assert_eq!(tree.parent_item(&foreign), None);
        assert!(tree.children(foreign).is_empty());
        assert_eq!(tree.active_item(), None);
    }
}
