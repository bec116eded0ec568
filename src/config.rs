//! Sidebar configuration - storage key and the DOM marker classes

use serde::{Deserialize, Serialize};

use crate::error::{SidebarError, SidebarResult};

/// Storage key used by the drop-in documentation script
pub const DEFAULT_STORAGE_KEY: &str = "sidebar-collapse-state";

/// Names the storage entry and the classes that make up the menu's DOM contract.
///
/// Every field has a default, so a host only needs to spell out what differs:
///
/// ```rust
/// use sidebar_state::config::SidebarConfig;
///
/// let config = SidebarConfig::from_json(r#"{"expanded_class": "open"}"#).unwrap();
/// assert_eq!(config.expanded_class, "open");
/// assert_eq!(config.container_class, "toc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Local storage key holding the serialized state map
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Class of the navigation container
    #[serde(default = "default_container_class")]
    pub container_class: String,
    /// Class of the expand affordance inside a list item with children
    #[serde(default = "default_expand_stub_class")]
    pub expand_stub_class: String,
    /// Class of a menu item's navigational link
    #[serde(default = "default_item_link_class")]
    pub item_link_class: String,
    /// Class marking the current page's link
    #[serde(default = "default_active_class")]
    pub active_class: String,
    /// Class toggled on a list item while it is expanded
    #[serde(default = "default_expanded_class")]
    pub expanded_class: String,
}

fn default_storage_key() -> String { DEFAULT_STORAGE_KEY.to_string() }
fn default_container_class() -> String { "toc".to_string() }
fn default_expand_stub_class() -> String { "expand-stub".to_string() }
fn default_item_link_class() -> String { "sidebar-item".to_string() }
fn default_active_class() -> String { "active".to_string() }
fn default_expanded_class() -> String { "in".to_string() }

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            container_class: default_container_class(),
            expand_stub_class: default_expand_stub_class(),
            item_link_class: default_item_link_class(),
            active_class: default_active_class(),
            expanded_class: default_expanded_class(),
        }
    }
}

impl SidebarConfig {
    /// Parse a (possibly partial) JSON configuration object
    pub fn from_json(json: &str) -> SidebarResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be used as a storage key or a CSS class
    pub fn validate(&self) -> SidebarResult<()> {
        if self.storage_key.is_empty() {
            return Err(SidebarError::InvalidConfig("storage_key is empty".to_string()));
        }
        let classes = [
            ("container_class", &self.container_class),
            ("expand_stub_class", &self.expand_stub_class),
            ("item_link_class", &self.item_link_class),
            ("active_class", &self.active_class),
            ("expanded_class", &self.expanded_class),
        ];
        for (field, class) in classes {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(SidebarError::InvalidConfig(format!(
                    "{field} must be a single class name, got '{class}'"
                )));
            }
        }
        Ok(())
    }

    /// `.toc`
    pub fn container_selector(&self) -> String {
        format!(".{}", self.container_class)
    }

    /// `li > .expand-stub`
    pub fn expand_stub_selector(&self) -> String {
        format!("li > .{}", self.expand_stub_class)
    }

    /// `a.sidebar-item`
    pub fn item_link_selector(&self) -> String {
        format!("a.{}", self.item_link_class)
    }

    /// `.sidebar-item.active`
    pub fn active_link_selector(&self) -> String {
        format!(".{}.{}", self.item_link_class, self.active_class)
    }

    /// Section header without a destination: `.expand-stub + a:not([href])`
    pub fn header_toggle_selector(&self) -> String {
        format!(".{} + a:not([href])", self.expand_stub_class)
    }

    /// The item's own expand stub, relative to its `li`: `:scope > .expand-stub`
    pub fn own_expand_stub_selector(&self) -> String {
        format!(":scope > .{}", self.expand_stub_class)
    }

    /// The item's own header toggle, never one from a nested list
    pub fn own_header_toggle_selector(&self) -> String {
        format!(":scope > {}", self.header_toggle_selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_docfx_markup() {
        let config = SidebarConfig::default();
        assert_eq!(config.storage_key, "sidebar-collapse-state");
        assert_eq!(config.container_selector(), ".toc");
        assert_eq!(config.expand_stub_selector(), "li > .expand-stub");
        assert_eq!(config.item_link_selector(), "a.sidebar-item");
        assert_eq!(config.active_link_selector(), ".sidebar-item.active");
        assert_eq!(config.header_toggle_selector(), ".expand-stub + a:not([href])");
    }

    #[test]
    fn test_item_relative_selectors_stay_on_own_header() {
        let config = SidebarConfig::default();
        assert_eq!(config.own_expand_stub_selector(), ":scope > .expand-stub");
        assert_eq!(
            config.own_header_toggle_selector(),
            ":scope > .expand-stub + a:not([href])"
        );

        let config = SidebarConfig::from_json(r#"{"expand_stub_class": "caret"}"#).unwrap();
        assert_eq!(config.own_expand_stub_selector(), ":scope > .caret");
        assert_eq!(config.own_header_toggle_selector(), ":scope > .caret + a:not([href])");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SidebarConfig::from_json(r#"{"storage_key": "docs-nav"}"#).unwrap();
        assert_eq!(config.storage_key, "docs-nav");
        assert_eq!(config.expanded_class, "in");
        assert_eq!(SidebarConfig::from_json("{}").unwrap(), SidebarConfig::default());
    }

    #[test]
    fn test_rejects_unusable_values() {
        assert!(matches!(
            SidebarConfig::from_json(r#"{"storage_key": ""}"#),
            Err(SidebarError::InvalidConfig(_))
        ));
        assert!(matches!(
            SidebarConfig::from_json(r#"{"active_class": "is active"}"#),
            Err(SidebarError::InvalidConfig(_))
        ));
        assert!(matches!(
            SidebarConfig::from_json("not json"),
            Err(SidebarError::Serialization(_))
        ));
    }
}
