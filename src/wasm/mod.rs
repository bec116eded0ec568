//! WASM bindings for the sidebar state controller
//!
//! Binds the controller to the page's `.toc` menu and `localStorage`. With the
//! `autostart` feature the module initializes itself on load, which makes the
//! compiled package a drop-in replacement for a site template script.
//! Otherwise call `initSidebar()` or `initSidebarWithConfig(json)` from JS.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::SidebarConfig;
use crate::controller::SidebarController;
use crate::state::StatePersistence;

mod dom;
mod local_storage;

pub use dom::{bind, ready, DomMenu};
pub use local_storage::LocalStorage;

thread_local! {
    static SCHEDULED: Cell<bool> = const { Cell::new(false) };
    static ACTIVE_CONFIG: RefCell<SidebarConfig> = RefCell::new(SidebarConfig::default());
}

/// Initialize with the default configuration as soon as the module loads
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() {
    schedule(SidebarConfig::default());
}

/// Initialize with the default configuration
#[wasm_bindgen(js_name = "initSidebar")]
pub fn init_sidebar() {
    schedule(SidebarConfig::default());
}

/// Initialize with a JSON configuration object; unknown or invalid input
/// falls back to the defaults
#[wasm_bindgen(js_name = "initSidebarWithConfig")]
pub fn init_sidebar_with_config(config_json: &str) {
    let config = match SidebarConfig::from_json(config_json) {
        Ok(config) => config,
        Err(e) => {
            install_hooks();
            log::warn!("Ignoring sidebar configuration: {}", e);
            SidebarConfig::default()
        }
    };
    schedule(config);
}

/// Forget every persisted expand/collapse entry
#[wasm_bindgen(js_name = "resetSidebarState")]
pub fn reset_sidebar_state() {
    let key = ACTIVE_CONFIG.with(|config| config.borrow().storage_key.clone());
    StatePersistence::new(LocalStorage, key).reset_state();
}

fn install_hooks() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(level);
}

fn schedule(config: SidebarConfig) {
    install_hooks();
    if SCHEDULED.with(|scheduled| scheduled.replace(true)) {
        log::warn!("Sidebar state is already initialized, ignoring repeated call");
        return;
    }
    ACTIVE_CONFIG.with(|active| *active.borrow_mut() = config.clone());
    ready(move || initialize(&config));
}

fn initialize(config: &SidebarConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(menu) = DomMenu::find(&document, config) else {
        log::debug!("No '{}' container on this page", config.container_selector());
        return;
    };

    let menu = Rc::new(menu);
    let controller = Rc::new(SidebarController::new(LocalStorage, config));
    let outcome = controller.initialize(&*menu);
    for binding in outcome.bindings {
        bind(Rc::clone(&controller), Rc::clone(&menu), binding);
    }
}
