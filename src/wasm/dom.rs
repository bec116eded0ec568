//! DOM side of the sidebar: menu view, readiness and click dispatch

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element};

use crate::config::SidebarConfig;
use crate::controller::{Binding, SidebarController};
use crate::menu::{ItemLink, MenuView};
use crate::storage::KeyValueStore;
use crate::transition::Affordance;

thread_local! {
    // Click handlers live as long as the page
    static CLICK_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(Vec::new()) };
}

/// Run `f` once the document has been parsed
pub fn ready(f: impl FnOnce() + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("Document is unavailable, sidebar state disabled");
        return;
    };

    if document.ready_state() != "loading" {
        f();
        return;
    }

    let callback = Closure::once_into_js(f);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref(),
        &options,
    ) {
        log::warn!("Failed to wait for DOMContentLoaded: {:?}", e);
    }
}

/// The navigation container and the class names describing its items
#[derive(Debug, Clone)]
pub struct DomMenu {
    container: Element,
    config: SidebarConfig,
}

impl DomMenu {
    /// Locate the navigation container, `None` when the page has no sidebar
    pub fn find(document: &Document, config: &SidebarConfig) -> Option<Self> {
        let container = document
            .query_selector(&config.container_selector())
            .ok()
            .flatten()?;
        Some(Self {
            container,
            config: config.clone(),
        })
    }

    /// Element that receives clicks for `affordance` on `item`
    pub fn affordance_target(&self, item: &Element, affordance: Affordance) -> Option<Element> {
        let selector = match affordance {
            Affordance::ExpandStub => self.config.own_expand_stub_selector(),
            Affordance::HeaderLink => self.config.own_header_toggle_selector(),
        };
        item.query_selector(&selector).ok().flatten()
    }

    fn within_menu(&self, element: &Element) -> bool {
        self.container.contains(Some(&**element))
    }
}

impl MenuView for DomMenu {
    type Item = Element;

    fn expandable_items(&self) -> Vec<Element> {
        let Ok(stubs) = self
            .container
            .query_selector_all(&self.config.expand_stub_selector())
        else {
            return Vec::new();
        };

        let mut items: Vec<Element> = Vec::with_capacity(stubs.length() as usize);
        for index in 0..stubs.length() {
            let Some(li) = stubs.get(index).and_then(|stub| stub.parent_element()) else {
                continue;
            };
            if !items.contains(&li) {
                items.push(li);
            }
        }
        items
    }

    fn item_link(&self, item: &Element) -> Option<ItemLink> {
        let link = item
            .query_selector(&self.config.item_link_selector())
            .ok()
            .flatten()?;
        Some(ItemLink {
            href: link.get_attribute("href"),
            text: link.text_content().unwrap_or_default(),
        })
    }

    fn has_header_toggle(&self, item: &Element) -> bool {
        self.affordance_target(item, Affordance::HeaderLink).is_some()
    }

    fn is_expanded(&self, item: &Element) -> bool {
        item.class_list().contains(&self.config.expanded_class)
    }

    fn set_expanded(&self, item: &Element, expanded: bool) {
        if let Err(e) = item
            .class_list()
            .toggle_with_force(&self.config.expanded_class, expanded)
        {
            log::warn!("Failed to update sidebar item class: {:?}", e);
        }
    }

    fn active_item(&self) -> Option<Element> {
        self.container
            .query_selector(&self.config.active_link_selector())
            .ok()
            .flatten()?
            .closest("li")
            .ok()
            .flatten()
    }

    fn parent_item(&self, item: &Element) -> Option<Element> {
        let parent = item.parent_element()?.closest("li").ok().flatten()?;
        self.within_menu(&parent).then_some(parent)
    }
}

/// Listen for clicks on the target behind `binding` and route them through the controller
pub fn bind<S>(controller: Rc<SidebarController<S>>, menu: Rc<DomMenu>, binding: Binding<Element>)
where
    S: KeyValueStore + 'static,
{
    let Some(target) = menu.affordance_target(&binding.item, binding.affordance) else {
        log::debug!("No {:?} target for '{}'", binding.affordance, binding.identifier);
        return;
    };

    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
        let t = controller.activate(&*menu, &binding);
        if t.prevent_default {
            event.prevent_default();
        }
        if t.stop_propagation {
            event.stop_propagation();
        }
    }));

    if let Err(e) = target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref()) {
        log::warn!("Failed to attach sidebar click handler: {:?}", e);
        return;
    }
    CLICK_HANDLERS.with(|handlers| handlers.borrow_mut().push(callback));
}
