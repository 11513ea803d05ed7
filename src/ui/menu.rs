//! Mobile navigation menu.

use super::find_class;
use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Toggle button plus the link list it opens. Both carry `active` while open.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: ElementId,
    menu: ElementId,
    state: MenuState,
}

impl MobileMenu {
    pub fn attach(doc: &Document) -> Option<Self> {
        let toggle = find_class(doc, "mobile-menu-btn", "menu")?;
        let menu = find_class(doc, "nav-links", "menu")?;
        Some(Self {
            toggle,
            menu,
            state: MenuState::Closed,
        })
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Route a click anywhere on the page.
    ///
    /// - on the toggle: flip
    /// - on a link inside the menu: close
    /// - inside the menu but not on a link: nothing
    /// - anywhere else: close
    pub fn on_click(&mut self, doc: &mut Document, target: ElementId) {
        if doc.contains(self.toggle, target) {
            let next = match self.state {
                MenuState::Closed => MenuState::Open,
                MenuState::Open => MenuState::Closed,
            };
            self.set_state(doc, next);
        } else if doc.contains(self.menu, target) {
            if self.link_ancestor(doc, target).is_some() {
                self.set_state(doc, MenuState::Closed);
            }
        } else {
            self.set_state(doc, MenuState::Closed);
        }
    }

    /// Nearest `<a>` between `target` and the menu root.
    fn link_ancestor(&self, doc: &Document, target: ElementId) -> Option<ElementId> {
        let mut current = Some(target);
        while let Some(id) = current {
            if doc.get(id).tag() == "a" {
                return Some(id);
            }
            if id == self.menu {
                return None;
            }
            current = doc.parent(id);
        }
        None
    }

    fn set_state(&mut self, doc: &mut Document, state: MenuState) {
        if self.state != state {
            tracing::debug!(?state, "mobile menu");
        }
        self.state = state;
        let open = state == MenuState::Open;
        doc.set_class(self.toggle, "active", open);
        doc.set_class(self.menu, "active", open);
    }
}
