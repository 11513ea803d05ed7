//! Page behaviours.
//!
//! One controller per feature, each attached to a [`Document`] at startup
//! and driven by explicit handler methods. Controllers locate their elements
//! once, by id or class; if an element is missing the controller is not
//! created and the feature stays inert. They never read each other's state:
//! the only shared surface is the document's class names.
//!
//! | Controller                      | Elements                                   |
//! |---------------------------------|--------------------------------------------|
//! | [`menu::MobileMenu`]            | `.mobile-menu-btn`, `.nav-links`            |
//! | [`scroll::ScrollEffects`]       | `.navbar`, `.back-to-top`                   |
//! | [`reveal::RevealAnimator`]      | `.reveal`                                   |
//! | [`filter::ProjectFilter`]       | `.filter-btn[data-filter]`, `.project-card` |
//! | [`contact::ContactForm`]        | `#contactForm` and its fields, `#formStatus`|
//! | [`contact::CharCounter`]        | `#message`, `#charCount`                    |
//! | [`counter::StatCounters`]       | `.stat-number[data-count]`                  |
//! | [`projects`]                    | `#featured-projects`, `#project-container`  |
//!
//! [`Document`]: crate::dom::Document

pub mod contact;
pub mod counter;
pub mod filter;
pub mod menu;
pub mod projects;
pub mod reveal;
pub mod scroll;

use crate::dom::{Document, ElementId};

/// Look up `#id`, logging when the feature has to stay inert.
pub(crate) fn find_id(doc: &Document, id: &str, feature: &str) -> Option<ElementId> {
    let found = doc.by_id(id);
    if found.is_none() {
        tracing::debug!(feature, id, "element missing, feature disabled");
    }
    found
}

/// First `.class`, logging when the feature has to stay inert.
pub(crate) fn find_class(doc: &Document, class: &str, feature: &str) -> Option<ElementId> {
    let found = doc.first_by_class(class);
    if found.is_none() {
        tracing::debug!(feature, class, "element missing, feature disabled");
    }
    found
}
