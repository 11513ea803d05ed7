//! Navbar and back-to-top scroll effects.

use crate::config::ScrollConfig;
use crate::dom::{Document, ElementId};

pub fn navbar_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn back_to_top_visible(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Either element may be missing; the other keeps working.
#[derive(Debug, Clone)]
pub struct ScrollEffects {
    navbar: Option<ElementId>,
    back_to_top: Option<ElementId>,
    navbar_offset: f64,
    back_to_top_offset: f64,
}

impl ScrollEffects {
    pub fn attach(doc: &Document, config: &ScrollConfig) -> Option<Self> {
        let navbar = doc.first_by_class("navbar");
        let back_to_top = doc.first_by_class("back-to-top");
        if navbar.is_none() && back_to_top.is_none() {
            tracing::debug!("no .navbar or .back-to-top, scroll effects disabled");
            return None;
        }
        Some(Self {
            navbar,
            back_to_top,
            navbar_offset: config.navbar_offset,
            back_to_top_offset: config.back_to_top_offset,
        })
    }

    pub fn on_scroll(&self, doc: &mut Document) {
        let offset = doc.scroll_y();
        if let Some(navbar) = self.navbar {
            doc.set_class(navbar, "scrolled", navbar_scrolled(offset, self.navbar_offset));
        }
        if let Some(button) = self.back_to_top {
            doc.set_class(
                button,
                "visible",
                back_to_top_visible(offset, self.back_to_top_offset),
            );
        }
    }

    /// Scroll to the top when the back-to-top button is clicked.
    /// Returns whether the click was handled.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> bool {
        match self.back_to_top {
            Some(button) if doc.contains(button, target) => {
                doc.set_scroll_y(0.0);
                self.on_scroll(doc);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let navbar = doc.build("nav").class("navbar").append_to(body);
        let top = doc.build("button").class("back-to-top").append_to(body);
        (doc, navbar, top)
    }

    fn scroll_to(doc: &mut Document, effects: &ScrollEffects, offset: f64) {
        doc.set_scroll_y(offset);
        effects.on_scroll(doc);
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(!navbar_scrolled(50.0, 50.0));
        assert!(navbar_scrolled(50.5, 50.0));
        assert!(!back_to_top_visible(500.0, 500.0));
        assert!(back_to_top_visible(501.0, 500.0));
    }

    #[test]
    fn classes_follow_offset() {
        let (mut doc, navbar, top) = page();
        let effects = ScrollEffects::attach(&doc, &ScrollConfig::default()).unwrap();

        scroll_to(&mut doc, &effects, 100.0);
        assert!(doc.has_class(navbar, "scrolled"));
        assert!(!doc.has_class(top, "visible"));

        scroll_to(&mut doc, &effects, 600.0);
        assert!(doc.has_class(top, "visible"));

        scroll_to(&mut doc, &effects, 0.0);
        assert!(!doc.has_class(navbar, "scrolled"));
        assert!(!doc.has_class(top, "visible"));
    }

    #[test]
    fn back_to_top_click_scrolls_home() {
        let (mut doc, navbar, top) = page();
        let effects = ScrollEffects::attach(&doc, &ScrollConfig::default()).unwrap();
        scroll_to(&mut doc, &effects, 1200.0);

        assert!(effects.on_click(&mut doc, top));
        assert_eq!(doc.scroll_y(), 0.0);
        assert!(!doc.has_class(top, "visible"));
        assert!(!doc.has_class(navbar, "scrolled"));

        assert!(!effects.on_click(&mut doc, navbar));
    }

    #[test]
    fn works_with_only_a_navbar() {
        let mut doc = Document::new();
        let body = doc.body();
        let navbar = doc.build("nav").class("navbar").append_to(body);
        let effects = ScrollEffects::attach(&doc, &ScrollConfig::default()).unwrap();
        scroll_to(&mut doc, &effects, 700.0);
        assert!(doc.has_class(navbar, "scrolled"));
        assert!(!effects.on_click(&mut doc, navbar));
    }

    #[test]
    fn custom_offsets() {
        let (mut doc, navbar, _) = page();
        let config = ScrollConfig {
            navbar_offset: 200.0,
            back_to_top_offset: 900.0,
        };
        let effects = ScrollEffects::attach(&doc, &config).unwrap();
        scroll_to(&mut doc, &effects, 150.0);
        assert!(!doc.has_class(navbar, "scrolled"));
    }

    #[test]
    fn nothing_to_drive() {
        assert!(ScrollEffects::attach(&Document::new(), &ScrollConfig::default()).is_none());
    }
}
