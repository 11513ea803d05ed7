//! Category filter for the project grid.
//!
//! Exactly one `.filter-btn` carries `active`. Selecting a button shows the
//! `.project-card`s whose `data-category` matches its `data-filter` (every
//! card for `all`) and hides the rest. Cards are looked up at click time, so
//! cards rendered after attach are filtered too.

use crate::dom::{Display, Document, ElementId};
use std::fmt;

/// Inline animation given to cards a filter shows.
pub const CARD_ANIMATION: &str = "fadeInUp 0.5s ease forwards";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterTag {
    #[default]
    All,
    Only(String),
}

impl FilterTag {
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => FilterTag::All,
            other => FilterTag::Only(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterTag::All => "all",
            FilterTag::Only(tag) => tag,
        }
    }

    /// Whether a card with `category` is shown under this tag.
    pub fn shows(&self, category: Option<&str>) -> bool {
        match self {
            FilterTag::All => true,
            FilterTag::Only(tag) => category == Some(tag.as_str()),
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ProjectFilter {
    buttons: Vec<(ElementId, FilterTag)>,
    active: FilterTag,
}

impl ProjectFilter {
    /// Collect the filter buttons and make the `all` button (or the first
    /// one) the single active button.
    pub fn attach(doc: &mut Document) -> Option<Self> {
        let buttons: Vec<_> = doc
            .by_class("filter-btn")
            .into_iter()
            .filter_map(|b| doc.data(b, "filter").map(|f| (b, FilterTag::parse(f))))
            .collect();
        if buttons.is_empty() {
            tracing::debug!("no .filter-btn[data-filter], project filter disabled");
            return None;
        }

        let (initial, tag) = buttons
            .iter()
            .find(|(_, tag)| *tag == FilterTag::All)
            .unwrap_or(&buttons[0])
            .clone();
        let mut filter = Self {
            buttons,
            active: tag,
        };
        filter.mark_active(doc, initial);
        Some(filter)
    }

    pub fn active(&self) -> &FilterTag {
        &self.active
    }

    /// Route a click; returns whether it landed on a filter button.
    pub fn on_click(&mut self, doc: &mut Document, target: ElementId) -> bool {
        let Some((button, tag)) = self
            .buttons
            .iter()
            .find(|(b, _)| doc.contains(*b, target))
            .cloned()
        else {
            return false;
        };
        self.mark_active(doc, button);
        self.active = tag;
        apply(doc, &self.active);
        tracing::debug!(filter = %self.active, "project filter");
        true
    }

    fn mark_active(&self, doc: &mut Document, button: ElementId) {
        for (b, _) in &self.buttons {
            doc.set_class(*b, "active", *b == button);
        }
    }
}

/// Show or hide every `.project-card` according to `tag`.
pub fn apply(doc: &mut Document, tag: &FilterTag) {
    for card in doc.by_class("project-card") {
        if tag.shows(doc.data(card, "category")) {
            doc.set_display(card, Display::Block);
            doc.set_animation(card, Some(CARD_ANIMATION));
        } else {
            doc.set_display(card, Display::None);
        }
    }
}
