//! Reveal-on-scroll: `.reveal` elements gain `active` the first time they
//! intersect the viewport, and keep it.

use crate::dom::{Document, ElementId};
use crate::observer::{IntersectionEntry, VisibilitySource};

#[derive(Debug, Clone, Default)]
pub struct RevealAnimator {
    targets: Vec<ElementId>,
}

impl RevealAnimator {
    /// Observe every `.reveal` element currently in the document.
    pub fn attach(doc: &Document, source: &mut dyn VisibilitySource) -> Self {
        let targets = doc.by_class("reveal");
        for target in &targets {
            source.observe(*target);
        }
        tracing::debug!(count = targets.len(), "reveal targets observed");
        Self { targets }
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn handle_entries(&self, doc: &mut Document, entries: &[IntersectionEntry]) {
        for entry in entries {
            if entry.is_intersecting && self.targets.contains(&entry.target) {
                doc.add_class(entry.target, "active");
            }
        }
    }
}
