//! Viewport visibility notifications.
//!
//! Reveal-on-scroll and the stat counters only need to know when an element
//! enters the viewport. That capability is the [`VisibilitySource`] trait:
//! observe a target, stop observing it, and poll for visibility changes.
//!
//! Two implementations ship:
//!
//! - [`IntersectionObserver`] computes visibility geometrically from each
//!   element's [`Rect`](crate::dom::Rect), the scroll offset and the viewport
//!   height, with a threshold and a bottom root margin.
//! - [`ScriptedVisibility`] replays entries pushed by the caller, for hosts
//!   (and tests) that learn about visibility some other way.

use crate::dom::{Document, ElementId, Rect};

/// Trigger configuration for an [`IntersectionObserver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target (0.0..=1.0) that must be inside the root box.
    pub threshold: f64,
    /// Added to the bottom edge of the viewport; negative values shrink it.
    pub root_margin_bottom: f64,
}

impl ObserverOptions {
    pub fn new(threshold: f64, root_margin_bottom: f64) -> Self {
        Self {
            threshold,
            root_margin_bottom,
        }
    }
}

/// A visibility change for one observed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn visible(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    pub fn hidden(target: ElementId) -> Self {
        Self {
            target,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

pub trait VisibilitySource {
    fn observe(&mut self, target: ElementId);

    fn unobserve(&mut self, target: ElementId);

    /// Entries for observed targets whose state changed since the last poll.
    /// A newly observed target always reports once.
    fn poll(&mut self, doc: &Document) -> Vec<IntersectionEntry>;
}

/// Fraction of `rect` inside the vertical band `[top, bottom]`.
///
/// Zero-height targets count as fully visible when they sit inside the band.
pub fn intersection_ratio(rect: Rect, top: f64, bottom: f64) -> f64 {
    if rect.height <= 0.0 {
        return if rect.top >= top && rect.top <= bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = rect.bottom().min(bottom) - rect.top.max(top);
    (overlap.max(0.0) / rect.height).min(1.0)
}

/// Geometric observer over the document viewport.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<(ElementId, Option<bool>)>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn observed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.targets.iter().map(|(id, _)| *id)
    }

    fn measure(&self, doc: &Document, target: ElementId) -> (bool, f64) {
        let rect = match doc.get(target).rect() {
            Some(rect) if doc.is_attached(target) => rect,
            _ => return (false, 0.0),
        };
        let top = doc.scroll_y();
        let bottom = top + doc.viewport_height() + self.options.root_margin_bottom;
        if bottom <= top {
            return (false, 0.0);
        }
        let ratio = intersection_ratio(rect, top, bottom);
        let intersecting = if self.options.threshold > 0.0 {
            ratio >= self.options.threshold
        } else {
            ratio > 0.0
        };
        (intersecting, ratio)
    }
}

impl VisibilitySource for IntersectionObserver {
    fn observe(&mut self, target: ElementId) {
        if !self.targets.iter().any(|(id, _)| *id == target) {
            self.targets.push((target, None));
        }
    }

    fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|(id, _)| *id != target);
    }

    fn poll(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        let measured: Vec<_> = self
            .targets
            .iter()
            .map(|(id, _)| self.measure(doc, *id))
            .collect();

        let mut entries = Vec::new();
        for ((target, last), (is_intersecting, ratio)) in self.targets.iter_mut().zip(measured) {
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: *target,
                    is_intersecting,
                    ratio,
                });
            }
        }
        entries
    }
}

/// Visibility source fed by the caller.
///
/// Pushed entries for targets that are not (or no longer) observed are
/// dropped at poll time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVisibility {
    observed: Vec<ElementId>,
    queued: Vec<IntersectionEntry>,
}

impl ScriptedVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: IntersectionEntry) {
        self.queued.push(entry);
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.observed.contains(&target)
    }
}

impl VisibilitySource for ScriptedVisibility {
    fn observe(&mut self, target: ElementId) {
        if !self.observed.contains(&target) {
            self.observed.push(target);
        }
    }

    fn unobserve(&mut self, target: ElementId) {
        self.observed.retain(|id| *id != target);
    }

    fn poll(&mut self, _doc: &Document) -> Vec<IntersectionEntry> {
        let observed = &self.observed;
        std::mem::take(&mut self.queued)
            .into_iter()
            .filter(|e| observed.contains(&e.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_fully_visible_box_is_one() {
        assert_eq!(intersection_ratio(Rect::new(100.0, 50.0), 0.0, 800.0), 1.0);
    }

    #[test]
    fn ratio_of_partly_visible_box() {
        // 20 of 100 px above the bottom edge
        let ratio = intersection_ratio(Rect::new(780.0, 100.0), 0.0, 800.0);
        assert!((ratio - 0.2).abs() < 1e-9);
    }

    #[test]
    fn ratio_outside_band_is_zero() {
        assert_eq!(intersection_ratio(Rect::new(900.0, 100.0), 0.0, 800.0), 0.0);
        assert_eq!(intersection_ratio(Rect::new(0.0, 0.0), 10.0, 800.0), 0.0);
    }

    fn doc_with_box(top: f64, height: f64) -> (Document, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.build("section").class("reveal").rect(top, height).append_to(body);
        (doc, el)
    }

    #[test]
    fn newly_observed_target_reports_once() {
        let (doc, el) = doc_with_box(100.0, 100.0);
        let mut observer = IntersectionObserver::new(ObserverOptions::new(0.1, -50.0));
        observer.observe(el);
        let entries = observer.poll(&doc);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!(observer.poll(&doc).is_empty());
    }

    #[test]
    fn bottom_margin_shrinks_the_viewport() {
        // Box starts 30 px above the viewport bottom: inside a plain viewport,
        // outside once the bottom 50 px are cut off.
        let (doc, el) = doc_with_box(770.0, 100.0);
        let mut plain = IntersectionObserver::new(ObserverOptions::new(0.1, 0.0));
        let mut shrunk = IntersectionObserver::new(ObserverOptions::new(0.1, -50.0));
        plain.observe(el);
        shrunk.observe(el);
        assert!(plain.poll(&doc)[0].is_intersecting);
        assert!(!shrunk.poll(&doc)[0].is_intersecting);
    }

    #[test]
    fn scrolling_reports_transitions() {
        let (mut doc, el) = doc_with_box(1500.0, 200.0);
        let mut observer = IntersectionObserver::new(ObserverOptions::new(0.5, 0.0));
        observer.observe(el);
        assert!(!observer.poll(&doc)[0].is_intersecting);

        doc.set_scroll_y(1000.0);
        let entries = observer.poll(&doc);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        doc.set_scroll_y(0.0);
        assert!(!observer.poll(&doc)[0].is_intersecting);
    }

    #[test]
    fn unobserved_targets_stop_reporting() {
        let (mut doc, el) = doc_with_box(1500.0, 200.0);
        let mut observer = IntersectionObserver::new(ObserverOptions::new(0.5, 0.0));
        observer.observe(el);
        observer.poll(&doc);
        observer.unobserve(el);
        doc.set_scroll_y(1000.0);
        assert!(observer.poll(&doc).is_empty());
    }

    #[test]
    fn elements_without_layout_never_intersect() {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.build("div").append_to(body);
        let mut observer = IntersectionObserver::new(ObserverOptions::new(0.0, 0.0));
        observer.observe(el);
        assert!(!observer.poll(&doc)[0].is_intersecting);
    }

    #[test]
    fn scripted_source_filters_unobserved_targets() {
        let (doc, el) = doc_with_box(0.0, 10.0);
        let mut source = ScriptedVisibility::new();
        source.push(IntersectionEntry::visible(el));
        assert!(source.poll(&doc).is_empty());

        source.observe(el);
        source.push(IntersectionEntry::visible(el));
        assert_eq!(source.poll(&doc), vec![IntersectionEntry::visible(el)]);
        assert!(source.poll(&doc).is_empty());
    }
}
