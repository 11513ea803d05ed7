//! Stat counters that count up from zero once scrolled into view.
//!
//! Each `.stat-number[data-count]` is observed until it first intersects.
//! Then observation stops and an animation runs: every frame adds
//! `target / (duration / frame_interval)` and shows the floor, until the
//! running value reaches the target, which is then shown exactly.

use crate::dom::{Document, ElementId};
use crate::observer::{IntersectionEntry, VisibilitySource};
use crate::validate::is_space;
use std::time::Duration;

/// Frame-by-frame count from 0 to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    current: f64,
    increment: f64,
}

/// What a single step displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Intermediate value; another frame follows.
    Running(u64),
    /// Final value; the animation is over.
    Done(u64),
}

impl CounterAnimation {
    /// A zero frame interval or zero duration finishes in a single step.
    pub fn new(target: u64, duration: Duration, frame_interval: Duration) -> Self {
        let frames = duration.as_secs_f64() / frame_interval.as_secs_f64();
        let increment = if frames.is_finite() && frames > 0.0 {
            target as f64 / frames
        } else {
            target as f64
        };
        Self {
            target,
            current: 0.0,
            increment,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn step(&mut self) -> Step {
        self.current += self.increment;
        if self.current < self.target as f64 {
            Step::Running(self.current.floor() as u64)
        } else {
            Step::Done(self.target)
        }
    }
}

/// Leading integer of a `data-count` value.
///
/// Leading whitespace and a `+` sign are skipped, a `0x` prefix reads hex,
/// and anything after the digits is ignored, so `50+` counts to 50.
/// Negative, empty and overflowing values yield `None`.
pub fn parse_count(raw: &str) -> Option<u64> {
    let s = raw.trim_start_matches(is_space);
    let s = s.strip_prefix('+').unwrap_or(s);
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    u64::from_str_radix(&digits[..end], radix).ok()
}

#[derive(Debug, Clone)]
struct Counter {
    element: ElementId,
    target: u64,
    animation: Option<CounterAnimation>,
}

#[derive(Debug, Clone)]
pub struct StatCounters {
    counters: Vec<Counter>,
    duration: Duration,
    frame_interval: Duration,
}

impl StatCounters {
    /// Observe every `.stat-number` whose `data-count` starts with a count.
    pub fn attach(
        doc: &Document,
        source: &mut dyn VisibilitySource,
        duration: Duration,
        frame_interval: Duration,
    ) -> Self {
        let mut counters = Vec::new();
        for element in doc.by_class("stat-number") {
            let Some(raw) = doc.data(element, "count") else {
                continue;
            };
            match parse_count(raw) {
                Some(target) => {
                    source.observe(element);
                    counters.push(Counter {
                        element,
                        target,
                        animation: None,
                    });
                }
                None => tracing::debug!(value = raw, "unparsable data-count, counter skipped"),
            }
        }
        Self {
            counters,
            duration,
            frame_interval,
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Start counters that just became visible, running their first step
    /// immediately. Returns the elements that need another frame.
    pub fn handle_entries(
        &mut self,
        doc: &mut Document,
        source: &mut dyn VisibilitySource,
        entries: &[IntersectionEntry],
    ) -> Vec<ElementId> {
        let mut scheduled = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(counter) = self
                .counters
                .iter_mut()
                .find(|c| c.element == entry.target && c.animation.is_none())
            else {
                continue;
            };
            source.unobserve(counter.element);
            tracing::debug!(count = counter.target, "counter started");
            counter.animation = Some(CounterAnimation::new(
                counter.target,
                self.duration,
                self.frame_interval,
            ));
            if Self::advance(doc, counter) {
                scheduled.push(counter.element);
            }
        }
        scheduled
    }

    /// Run one animation frame. Returns whether another frame is needed.
    pub fn on_frame(&mut self, doc: &mut Document, element: ElementId) -> bool {
        match self.counters.iter_mut().find(|c| c.element == element) {
            Some(counter) => Self::advance(doc, counter),
            None => false,
        }
    }

    fn advance(doc: &mut Document, counter: &mut Counter) -> bool {
        let Some(animation) = counter.animation.as_mut() else {
            return false;
        };
        match animation.step() {
            Step::Running(value) => {
                doc.set_text(counter.element, value.to_string());
                true
            }
            Step::Done(value) => {
                doc.set_text(counter.element, value.to_string());
                false
            }
        }
    }
}
