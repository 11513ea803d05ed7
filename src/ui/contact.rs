//! Contact form: per-field validation, status notices and submission.
//!
//! ## Flow
//!
//! ```text
//! blur(field)  -> validate that field, paint success/error
//! submit       -> validate every field
//!                 invalid: notice "Please fix the errors above"
//!                 valid:   button loading + disabled, wait submitter latency
//! settled      -> submitter.deliver(message)
//!                 Ok:  thank-you notice, fields reset
//!                 Err: failure notice
//!                 both: button restored
//! ```
//!
//! Deferred work (the submission latency and notice expiry) is not run here.
//! Handlers return a [`FormEffect`] that the caller schedules and later feeds
//! back through [`ContactForm::on_settled`] / [`ContactForm::on_notice_expired`].

use super::find_id;
use crate::dom::{Display, Document, ElementId};
use crate::validate::{Field, Limits};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub const INVALID_NOTICE: &str = "Please fix the errors above";
pub const FAILURE_NOTICE: &str = "Oops! Something went wrong. Please try again later.";

pub fn success_notice(name: &str) -> String {
    format!(
        "Thank you, {name}! Your message has been sent successfully. I'll get back to you soon."
    )
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("message service unavailable: {0}")]
    Unavailable(String),
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Field values captured when a valid form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Delivers a submitted message.
pub trait Submitter {
    /// Time between submit and delivery.
    fn latency(&self) -> Duration;

    fn deliver(&mut self, message: &ContactMessage) -> Result<(), SubmitError>;
}

/// Waits, then reports success without sending anything.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
    delivered: usize,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            delivered: 0,
        }
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl Submitter for SimulatedSubmitter {
    fn latency(&self) -> Duration {
        self.latency
    }

    fn deliver(&mut self, message: &ContactMessage) -> Result<(), SubmitError> {
        self.delivered += 1;
        tracing::info!(subject = %message.subject, "contact message accepted (simulated)");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting(ContactMessage),
}

/// Work the caller must schedule on the form's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEffect {
    /// Call [`ContactForm::on_settled`] after `after`.
    Settle { after: Duration },
    /// Call [`ContactForm::on_notice_expired`] with `generation` after `after`.
    ExpireNotice { generation: u64, after: Duration },
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    form: ElementId,
    fields: Vec<(Field, ElementId)>,
    submit_button: Option<ElementId>,
    char_count: Option<ElementId>,
    status: Option<ElementId>,
    limits: Limits,
    notice_duration: Duration,
    phase: FormPhase,
    notice_generation: u64,
}

impl ContactForm {
    /// Bind to `#contactForm`. Missing fields are skipped and count as valid;
    /// a missing `#formStatus` silences notices.
    pub fn attach(doc: &Document, limits: Limits, notice_duration: Duration) -> Option<Self> {
        let form = find_id(doc, "contactForm", "contact form")?;
        let fields = Field::ALL
            .into_iter()
            .filter_map(|f| doc.by_id(f.element_id()).map(|el| (f, el)))
            .collect();
        let submit_button = doc
            .descendants(form)
            .into_iter()
            .find(|el| doc.get(*el).tag() == "button" && doc.attr(*el, "type") == Some("submit"));
        Some(Self {
            form,
            fields,
            submit_button,
            char_count: doc.by_id("charCount"),
            status: find_id(doc, "formStatus", "form status"),
            limits,
            notice_duration,
            phase: FormPhase::Idle,
            notice_generation: 0,
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting(_))
    }

    fn field_at(&self, target: ElementId) -> Option<Field> {
        self.fields
            .iter()
            .find(|(_, el)| *el == target)
            .map(|(f, _)| *f)
    }

    fn value(&self, doc: &Document, field: Field) -> String {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, el)| doc.value(*el).to_string())
            .unwrap_or_default()
    }

    /// Validate one field and paint its state. Returns whether it passed.
    fn check_field(&self, doc: &mut Document, field: Field, input: ElementId) -> bool {
        let outcome = field.validate(doc.value(input), &self.limits);
        let error_el = doc
            .parent(input)
            .and_then(|p| doc.within_by_class(p, "error-message").into_iter().next());
        let valid = outcome.is_ok();
        doc.set_class(input, "success", valid);
        doc.set_class(input, "error", !valid);
        if let Some(error_el) = error_el {
            let text = outcome.err().map(|e| e.to_string()).unwrap_or_default();
            doc.set_text(error_el, text);
        }
        valid
    }

    pub fn on_blur(&self, doc: &mut Document, target: ElementId) {
        if let Some(field) = self.field_at(target) {
            self.check_field(doc, field, target);
        }
    }

    /// Validate everything (no short circuit) and start a submission when
    /// the form is valid. Ignored while a submission is pending.
    pub fn on_submit(&mut self, doc: &mut Document, latency: Duration) -> Option<FormEffect> {
        if self.is_submitting() {
            tracing::debug!("submit ignored, submission pending");
            return None;
        }

        let mut all_valid = true;
        for (field, input) in self.fields.clone() {
            all_valid &= self.check_field(doc, field, input);
        }
        if !all_valid {
            return self.show_notice(doc, Notice::error(INVALID_NOTICE));
        }

        let message = ContactMessage {
            name: self.value(doc, Field::Name),
            email: self.value(doc, Field::Email),
            subject: self.value(doc, Field::Subject),
            message: self.value(doc, Field::Message),
        };
        if let Some(button) = self.submit_button {
            doc.add_class(button, "loading");
            doc.set_disabled(button, true);
        }
        tracing::debug!(?latency, "submitting contact form");
        self.phase = FormPhase::Submitting(message);
        Some(FormEffect::Settle { after: latency })
    }

    /// Deliver the pending message and report the outcome.
    pub fn on_settled(
        &mut self,
        doc: &mut Document,
        submitter: &mut dyn Submitter,
    ) -> Option<FormEffect> {
        let FormPhase::Submitting(message) = std::mem::take(&mut self.phase) else {
            return None;
        };

        let notice = match submitter.deliver(&message) {
            Ok(()) => {
                tracing::info!("contact form sent");
                self.reset(doc);
                Notice::success(success_notice(&message.name))
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact form submission failed");
                Notice::error(FAILURE_NOTICE)
            }
        };

        if let Some(button) = self.submit_button {
            doc.remove_class(button, "loading");
            doc.set_disabled(button, false);
        }
        self.show_notice(doc, notice)
    }

    fn reset(&self, doc: &mut Document) {
        for (_, input) in &self.fields {
            doc.set_value(*input, "");
            doc.remove_class(*input, "success");
            doc.remove_class(*input, "error");
        }
        if let Some(count) = self.char_count {
            doc.set_text(count, "0");
        }
    }

    /// Display `notice` in `#formStatus`. The returned effect clears it
    /// unless a newer notice has replaced it by then.
    pub fn show_notice(&mut self, doc: &mut Document, notice: Notice) -> Option<FormEffect> {
        let status = self.status?;
        self.notice_generation += 1;
        doc.set_text(status, notice.message);
        doc.set_class_name(status, &format!("form-status {}", notice.kind.as_str()));
        doc.set_display(status, Display::Unset);
        Some(FormEffect::ExpireNotice {
            generation: self.notice_generation,
            after: self.notice_duration,
        })
    }

    pub fn on_notice_expired(&self, doc: &mut Document, generation: u64) {
        let Some(status) = self.status else {
            return;
        };
        if generation != self.notice_generation {
            return;
        }
        doc.set_display(status, Display::None);
        doc.set_class_name(status, "form-status");
    }
}

/// Live length readout for the message field.
#[derive(Debug, Clone)]
pub struct CharCounter {
    input: ElementId,
    display: ElementId,
    max: usize,
}

impl CharCounter {
    pub fn attach(doc: &Document, max: usize) -> Option<Self> {
        let input = doc.by_id(Field::Message.element_id())?;
        let display = find_id(doc, "charCount", "character counter")?;
        Some(Self {
            input,
            display,
            max,
        })
    }

    pub fn on_input(&self, doc: &mut Document, target: ElementId) {
        if target != self.input {
            return;
        }
        let count = doc.value(self.input).chars().count();
        doc.set_text(self.display, count.to_string());
        let color = if count > self.max {
            "var(--error)"
        } else {
            "var(--text-dim)"
        };
        doc.set_color(self.display, color);
    }
}
