//! Contact form field validation.
//!
//! Pure functions from a raw field value to `Result<(), FieldError>`. The
//! error's `Display` is the exact message shown under the field.
//!
//! Rules, checked in order (first failure wins):
//!
//! | Field   | Rule                                   |
//! |---------|----------------------------------------|
//! | name    | non-blank; trimmed length ≥ `name_min` |
//! | email   | non-blank; `local@domain.tld` shape    |
//! | subject | a selection was made                   |
//! | message | non-blank; trimmed length ≥ `message_min`; raw length ≤ `message_max` |
//!
//! Lengths count Unicode scalar values, not bytes. "Whitespace" is the set a
//! browser's `\s` and `trim()` use (see [`is_space`]), which differs from
//! Rust's `char::is_whitespace` at U+0085 and U+FEFF.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// [`is_space`] as a regex class body.
const SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[^@{SPACE_CLASS}]+@[^@{SPACE_CLASS}]+\.[^@{SPACE_CLASS}]+$"
    ))
    .expect("valid email regex")
});

/// Length limits applied by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub name_min: usize,
    pub message_min: usize,
    pub message_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            name_min: 2,
            message_min: 10,
            message_max: 500,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least {0} characters")]
    NameTooShort(usize),
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Please select a subject")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least {0} characters")]
    MessageTooShort(usize),
    #[error("Message cannot exceed {0} characters")]
    MessageTooLong(usize),
}

/// The four contact form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Element id of the field's input in the contact form.
    pub fn element_id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn validate(&self, value: &str, limits: &Limits) -> Result<(), FieldError> {
        match self {
            Field::Name => validate_name(value, limits),
            Field::Email => validate_email(value),
            Field::Subject => validate_subject(value),
            Field::Message => validate_message(value, limits),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.element_id() == s)
            .ok_or_else(|| format!("unknown contact field '{s}'"))
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Whitespace and line terminators as matched by `\s` in form patterns.
pub fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Strip [`is_space`] characters from both ends.
pub fn trim_space(value: &str) -> &str {
    value.trim_matches(is_space)
}

pub fn validate_name(value: &str, limits: &Limits) -> Result<(), FieldError> {
    let trimmed = trim_space(value);
    if trimmed.is_empty() {
        return Err(FieldError::NameRequired);
    }
    if char_len(trimmed) < limits.name_min {
        return Err(FieldError::NameTooShort(limits.name_min));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if trim_space(value).is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !is_email_shaped(value) {
        return Err(FieldError::EmailInvalid);
    }
    Ok(())
}

pub fn validate_subject(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::SubjectRequired);
    }
    Ok(())
}

pub fn validate_message(value: &str, limits: &Limits) -> Result<(), FieldError> {
    let trimmed = trim_space(value);
    if trimmed.is_empty() {
        return Err(FieldError::MessageRequired);
    }
    if char_len(trimmed) < limits.message_min {
        return Err(FieldError::MessageTooShort(limits.message_min));
    }
    if char_len(value) > limits.message_max {
        return Err(FieldError::MessageTooLong(limits.message_max));
    }
    Ok(())
}

/// Matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`, with `\s` as in [`is_space`].
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Per-field outcome for a whole form, in form order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub field: Field,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationReport {
    /// Validate every field; no short circuit.
    pub fn check(values: [(Field, &str); 4], limits: &Limits) -> Self {
        let fields = values
            .into_iter()
            .map(|(field, value)| {
                let outcome = field.validate(value, limits);
                FieldReport {
                    field,
                    valid: outcome.is_ok(),
                    message: outcome.err().map(|e| e.to_string()),
                }
            })
            .collect();
        Self { fields }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.valid)
    }
}
