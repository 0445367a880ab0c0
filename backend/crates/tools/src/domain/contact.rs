//! Contact forms
//!
//! Three shapes share the same personal fields. Validation collects every
//! failed rule instead of stopping at the first one.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[А-ЯЁ][а-яё]+$").expect("Invalid name regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("Invalid phone regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
});

/// Accepted values for `reason` / `reasons`
pub const ALLOWED_REASONS: [&str; 3] = [
    "нет доступа к сети",
    "не работает телефон",
    "не приходят письма",
];

/// Client-supplied timestamp, with or without a UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectedAt {
    WithOffset(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub last_name: String,
    pub first_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedContact {
    #[serde(flatten)]
    pub contact: Contact,
    pub reason: String,
    pub detected_at: DetectedAt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleReasonContact {
    #[serde(flatten)]
    pub contact: Contact,
    pub reasons: Vec<String>,
    pub detected_at: DetectedAt,
}

/// A form that can be checked and stored
pub trait ContactForm: Serialize + Send + Sync {
    /// File name prefix, e.g. `contact_extended`
    const KIND: &'static str;

    /// Every rule this form breaks. Empty when valid.
    fn problems(&self) -> Vec<String>;

    fn validate(&self) -> ToolResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ToolError::InvalidContact(problems))
        }
    }
}

impl ContactForm for Contact {
    const KIND: &'static str = "contact";

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (field, value) in [("last_name", &self.last_name), ("first_name", &self.first_name)] {
            if !value.chars().next().is_some_and(char::is_uppercase) {
                problems.push(format!("{field} must start with a capital letter"));
            } else if !NAME_RE.is_match(value) {
                problems.push(format!("{field} must contain Cyrillic letters only"));
            }
        }
        if !PHONE_RE.is_match(&self.phone) {
            problems.push("phone must have 10 to 15 digits with an optional leading '+'".into());
        }
        if !EMAIL_RE.is_match(&self.email) {
            problems.push("email is not a valid address".into());
        }
        problems
    }
}

impl ContactForm for ExtendedContact {
    const KIND: &'static str = "contact_extended";

    fn problems(&self) -> Vec<String> {
        let mut problems = self.contact.problems();
        if !ALLOWED_REASONS.contains(&self.reason.as_str()) {
            problems.push(format!(
                "reason must be one of: {}",
                ALLOWED_REASONS.join(", ")
            ));
        }
        problems
    }
}

impl ContactForm for MultipleReasonContact {
    const KIND: &'static str = "contact_multiple";

    fn problems(&self) -> Vec<String> {
        let mut problems = self.contact.problems();
        if self
            .reasons
            .iter()
            .any(|r| !ALLOWED_REASONS.contains(&r.as_str()))
        {
            problems.push(format!(
                "each reason must be one of: {}",
                ALLOWED_REASONS.join(", ")
            ));
        }
        problems
    }
}
