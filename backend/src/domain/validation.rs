//! Field-level validation helpers shared by the domain forms.
//!
//! Forms collect every failing field before returning, so clients can show
//! all messages at once. The collected failures become an
//! [`Error::invalid_request`] whose details list one entry per field:
//!
//! ```json
//! { "code": "validation_failed",
//!   "fields": [{ "field": "email", "code": "taken", "message": "..." }] }
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::Error;

/// Maximum length accepted for ordinary text columns.
pub const MAX_TEXT_LEN: usize = 255;
/// Maximum length accepted for long free-text columns.
pub const MAX_LONG_TEXT_LEN: usize = 1000;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as sent by clients.
    pub field: &'static str,
    /// Stable machine-readable reason.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Accumulator for field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    /// Whether any failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` has a recorded failure.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Recorded failures in insertion order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Require a non-blank value no longer than `max` characters.
    pub fn required(&mut self, field: &'static str, value: Option<&str>, max: usize) -> String {
        match value.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => {
                self.check_length(field, trimmed, max);
                trimmed.to_owned()
            }
            _ => {
                self.push(field, "required", format!("{field} is required"));
                String::new()
            }
        }
    }

    /// Accept an optional value; blank input becomes `None`.
    pub fn optional(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
    ) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
        self.check_length(field, trimmed, max);
        Some(trimmed.to_owned())
    }

    /// Parse a required `YYYY-MM-DD` date.
    pub fn required_date(&mut self, field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => self.parse_date(field, raw),
            None => {
                self.push(field, "required", format!("{field} is required"));
                None
            }
        }
    }

    /// Parse an optional `YYYY-MM-DD` date.
    pub fn optional_date(&mut self, field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
        let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
        self.parse_date(field, raw)
    }

    fn parse_date(&mut self, field: &'static str, raw: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.push(
                    field,
                    "invalid_date",
                    format!("{field} must be a date formatted as YYYY-MM-DD"),
                );
                None
            }
        }
    }

    fn check_length(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(
                field,
                "too_long",
                format!("{field} must be at most {max} characters"),
            );
        }
    }

    /// Finish validation, yielding `value` when no failures were recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let message = errors
            .0
            .first()
            .map_or_else(|| "validation failed".to_owned(), |first| first.message.clone());
        Self::invalid_request(message).with_details(json!({
            "code": "validation_failed",
            "fields": errors.0,
        }))
    }
}
