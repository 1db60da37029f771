use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// A single rejected field on an incoming payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field error found while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", render_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Closes a validation pass: `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn require_non_blank(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be blank");
        }
    }

    pub fn optional_non_blank(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.require_non_blank(field, value);
        }
    }

    pub fn optional_email(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(email) = value {
            if email.len() > 254 || !EMAIL_PATTERN.is_match(email) {
                self.add(field, format!("'{}' is not a valid email address", email));
            }
        }
    }

    pub fn optional_range(&mut self, field: &'static str, value: Option<u32>, min: u32, max: u32) {
        if let Some(value) = value {
            if value < min || value > max {
                self.add(field, format!("must be between {} and {}, got {}", min, max, value));
            }
        }
    }
}

fn render_errors(errors: &[FieldError]) -> String {
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let mut rendered = format!("{} validation {}", errors.len(), noun);
    for error in errors {
        rendered.push_str(&format!("; {}: {}", error.field, error.message));
    }
    rendered
}

/// Field-level checks run on a payload after it has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
