//! Request validation primitives
//!
//! Request bodies are deserialized into permissive structs with optional
//! fields and then validated into the typed inputs the repositories accept.
//! Two failure shapes exist: a required field is missing (a plain message),
//! or one or more present fields are out of bounds (a list of field errors).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A single invalid field in a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// camelCase name of the field as it appears on the wire
    pub field: String,
    /// What is wrong with the value
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Why a request body was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalid {
    /// Required fields were absent; carries the message shown to the client
    Missing(String),
    /// Present fields failed validation
    Fields(Vec<FieldError>),
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(message) => write!(f, "{}", message),
            Self::Fields(errors) => {
                write!(f, "Validation failed")?;
                for error in errors {
                    write!(f, "; {}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Invalid {}

/// Collects field errors for one request body
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Start an empty validation pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// String must be non-blank and at most `max` characters
    pub fn text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, format!("{} must not be empty", field));
        } else if value.chars().count() > max {
            self.push(
                field,
                format!("{} must be at most {} characters", field, max),
            );
        }
    }

    /// Integer must lie within `min..=max`
    pub fn range(&mut self, field: &str, value: i32, min: i32, max: i32) {
        if value < min || value > max {
            self.push(
                field,
                format!("{} must be between {} and {}", field, min, max),
            );
        }
    }

    /// Decimal must be within `0..=max` with at most two decimal places
    pub fn money(&mut self, field: &str, value: Decimal, max: Decimal) {
        if value.is_sign_negative() && !value.is_zero() {
            self.push(field, format!("{} must not be negative", field));
        } else if value > max {
            self.push(field, format!("{} must be at most {}", field, max));
        } else if value.normalize().scale() > 2 {
            self.push(
                field,
                format!("{} must have at most 2 decimal places", field),
            );
        }
    }

    /// Finish the pass, failing if any error was recorded
    pub fn finish(self) -> Result<(), Invalid> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Invalid::Fields(self.errors))
        }
    }
}

/// Distinguish an absent field from an explicit `null`
///
/// Used with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: absent stays `None`, `null` becomes `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
