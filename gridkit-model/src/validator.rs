//! Per-column validation functions.

use crate::i18n::Translate;
use gridkit_types::value::{is_blank, to_number, to_text};
use gridkit_types::Row;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of a single validator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed; the validator's static message is reported.
    Fail,
    /// Failed with a message that overrides the static one.
    /// An empty message falls back to the static message.
    FailWith(String),
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl From<Result<(), String>> for Verdict {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::FailWith(message),
        }
    }
}

type ValidateFn = dyn Fn(&Value, &Row) -> Verdict + Send + Sync;

/// A validation function paired with its default failure message.
///
/// Validators receive the candidate cell value and the whole draft row, so
/// cross-field rules ("end after start") can be expressed on one column.
#[derive(Clone)]
pub struct Validator {
    validate: Arc<ValidateFn>,
    message: String,
}

impl Validator {
    /// Creates a validator from a closure returning anything convertible to
    /// a [`Verdict`] (`bool`, `Result<(), String>` or a `Verdict`).
    pub fn new<F, V>(message: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Row) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self {
            validate: Arc::new(move |value: &Value, row: &Row| f(value, row).into()),
            message: message.into(),
        }
    }

    /// Fails on null, empty strings and empty arrays.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(message, |value, _| !is_blank(value))
    }

    /// Fails when the value is not a number of at least `min`.
    /// Blank values pass; pair with [`Validator::required`] if needed.
    pub fn min(min: f64, message: impl Into<String>) -> Self {
        Self::new(message, move |value, _| {
            is_blank(value) || to_number(value).is_some_and(|n| n >= min)
        })
    }

    /// Fails when the value is not a number of at most `max`.
    /// Blank values pass.
    pub fn max(max: f64, message: impl Into<String>) -> Self {
        Self::new(message, move |value, _| {
            is_blank(value) || to_number(value).is_some_and(|n| n <= max)
        })
    }

    /// Fails when the text form of the value exceeds `max` characters.
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::new(message, move |value, _| {
            to_text(value).is_none_or(|text| text.chars().count() <= max)
        })
    }

    /// [`Validator::required`] with the `validation.required` message.
    pub fn required_in(t: &dyn Translate) -> Self {
        Self::required(t.translate("validation.required", &[]))
    }

    /// [`Validator::min`] with the `validation.min` message.
    pub fn min_in(min: f64, t: &dyn Translate) -> Self {
        let bound = min.to_string();
        Self::min(min, t.translate("validation.min", &[("min", &bound)]))
    }

    /// [`Validator::max`] with the `validation.max` message.
    pub fn max_in(max: f64, t: &dyn Translate) -> Self {
        let bound = max.to_string();
        Self::max(max, t.translate("validation.max", &[("max", &bound)]))
    }

    /// [`Validator::max_length`] with the `validation.maxLength` message.
    pub fn max_length_in(max: usize, t: &dyn Translate) -> Self {
        let bound = max.to_string();
        Self::max_length(max, t.translate("validation.maxLength", &[("max", &bound)]))
    }

    /// The static failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the validator. Returns the failure message, or `None` on pass.
    pub fn check(&self, value: &Value, row: &Row) -> Option<String> {
        match (self.validate)(value, row) {
            Verdict::Pass => None,
            Verdict::FailWith(message) if !message.is_empty() => Some(message),
            Verdict::Fail | Verdict::FailWith(_) => Some(self.message.clone()),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
