//! Option resolution for list columns.
//!
//! Hosts describe options either as bare scalars (`"Open"`, `3`) or as
//! `{value, label}` pairs. Both normalize to a [`ResolvedOption`] with a
//! canonical string key, so `3` and `"3"` refer to the same option.

use gridkit_types::value::{to_key, to_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// An option as declared by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionDescriptor {
    Labeled {
        value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Scalar(Value),
}

impl OptionDescriptor {
    pub fn labeled(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::Labeled {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    fn value(&self) -> &Value {
        match self {
            Self::Labeled { value, .. } | Self::Scalar(value) => value,
        }
    }
}

impl From<&str> for OptionDescriptor {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::String(value.to_string()))
    }
}

/// Canonical form of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOption {
    /// Canonical key used for membership tests.
    pub key: String,
    /// Display label; defaults to the key.
    pub label: String,
    /// The original value, written into rows when the option is picked.
    pub value: Value,
}

/// Normalizes option descriptors.
///
/// Descriptors without a scalar value are dropped, as are repeats of an
/// already-seen key (first occurrence wins). An empty input yields an empty
/// list.
pub fn resolve_options(descriptors: &[OptionDescriptor]) -> Vec<ResolvedOption> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let value = descriptor.value();
        let Some(key) = to_key(value) else {
            debug!("Dropping option without a scalar value: {}", value);
            continue;
        };
        if !seen.insert(key.clone()) {
            debug!("Dropping duplicate option key {:?}", key);
            continue;
        }
        let label = match descriptor {
            OptionDescriptor::Labeled { label: Some(label), .. } => label.clone(),
            _ => to_text(value).map(|t| t.into_owned()).unwrap_or_else(|| key.clone()),
        };
        resolved.push(ResolvedOption {
            key,
            label,
            value: value.clone(),
        });
    }

    resolved
}

/// Looks up the label of the option matching `value`.
pub fn option_label<'a>(options: &'a [ResolvedOption], value: &Value) -> Option<&'a str> {
    let key = to_key(value)?;
    options
        .iter()
        .find(|option| option.key == key)
        .map(|option| option.label.as_str())
}
