//! Value and error maps exchanged between the store, the engine and the UI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single entered (or derived) field value.
///
/// Checkbox fields hold a list of selected options; every other type holds
/// a plain string. Untagged so the wire format matches the original
/// `string | string[]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Many(Vec<String>),
}

impl Value {
    /// Returns the string content, or `None` for multi-values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Returns `true` for an empty string or an empty selection list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Many(v) => v.is_empty(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

/// Live entered data for one form instance, keyed by field ID.
pub type ValueMap = HashMap<String, Value>;

/// Per-field validation messages, keyed by field ID. Absence means no error.
pub type ErrorMap = HashMap<String, String>;
