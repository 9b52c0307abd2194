//! Validation rule definition.

use serde::{Deserialize, Serialize};

use crate::enums::RuleKind;

/// A single validation rule attached to a field.
///
/// Rules are evaluated in declaration order; the first failing rule's
/// `message` is the one reported for the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// What the rule checks.
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Length parameter, only meaningful for minLength/maxLength.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,

    /// Message shown when the rule fails.
    pub message: String,
}

impl ValidationRule {
    /// Creates a rule without a length parameter.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            value: None,
            message: message.into(),
        }
    }

    /// Creates a minLength/maxLength rule with its length parameter.
    pub fn with_value(kind: RuleKind, value: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value),
            message: message.into(),
        }
    }
}
