//! Field validation rules and authoring-time schema checks.

use std::sync::OnceLock;

use regex::Regex;

use crate::enums::{FieldType, RuleKind};
use crate::field::FormField;
use crate::rule::ValidationRule;
use crate::value::{ErrorMap, Value, ValueMap};

/// Minimum password length for the `password` rule.
const PASSWORD_MIN_LEN: usize = 8;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Error type for authoring-time validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    #[error("field label is required")]
    LabelRequired,

    #[error("field id {0} is already used in this form")]
    DuplicateId(String),

    #[error("{0} fields need at least one option")]
    OptionsRequired(FieldType),

    #[error("{0} rules need a length value")]
    RuleValueRequired(RuleKind),

    #[error("parent field not found: {0}")]
    UnknownParent(String),

    #[error("parent field {0} is itself derived; derived chains are not supported")]
    DerivedParent(String),
}

/// Validates a field about to be added to (or updated within) a form.
///
/// `existing` is the rest of the working field list. Derived chains are
/// rejected here rather than in the engine, which treats fields
/// independently.
pub fn validate_new_field(
    field: &FormField,
    existing: &[FormField],
) -> Result<(), AuthoringError> {
    if field.label.trim().is_empty() {
        return Err(AuthoringError::LabelRequired);
    }
    if existing.iter().any(|f| f.id == field.id) {
        return Err(AuthoringError::DuplicateId(field.id.clone()));
    }
    if field.field_type.is_choice() && field.options.is_empty() {
        return Err(AuthoringError::OptionsRequired(field.field_type));
    }
    for rule in &field.validation_rules {
        if rule.kind.takes_value() && rule.value.is_none() {
            return Err(AuthoringError::RuleValueRequired(rule.kind));
        }
    }
    if field.is_derived {
        for parent_id in &field.parent_fields {
            let Some(parent) = existing.iter().find(|f| &f.id == parent_id) else {
                return Err(AuthoringError::UnknownParent(parent_id.clone()));
            };
            if parent.is_derived {
                return Err(AuthoringError::DerivedParent(parent_id.clone()));
            }
        }
    }
    Ok(())
}

/// Returns `true` if the rule's failure predicate holds for the value.
///
/// A missing value is treated as an empty string, matching how the
/// submission path feeds unfilled inputs into the rules. String-shaped
/// rules never fire on multi-values.
pub fn rule_fails(rule: &ValidationRule, value: Option<&Value>) -> bool {
    // Multi-values only interact with `required`.
    let text: Option<&str> = match value {
        None => Some(""),
        Some(Value::Text(s)) => Some(s),
        Some(Value::Many(_)) => None,
    };

    match rule.kind {
        RuleKind::Required => value.is_none_or(|v| v.is_empty()),
        RuleKind::MinLength => match (text, rule.value) {
            (Some(s), Some(min)) => s.chars().count() < min as usize,
            _ => false,
        },
        RuleKind::MaxLength => match (text, rule.value) {
            (Some(s), Some(max)) => s.chars().count() > max as usize,
            _ => false,
        },
        RuleKind::Email => {
            text.is_some_and(|s| !s.is_empty() && !email_pattern().is_match(s))
        }
        RuleKind::Password => text.is_some_and(|s| {
            !s.is_empty()
                && (s.chars().count() < PASSWORD_MIN_LEN
                    || !s.chars().any(|c| c.is_ascii_digit()))
        }),
    }
}

/// Validates one field's value against its rules in declaration order.
///
/// Returns the first failing rule's message, or `None` if every rule passes.
pub fn validate_field<'a>(field: &'a FormField, value: Option<&Value>) -> Option<&'a str> {
    field
        .validation_rules
        .iter()
        .find(|rule| rule_fails(rule, value))
        .map(|rule| rule.message.as_str())
}

/// Runs the validation pass over every non-derived field.
///
/// Derived fields are exempt; a field with no rules never errors.
pub fn validate_fields(fields: &[FormField], values: &ValueMap) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in fields.iter().filter(|f| !f.is_derived) {
        if let Some(message) = validate_field(field, values.get(&field.id)) {
            errors.insert(field.id.clone(), message.to_owned());
        }
    }
    errors
}
