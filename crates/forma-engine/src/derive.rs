//! Derivation pass: recompute derived-field values from their parents.
//!
//! Only one derivation is actually computed -- age from a date parent.
//! Every other formula text yields the placeholder value. Computation
//! failures are caught and written into the field's value as a sentinel
//! string, never raised as validation errors.

use chrono::{DateTime, Datelike, NaiveDate};

use forma_core::field::FormField;
use forma_core::value::{Value, ValueMap};

/// Stand-in value for formulas the engine does not interpret.
pub const PLACEHOLDER_VALUE: &str = "Calculated value";

/// Sentinel written when a derivation computation fails.
pub const ERROR_VALUE: &str = "Error in calculation";

/// Error type for derivation failures.
///
/// These never escape the pass; they are mapped to [`ERROR_VALUE`].
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("age computation out of range")]
    AgeOutOfRange,
}

/// Runs the derivation pass over `fields`, writing results into `values`.
///
/// Fields are processed independently in list order; a derived field
/// reading another derived field's output is unsupported (authoring
/// rejects such schemas).
pub fn run_derivation_pass(fields: &[FormField], values: &mut ValueMap, today: NaiveDate) {
    for field in fields.iter().filter(|f| f.is_derived) {
        match derive_value(field, values, today) {
            Ok(Some(value)) => {
                values.insert(field.id.clone(), Value::Text(value));
            }
            // Parent absent or unparsable: prior value stays as-is.
            Ok(None) => {}
            Err(_) => {
                values.insert(field.id.clone(), Value::Text(ERROR_VALUE.to_owned()));
            }
        }
    }
}

/// Computes one derived field's value.
///
/// `Ok(None)` means "leave the current value unchanged".
fn derive_value(
    field: &FormField,
    values: &ValueMap,
    today: NaiveDate,
) -> Result<Option<String>, DeriveError> {
    if !field.parent_fields.is_empty() && field.derived_formula.contains("age") {
        let parent_text = values
            .get(&field.parent_fields[0])
            .and_then(Value::as_text);
        let Some(text) = parent_text else {
            return Ok(None);
        };
        let Some(birth) = parse_date(text) else {
            return Ok(None);
        };
        // Calendar-year subtraction only, no day/month adjustment.
        let age = today
            .year()
            .checked_sub(birth.year())
            .ok_or(DeriveError::AgeOutOfRange)?;
        return Ok(Some(age.to_string()));
    }

    Ok(Some(PLACEHOLDER_VALUE.to_owned()))
}

/// Parses a parent value as a date.
///
/// Accepts the `YYYY-MM-DD` shape date inputs produce, with RFC 3339 as a
/// fallback.
fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}
