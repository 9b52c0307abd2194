//! Top-level evaluation: derivation pass + validation pass, and the
//! submission check.

use chrono::NaiveDate;

use forma_core::field::FormField;
use forma_core::validation::validate_fields;
use forma_core::value::{ErrorMap, ValueMap};

use crate::derive::run_derivation_pass;

/// Result of one full evaluation: the value map with derived fields
/// recomputed, and the per-field validation errors.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub values: ValueMap,
    pub errors: ErrorMap,
}

/// Evaluates a form: recomputes derived values, then validates every
/// non-derived field against its rules.
///
/// Pure with respect to the inputs; re-invoked on every value or schema
/// change.
pub fn evaluate(fields: &[FormField], values: &ValueMap, today: NaiveDate) -> Evaluation {
    let mut new_values = values.clone();
    run_derivation_pass(fields, &mut new_values, today);
    let errors = validate_fields(fields, &new_values);
    Evaluation {
        values: new_values,
        errors,
    }
}

/// Builds the initial value map from non-derived fields' defaults.
///
/// Empty defaults are skipped; derived entries are engine-written only.
pub fn seed_defaults(fields: &[FormField]) -> ValueMap {
    let mut values = ValueMap::new();
    for field in fields {
        if !field.is_derived && !field.default_value.is_empty() {
            values.insert(field.id.clone(), field.default_value.clone());
        }
    }
    values
}

/// Re-runs the validation pass for submission.
///
/// An empty error map accepts the submission and hands the full value map
/// back to the caller for its success notification; otherwise the errors
/// are returned and nothing else happens.
pub fn check_submission(fields: &[FormField], values: &ValueMap) -> Result<ValueMap, ErrorMap> {
    let errors = validate_fields(fields, values);
    if errors.is_empty() {
        Ok(values.clone())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::enums::{FieldType, RuleKind};
    use forma_core::rule::ValidationRule;
    use forma_core::value::Value;
    use pretty_assertions::assert_eq;

    fn sample_fields() -> Vec<FormField> {
        vec![
            FormField::builder(FieldType::Text, "Name")
                .id("fld-name")
                .required(true)
                .rule(ValidationRule::new(RuleKind::Required, "name is required"))
                .build(),
            FormField::builder(FieldType::Date, "Date of Birth")
                .id("fld-dob")
                .build(),
            FormField::builder(FieldType::Number, "Age")
                .id("fld-age")
                .derived(vec!["fld-dob".to_string()], "age from dob")
                .build(),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn evaluate_combines_derivation_and_validation() {
        let fields = sample_fields();
        let mut values = ValueMap::new();
        values.insert("fld-dob".into(), Value::from("2000-01-01"));

        let result = evaluate(&fields, &values, today());
        assert_eq!(result.values.get("fld-age"), Some(&Value::from("24")));
        assert_eq!(
            result.errors.get("fld-name").map(String::as_str),
            Some("name is required")
        );
        // Input map untouched.
        assert!(!values.contains_key("fld-age"));
    }

    #[test]
    fn evaluate_with_valid_input_has_no_errors() {
        let fields = sample_fields();
        let mut values = ValueMap::new();
        values.insert("fld-name".into(), Value::from("Ada"));
        values.insert("fld-dob".into(), Value::from("2000-01-01"));

        let result = evaluate(&fields, &values, today());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn seed_defaults_skips_derived_and_empty() {
        let fields = vec![
            FormField::builder(FieldType::Text, "City")
                .id("fld-city")
                .default_value("Berlin")
                .build(),
            FormField::builder(FieldType::Text, "Blank")
                .id("fld-blank")
                .build(),
            FormField::builder(FieldType::Number, "Age")
                .id("fld-age")
                .default_value("99")
                .derived(vec!["fld-city".to_string()], "age")
                .build(),
        ];
        let values = seed_defaults(&fields);
        assert_eq!(values.get("fld-city"), Some(&Value::from("Berlin")));
        assert!(!values.contains_key("fld-blank"));
        assert!(!values.contains_key("fld-age"));
    }

    #[test]
    fn submission_accepted_when_no_errors() {
        let fields = sample_fields();
        let mut values = ValueMap::new();
        values.insert("fld-name".into(), Value::from("Ada"));

        let submitted = check_submission(&fields, &values).unwrap();
        assert_eq!(submitted, values);
    }

    #[test]
    fn submission_rejected_with_error_map() {
        let fields = sample_fields();
        let values = ValueMap::new();

        let errors = check_submission(&fields, &values).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("fld-name"));
    }
}
