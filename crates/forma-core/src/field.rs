//! FormField -- the central domain type of the form builder.

use serde::{Deserialize, Serialize};

use crate::enums::FieldType;
use crate::rule::ValidationRule;
use crate::value::Value;

/// Helper for `skip_serializing_if` on `bool` fields.
fn is_false(b: &bool) -> bool {
    !b
}

/// Helper for `skip_serializing_if` on `Vec` fields.
fn is_empty_vec<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

/// Helper for `skip_serializing_if` on default values.
fn is_empty_value(v: &Value) -> bool {
    v.is_empty()
}

/// One field of a form definition.
///
/// Serialized with the original camelCase wire keys so stored schemas stay
/// readable next to the format they came from. Components that only apply
/// to some field kinds (options, derivation data) are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique within a schema's field list.
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub label: String,

    /// Display marker only; the actual check is a `required` rule.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "is_empty_value")]
    pub default_value: Value,

    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub validation_rules: Vec<ValidationRule>,

    /// Present for select/radio/checkbox fields.
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub options: Vec<String>,

    /// A derived field's value is computed, never entered.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_derived: bool,

    /// IDs of the fields a derived field reads from.
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub parent_fields: Vec<String>,

    /// Free-text description of the derivation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub derived_formula: String,
}

impl FormField {
    /// Starts building a field of the given type.
    pub fn builder(field_type: FieldType, label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(field_type, label)
    }
}

/// Builder for [`FormField`] with sensible defaults.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: FormField,
}

impl FieldBuilder {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field: FormField {
                id: String::new(),
                field_type,
                label: label.into(),
                required: false,
                default_value: Value::default(),
                validation_rules: Vec::new(),
                options: Vec::new(),
                is_derived: false,
                parent_fields: Vec::new(),
                derived_formula: String::new(),
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.field.id = id.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.field.default_value = value.into();
        self
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.field.validation_rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.field.validation_rules.extend(rules);
        self
    }

    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.field.options.push(option.into());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = String>) -> Self {
        self.field.options.extend(options);
        self
    }

    /// Marks the field as derived from the given parents and formula text.
    pub fn derived(
        mut self,
        parents: impl IntoIterator<Item = String>,
        formula: impl Into<String>,
    ) -> Self {
        self.field.is_derived = true;
        self.field.parent_fields = parents.into_iter().collect();
        self.field.derived_formula = formula.into();
        self
    }

    pub fn build(self) -> FormField {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RuleKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_defaults() {
        let field = FormField::builder(FieldType::Text, "Name").id("fld-1").build();
        assert_eq!(field.id, "fld-1");
        assert_eq!(field.field_type, FieldType::Text);
        assert!(!field.required);
        assert!(!field.is_derived);
        assert!(field.validation_rules.is_empty());
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let field = FormField::builder(FieldType::Select, "Country")
            .id("fld-2")
            .required(true)
            .option("DE")
            .option("FR")
            .build();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "fld-2",
                "type": "select",
                "label": "Country",
                "required": true,
                "options": ["DE", "FR"],
            })
        );
    }

    #[test]
    fn derived_field_carries_parents_and_formula() {
        let field = FormField::builder(FieldType::Number, "Age")
            .id("fld-3")
            .derived(vec!["fld-dob".to_string()], "age from date of birth")
            .build();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["isDerived"], serde_json::json!(true));
        assert_eq!(json["parentFields"], serde_json::json!(["fld-dob"]));
        assert_eq!(json["derivedFormula"], serde_json::json!("age from date of birth"));
    }

    #[test]
    fn roundtrip_with_rules() {
        let field = FormField::builder(FieldType::Text, "Email")
            .id("fld-4")
            .rule(ValidationRule::new(RuleKind::Required, "required"))
            .rule(ValidationRule::new(RuleKind::Email, "invalid email"))
            .build();
        let json = serde_json::to_string(&field).unwrap();
        let back: FormField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn original_payload_deserializes() {
        // Shape produced by the original builder, verbatim.
        let json = r#"{
            "id": "1700000000000",
            "type": "checkbox",
            "label": "Toppings",
            "required": false,
            "defaultValue": "",
            "validationRules": [{"type": "required", "message": "pick one"}],
            "options": ["cheese", "ham"]
        }"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Checkbox);
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.validation_rules[0].kind, RuleKind::Required);
    }
}
