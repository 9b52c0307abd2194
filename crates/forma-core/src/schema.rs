//! FormSchema -- a named, timestamped snapshot of a field list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::FormField;

/// A saved form definition.
///
/// Immutable once created; the store only appends, deletes or loads whole
/// schemas. `created_at` keeps the original `createdAt` wire key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
}

impl FormSchema {
    /// Snapshots a field list under a new name.
    pub fn snapshot(
        id: impl Into<String>,
        name: impl Into<String>,
        fields: &[FormField],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: fields.to_vec(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::FieldType;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_is_a_deep_copy() {
        let fields = vec![
            FormField::builder(FieldType::Text, "A").id("fld-a").build(),
        ];
        let schema = FormSchema::snapshot("frm-1", "Contact", &fields, Utc::now());
        assert_eq!(schema.fields, fields);
        // Independent storage: mutating the source list leaves the snapshot alone.
        let mut source = fields;
        source.clear();
        assert_eq!(schema.fields.len(), 1);
    }

    #[test]
    fn wire_keys() {
        let schema = FormSchema::snapshot(
            "frm-1",
            "Contact",
            &[],
            "2024-06-01T12:00:00Z".parse().unwrap(),
        );
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["createdAt"], serde_json::json!("2024-06-01T12:00:00Z"));
        assert_eq!(json["name"], serde_json::json!("Contact"));
    }
}
