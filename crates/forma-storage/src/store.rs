//! FormStore -- owner of the working form and the saved-schema collection.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use forma_core::field::FormField;
use forma_core::idgen;
use forma_core::rule::ValidationRule;
use forma_core::schema::FormSchema;
use forma_core::value::Value;

use crate::error::Result;
use crate::slot::SlotStore;

/// Slot key for the saved-schema collection.
pub const FORMS_SLOT: &str = "forms";

/// Slot key for the persisted working draft.
pub const DRAFT_SLOT: &str = "draft";

/// Typed partial-update struct for fields.
///
/// Only `Some` members are applied; `None` members are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct FieldUpdates {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<Value>,
    pub validation_rules: Option<Vec<ValidationRule>>,
    pub options: Option<Vec<String>>,
    pub is_derived: Option<bool>,
    pub parent_fields: Option<Vec<String>>,
    pub derived_formula: Option<String>,
}

/// Persisted shape of the working draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Draft {
    name: String,
    fields: Vec<FormField>,
}

/// The schema store: working field list, working name, and saved schemas,
/// persisted through an injected [`SlotStore`].
///
/// Operations that reference a missing id are silent no-ops; callers that
/// want to report a miss can inspect the returned flags.
pub struct FormStore<S: SlotStore> {
    backend: S,
    fields: Vec<FormField>,
    name: String,
    saved: Vec<FormSchema>,
    id_length: usize,
}

impl<S: SlotStore> FormStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_id_length(backend, idgen::DEFAULT_LENGTH)
    }

    pub fn with_id_length(backend: S, id_length: usize) -> Self {
        Self {
            backend,
            fields: Vec::new(),
            name: String::new(),
            saved: Vec::new(),
            id_length,
        }
    }

    // -- Accessors -----------------------------------------------------------

    /// The working field list, in display/evaluation order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// The working form's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The saved-schema collection.
    pub fn saved_forms(&self) -> &[FormSchema] {
        &self.saved
    }

    /// Looks up a saved schema by id.
    pub fn saved_form(&self, id: &str) -> Option<&FormSchema> {
        self.saved.iter().find(|s| s.id == id)
    }

    /// Generates a field id unique within the working list.
    pub fn next_field_id(&self, label: &str) -> String {
        idgen::unique_id(idgen::FIELD_PREFIX, label, self.id_length, |candidate| {
            self.fields.iter().any(|f| f.id == candidate)
        })
    }

    // -- Working-form mutations ----------------------------------------------

    /// Appends a field to the working list.
    pub fn add_field(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// Merges the given attributes into the field with matching id.
    ///
    /// Returns `false` (no-op) if the id is not present.
    pub fn update_field(&mut self, id: &str, updates: FieldUpdates) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        if let Some(label) = updates.label {
            field.label = label;
        }
        if let Some(required) = updates.required {
            field.required = required;
        }
        if let Some(default_value) = updates.default_value {
            field.default_value = default_value;
        }
        if let Some(rules) = updates.validation_rules {
            field.validation_rules = rules;
        }
        if let Some(options) = updates.options {
            field.options = options;
        }
        if let Some(is_derived) = updates.is_derived {
            field.is_derived = is_derived;
        }
        if let Some(parents) = updates.parent_fields {
            field.parent_fields = parents;
        }
        if let Some(formula) = updates.derived_formula {
            field.derived_formula = formula;
        }
        true
    }

    /// Removes the field with matching id; no-op if absent.
    ///
    /// The deleted id is scrubbed from every remaining field's parent list
    /// so derived fields never hold dangling references.
    pub fn delete_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return false;
        }
        for field in &mut self.fields {
            field.parent_fields.retain(|p| p != id);
        }
        true
    }

    /// Moves the field at `from` to position `to` (splice semantics).
    ///
    /// No-op unless both indices are valid positions in the current list.
    pub fn reorder_field(&mut self, from: usize, to: usize) -> bool {
        if from >= self.fields.len() || to >= self.fields.len() {
            return false;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        true
    }

    /// Sets the working form's name.
    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Resets the working field list and name, leaving saved schemas alone.
    pub fn clear_current_form(&mut self) {
        self.fields.clear();
        self.name.clear();
    }

    // -- Saved-schema operations ---------------------------------------------

    /// Snapshots the working list into a new saved schema and persists the
    /// whole collection.
    ///
    /// No-op (returns `Ok(None)`, nothing written) when the working list is
    /// empty or the name is blank.
    pub fn save_form(&mut self, name: &str) -> Result<Option<FormSchema>> {
        if self.fields.is_empty() || name.trim().is_empty() {
            return Ok(None);
        }
        let id = idgen::unique_id(idgen::SCHEMA_PREFIX, name, self.id_length, |candidate| {
            self.saved.iter().any(|s| s.id == candidate)
        });
        let schema = FormSchema::snapshot(id, name, &self.fields, Utc::now());
        self.saved.push(schema.clone());
        self.persist_saved()?;
        Ok(Some(schema))
    }

    /// Reads the saved-schema collection from durable storage.
    ///
    /// A missing slot leaves the in-memory collection as-is. A malformed
    /// payload recovers to an empty collection and logs the condition
    /// rather than failing the load.
    pub fn load_saved_forms(&mut self) -> Result<()> {
        let Some(payload) = self.backend.read(FORMS_SLOT)? else {
            return Ok(());
        };
        match serde_json::from_str::<Vec<FormSchema>>(&payload) {
            Ok(saved) => self.saved = saved,
            Err(e) => {
                tracing::warn!(error = %e, "stored forms are malformed; starting empty");
                self.saved = Vec::new();
            }
        }
        Ok(())
    }

    /// Replaces the working fields and name with a copy of the matching
    /// saved schema. Returns `false` (no-op) if the id is not found.
    pub fn load_form(&mut self, id: &str) -> bool {
        let Some(schema) = self.saved.iter().find(|s| s.id == id) else {
            return false;
        };
        self.fields = schema.fields.clone();
        self.name = schema.name.clone();
        true
    }

    /// Deletes a saved schema and persists the shrunken collection.
    ///
    /// Returns `false` (no-op, nothing written) if the id is not found.
    pub fn delete_saved_form(&mut self, id: &str) -> Result<bool> {
        let before = self.saved.len();
        self.saved.retain(|s| s.id != id);
        if self.saved.len() == before {
            return Ok(false);
        }
        self.persist_saved()?;
        Ok(true)
    }

    fn persist_saved(&self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.saved)?;
        self.backend.write(FORMS_SLOT, &payload)
    }

    // -- Draft persistence ---------------------------------------------------

    /// Persists the working copy so a later invocation can resume editing.
    pub fn save_draft(&self) -> Result<()> {
        let draft = Draft {
            name: self.name.clone(),
            fields: self.fields.clone(),
        };
        let payload = serde_json::to_string_pretty(&draft)?;
        self.backend.write(DRAFT_SLOT, &payload)
    }

    /// Restores the working copy from the draft slot, if present.
    ///
    /// Malformed drafts recover to an empty working copy, like
    /// [`load_saved_forms`](Self::load_saved_forms).
    pub fn load_draft(&mut self) -> Result<()> {
        let Some(payload) = self.backend.read(DRAFT_SLOT)? else {
            return Ok(());
        };
        match serde_json::from_str::<Draft>(&payload) {
            Ok(draft) => {
                self.fields = draft.fields;
                self.name = draft.name;
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored draft is malformed; starting empty");
                self.fields = Vec::new();
                self.name = String::new();
            }
        }
        Ok(())
    }
}
