//! Ordered blueprint container.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spec::ValueSpec;

/// One named slot in a blueprint.
///
/// The id is stable across edits so the editing surface can address a
/// field while its key is being renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlueprintField {
    pub id: Uuid,
    pub key: String,
    pub value: ValueSpec,
}

impl BlueprintField {
    pub fn new(key: impl Into<String>, value: ValueSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            value,
        }
    }
}

/// An ordered list of key/value-spec fields.
///
/// Field order is meaningful: generated objects carry their keys in
/// blueprint order, and the engine reports per-column progress by index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Blueprint {
    pub fields: Vec<BlueprintField>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends a fresh field and returns its id.
    pub fn push(&mut self, key: impl Into<String>, value: ValueSpec) -> Uuid {
        let field = BlueprintField::new(key, value);
        let id = field.id;
        self.fields.push(field);
        id
    }

    /// Replaces the key and value of the field with `id`, keeping its
    /// position. Returns false when no field carries that id.
    pub fn replace(&mut self, id: Uuid, key: impl Into<String>, value: ValueSpec) -> bool {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => {
                field.key = key.into();
                field.value = value;
                true
            }
            None => false,
        }
    }

    /// Removes the field with `id`. Returns false when absent.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        self.fields.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&BlueprintField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }
}
