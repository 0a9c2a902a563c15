//! Pre-flight blueprint validation.
//!
//! A generation job refuses to start while any issue remains; the editing
//! surface uses the same checks to mark offending fields.

use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    EmptyBlueprint,
    EmptyKey,
    EmptyValue,
    DuplicateKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintIssue {
    pub kind: IssueKind,
    /// Index of the offending field; absent for blueprint-level issues.
    pub index: Option<usize>,
    pub key: Option<String>,
}

impl BlueprintIssue {
    fn field(kind: IssueKind, index: usize, key: &str) -> Self {
        Self {
            kind,
            index: Some(index),
            key: Some(key.to_string()),
        }
    }
}

impl fmt::Display for BlueprintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::EmptyBlueprint => "blueprint has no fields",
            IssueKind::EmptyKey => "field key is empty",
            IssueKind::EmptyValue => "field value is not set",
            IssueKind::DuplicateKey => "field key duplicates another field",
        };
        match (self.index, self.key.as_deref()) {
            (Some(i), Some(k)) => write!(f, "field {i} ('{k}'): {what}"),
            (Some(i), None) => write!(f, "field {i}: {what}"),
            _ => write!(f, "{what}"),
        }
    }
}

/// Collects every issue in `blueprint`. An empty result means the
/// blueprint can be handed to the engine.
pub fn validate_blueprint(blueprint: &Blueprint) -> Vec<BlueprintIssue> {
    if blueprint.is_empty() {
        return vec![BlueprintIssue {
            kind: IssueKind::EmptyBlueprint,
            index: None,
            key: None,
        }];
    }

    let duplicates = duplicate_flags(blueprint);
    let mut issues = Vec::new();
    for (index, field) in blueprint.fields.iter().enumerate() {
        if field.key.trim().is_empty() {
            issues.push(BlueprintIssue::field(IssueKind::EmptyKey, index, &field.key));
        }
        if field.value.is_empty() {
            issues.push(BlueprintIssue::field(IssueKind::EmptyValue, index, &field.key));
        }
        if duplicates[index] {
            issues.push(BlueprintIssue::field(
                IssueKind::DuplicateKey,
                index,
                &field.key,
            ));
        }
    }
    issues
}

pub fn blueprint_is_valid(blueprint: &Blueprint) -> bool {
    validate_blueprint(blueprint).is_empty()
}

/// One flag per field: true when its key also appears on another field.
/// Empty keys are not counted as duplicates of each other.
pub fn duplicate_flags(blueprint: &Blueprint) -> Vec<bool> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for field in &blueprint.fields {
        if !field.key.trim().is_empty() {
            *counts.entry(field.key.as_str()).or_default() += 1;
        }
    }
    blueprint
        .fields
        .iter()
        .map(|f| !f.key.trim().is_empty() && counts.get(f.key.as_str()).copied().unwrap_or(0) > 1)
        .collect()
}
