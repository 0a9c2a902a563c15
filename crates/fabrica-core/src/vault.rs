//! Read-only vault snapshot.
//!
//! The vault holds saved blueprints and saved custom functions by title.
//! Persistence and synchronization live outside this workspace; the
//! engine only ever sees an immutable snapshot.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mirror::BlueprintStr;
use crate::spec::CustomCode;

/// A blueprint saved to the vault, kept in string-mirrored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedBlueprint {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub times_requested: u64,
    pub blueprint: BlueprintStr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedFunction {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub times_requested: u64,
    pub code: CustomCode,
}

/// Current contract version for persisted vault payloads.
pub const VAULT_VERSION: &str = "1.0.1";

fn current_version() -> String {
    VAULT_VERSION.to_string()
}

/// Immutable collection of saved entries, looked up by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    /// Contract version the payload was written with.
    #[serde(default = "current_version")]
    pub version: String,
    pub blueprints: Vec<SavedBlueprint>,
    pub functions: Vec<SavedFunction>,
}

impl Default for Vault {
    fn default() -> Self {
        Self {
            version: current_version(),
            blueprints: Vec::new(),
            functions: Vec::new(),
        }
    }
}

impl Vault {
    pub fn resolve_blueprint(&self, title: &str) -> Option<&SavedBlueprint> {
        self.blueprints.iter().find(|b| b.title == title)
    }

    pub fn resolve_function(&self, title: &str) -> Option<&SavedFunction> {
        self.functions.iter().find(|f| f.title == title)
    }
}
