//! Error taxonomy for the generation engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Blueprint or mirror problems detected before generation starts.
    #[error(transparent)]
    Invalid(#[from] fabrica_core::Error),

    #[error("{role}: compile error: {message}")]
    Compile { role: &'static str, message: String },

    #[error("customMap returned no value for item {index}")]
    UndefinedMap { index: u64 },

    #[error("customCompare returned a non-boolean for item {index}")]
    NonBooleanCompare { index: u64 },

    #[error("{role} failed at item {index}: {message}")]
    Eval {
        role: &'static str,
        index: u64,
        message: String,
    },

    #[error("generated value cannot be represented as JSON: {0}")]
    NonSerializable(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("vault entry unavailable: {0}")]
    VaultUnavailable(String),

    #[error("blueprint nesting exceeded the depth limit of {0}")]
    DepthExceeded(u32),
}
