//! Output formatting seam.

use serde_json::Value;

use crate::WorkerError;

/// Renders finished objects into display text. The worker only routes
/// `FormatOutput` requests through this trait; concrete formats live
/// with the caller.
pub trait OutputFormatter: Send {
    fn format(&self, objects: &[Value]) -> Result<String, WorkerError>;
}

/// Pretty-printed JSON array, the default presentation.
#[derive(Debug, Default)]
pub struct JsonPretty;

impl OutputFormatter for JsonPretty {
    fn format(&self, objects: &[Value]) -> Result<String, WorkerError> {
        serde_json::to_string_pretty(objects).map_err(|e| WorkerError::Format(e.to_string()))
    }
}
