//! Generation engine for Fabrica blueprints.
//!
//! Every generator runs its candidates through the same pipeline
//! (create, optional map, compare or uniqueness check, accept or retry)
//! and streams progress events to an injected sink. Randomness comes
//! from a seedable ChaCha8 stream so whole runs are reproducible.

pub mod engine;
pub mod errors;
pub mod events;
pub mod interpreter;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod script;
mod words;

pub use engine::GenerationEngine;
pub use errors::{GenerateError, Result};
pub use events::{NullSink, ProgressEvent, ProgressSink};
pub use interpreter::{generate_objects, resolve_blueprint};
pub use model::GenerateOptions;
pub use pipeline::{PipelineOptions, generate_items};
pub use registry::{COMPOSITE_RETRY_LIMIT, Category, FunctionEntry, all_entries, entry};
pub use script::{CodeRuntime, CompiledCode};
