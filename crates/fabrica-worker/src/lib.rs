//! Off-thread job execution for Fabrica.
//!
//! Generation jobs run on a dedicated worker thread and report progress
//! through a typed message protocol. Clients fence responses by work id
//! so a cancelled job can never contaminate the next one.

use thiserror::Error;

pub mod client;
pub mod format;
pub mod protocol;
pub mod worker;

pub use client::WorkerClient;
pub use format::{JsonPretty, OutputFormatter};
pub use protocol::{Request, Response};
pub use worker::Worker;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker thread is gone")]
    Disconnected,

    #[error(transparent)]
    Generate(#[from] fabrica_generate::GenerateError),

    #[error("output formatting failed: {0}")]
    Format(String),
}
