//! Progress events emitted while a job runs.

/// Lifecycle notifications for a single generation job.
///
/// Per-item events carry the output slot index; `Compared` fires for
/// every candidate, whether acceptance came from customCompare, the
/// uniqueness check, or neither.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    ItemCreated { index: u64 },
    Mapped { index: u64 },
    Compared { index: u64, accepted: bool },
    /// The retry budget for this slot ran out; the last candidate was
    /// accepted as-is.
    RetryLimitReached { index: u64 },
    /// One blueprint column finished resolving.
    ColumnCompleted {
        index: usize,
        total: usize,
        key: String,
    },
}

pub trait ProgressSink {
    fn emit(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> ProgressSink for F {
    fn emit(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _event: ProgressEvent) {}
}
