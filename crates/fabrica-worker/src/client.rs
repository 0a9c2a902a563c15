//! Client-side handle with stale-response fencing.

use crossbeam::channel::Receiver;

use crate::WorkerError;
use crate::format::{JsonPretty, OutputFormatter};
use crate::protocol::{Request, Response};
use crate::worker::Worker;

type FormatterFactory = Box<dyn Fn() -> Box<dyn OutputFormatter>>;

/// Owns a worker and the current work id.
///
/// Work ids increase monotonically; a response is only accepted while
/// its id matches the current one, so messages from superseded jobs are
/// silently dropped. Cancellation replaces the worker outright rather
/// than signalling it.
pub struct WorkerClient {
    worker: Worker,
    factory: FormatterFactory,
    next_id: u64,
    current: u64,
}

impl WorkerClient {
    pub fn new() -> Self {
        Self::with_formatter(|| Box::new(JsonPretty))
    }

    pub fn with_formatter<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn OutputFormatter> + 'static,
    {
        let factory: FormatterFactory = Box::new(factory);
        let worker = Worker::spawn(factory());
        Self {
            worker,
            factory,
            next_id: 0,
            current: 0,
        }
    }

    /// Starts a new job scope and returns its work id.
    pub fn begin(&mut self) -> u64 {
        self.next_id += 1;
        self.current = self.next_id;
        self.current
    }

    pub fn current_work_id(&self) -> u64 {
        self.current
    }

    /// True when `response` belongs to the current job.
    pub fn accept(&self, response: &Response) -> bool {
        self.current != 0 && response.work_id() == self.current
    }

    pub fn send(&self, request: Request) -> Result<(), WorkerError> {
        self.worker.send(request)
    }

    pub fn responses(&self) -> &Receiver<Response> {
        self.worker.responses()
    }

    /// Abandons the in-flight job. The old worker finishes on its own
    /// and its remaining responses fail the [`WorkerClient::accept`]
    /// check; a fresh worker takes over for subsequent jobs.
    pub fn cancel(&mut self) {
        self.worker = Worker::spawn((self.factory)());
        self.current = 0;
    }
}

impl Default for WorkerClient {
    fn default() -> Self {
        Self::new()
    }
}
