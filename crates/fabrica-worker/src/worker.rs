//! Dedicated worker thread running generation jobs off the caller's
//! thread, streaming progress back over a channel.

use std::thread;

use crossbeam::channel::{Receiver, Sender, unbounded};
use tracing::{info, warn};

use fabrica_core::from_mirror;
use fabrica_generate::{
    GenerateError, GenerateOptions, GenerationEngine, ProgressEvent, ProgressSink,
    resolve_blueprint,
};

use crate::WorkerError;
use crate::format::OutputFormatter;
use crate::protocol::{Request, Response};

/// Handle to a spawned worker thread.
///
/// Dropping the handle closes the request channel; the thread finishes
/// whatever job is in flight and exits. Responses from an abandoned job
/// are fenced out by work id on the client side.
pub struct Worker {
    requests: Sender<Request>,
    responses: Receiver<Response>,
}

impl Worker {
    pub fn spawn(formatter: Box<dyn OutputFormatter>) -> Worker {
        let (req_tx, req_rx) = unbounded();
        let (res_tx, res_rx) = unbounded();
        thread::spawn(move || run_loop(req_rx, res_tx, formatter));
        Worker {
            requests: req_tx,
            responses: res_rx,
        }
    }

    pub fn send(&self, request: Request) -> Result<(), WorkerError> {
        self.requests
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    pub fn responses(&self) -> &Receiver<Response> {
        &self.responses
    }
}

fn run_loop(rx: Receiver<Request>, tx: Sender<Response>, formatter: Box<dyn OutputFormatter>) {
    while let Ok(request) = rx.recv() {
        let work_id = request.work_id();
        info!(work_id, "job received");
        match handle(request, &tx, formatter.as_ref()) {
            Ok(response) => {
                let _ = tx.send(response);
            }
            Err(e) => {
                warn!(work_id, error = %e, "job failed");
                let _ = tx.send(Response::JobFailed {
                    work_id,
                    message: e.to_string(),
                });
            }
        }
    }
}

fn handle(
    request: Request,
    tx: &Sender<Response>,
    formatter: &dyn OutputFormatter,
) -> Result<Response, WorkerError> {
    match request {
        Request::RunBlueprintJob {
            work_id,
            blueprint,
            number_of_items,
            seed,
        } => {
            let blueprint = resolve_blueprint(&blueprint)?;
            let engine = engine_for(seed);
            let mut relay = ProgressRelay::new(tx, work_id, number_of_items);
            let items = engine.run_blueprint(&blueprint, number_of_items, &mut relay)?;
            relay.finish();
            Ok(Response::ResultReady { work_id, items })
        }
        Request::RunValueJob {
            work_id,
            function_name,
            arg_object,
            number_of_items,
            seed,
        } => {
            let args = from_mirror(function_name, &arg_object).map_err(GenerateError::from)?;
            let engine = engine_for(seed);
            let mut relay = ProgressRelay::new(tx, work_id, number_of_items);
            let items = engine.run_value(&args, number_of_items, &mut relay)?;
            relay.finish();
            Ok(Response::ResultReady { work_id, items })
        }
        Request::FormatOutput { work_id, objects } => {
            let text = formatter.format(&objects)?;
            Ok(Response::OutputTextReady { work_id, text })
        }
    }
}

fn engine_for(seed: Option<u64>) -> GenerationEngine {
    GenerationEngine::new(GenerateOptions {
        seed,
        ..GenerateOptions::default()
    })
}

/// Maps engine progress events onto the wire protocol.
///
/// Specific progress counts accepted candidates in the current column;
/// overall progress counts completed columns. Both only move forward,
/// except that specific progress restarts with each column.
struct ProgressRelay<'a> {
    tx: &'a Sender<Response>,
    work_id: u64,
    number_of_items: u64,
    last_specific: Option<u8>,
}

impl<'a> ProgressRelay<'a> {
    fn new(tx: &'a Sender<Response>, work_id: u64, number_of_items: u64) -> Self {
        Self {
            tx,
            work_id,
            number_of_items,
            last_specific: None,
        }
    }

    fn send_specific(&mut self, percent: u8) {
        if self.last_specific != Some(percent) {
            self.last_specific = Some(percent);
            let _ = self.tx.send(Response::SpecificProgress {
                work_id: self.work_id,
                percent,
            });
        }
    }

    /// Guarantees a terminal 100 even for empty jobs.
    fn finish(&mut self) {
        self.send_specific(100);
    }
}

impl ProgressSink for ProgressRelay<'_> {
    fn emit(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Compared {
                index,
                accepted: true,
            } => {
                let total = self.number_of_items.max(1);
                let percent = (((index + 1) * 100) / total).min(100) as u8;
                self.send_specific(percent);
            }
            ProgressEvent::ColumnCompleted { index, total, .. } => {
                let percent = (((index + 1) * 100) / total.max(1)) as u8;
                let _ = self.tx.send(Response::OverallProgress {
                    work_id: self.work_id,
                    percent,
                });
                // Next column restarts the specific counter.
                self.last_specific = None;
            }
            _ => {}
        }
    }
}
