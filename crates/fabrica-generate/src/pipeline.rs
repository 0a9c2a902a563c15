//! Per-field generation pipeline: create, map, compare, accept or retry.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{info, warn};

use fabrica_core::BaseOptions;

use crate::errors::Result;
use crate::events::{ProgressEvent, ProgressSink};
use crate::script::{CodeRuntime, CompiledCode};

/// Resolved runtime options for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub number_of_items: u64,
    pub unique: bool,
    /// Retry budget per output slot. `None` means unlimited.
    pub re_create_limit: Option<u32>,
    pub show_logs: bool,
    pub custom_map: Option<CompiledCode>,
    pub custom_compare: Option<CompiledCode>,
}

impl PipelineOptions {
    /// Builds pipeline options from shared base options, compiling any
    /// embedded custom code up front.
    pub fn from_base(base: &BaseOptions, number_of_items: u64) -> Result<Self> {
        let runtime = CodeRuntime;
        Ok(Self {
            number_of_items,
            unique: base.unique,
            re_create_limit: base.re_create_limit,
            show_logs: base.show_logs,
            custom_map: base
                .custom_map
                .as_ref()
                .map(|c| runtime.compile(c))
                .transpose()?,
            custom_compare: base
                .custom_compare
                .as_ref()
                .map(|c| runtime.compile(c))
                .transpose()?,
        })
    }
}

/// Runs the create → map → compare → accept/retry loop.
///
/// `base` produces one raw candidate for an output slot. When the retry
/// budget for a slot runs out, the last candidate is accepted as-is and
/// a warning is logged; exhaustion never fails the job. Errors from the
/// base generator or from custom code abort the whole run.
pub fn generate_items(
    base: &mut dyn FnMut(u64, &mut ChaCha8Rng) -> Result<Value>,
    options: &PipelineOptions,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Value>> {
    let mut accepted: Vec<Value> = Vec::with_capacity(options.number_of_items as usize);
    let mut seen: HashSet<String> = HashSet::new();

    for index in 0..options.number_of_items {
        let mut attempts: u32 = 0;
        loop {
            let mut candidate = base(index, rng)?;
            sink.emit(ProgressEvent::ItemCreated { index });

            if let Some(map) = &options.custom_map {
                candidate = map.run_map(&candidate, index)?;
                sink.emit(ProgressEvent::Mapped { index });
            }

            // customCompare takes precedence over the uniqueness check.
            let ok = if let Some(compare) = &options.custom_compare {
                compare.run_compare(&candidate, &accepted, index)?
            } else if options.unique {
                !seen.contains(&candidate.to_string())
            } else {
                true
            };
            sink.emit(ProgressEvent::Compared { index, accepted: ok });

            let exhausted = !ok
                && options
                    .re_create_limit
                    .is_some_and(|limit| attempts + 1 >= limit);
            if ok || exhausted {
                if exhausted {
                    warn!(index, attempts, "retry budget exhausted, keeping candidate");
                    sink.emit(ProgressEvent::RetryLimitReached { index });
                }
                if options.unique {
                    seen.insert(candidate.to_string());
                }
                if options.show_logs {
                    info!(index, value = %candidate, "item accepted");
                }
                accepted.push(candidate);
                break;
            }
            attempts += 1;
        }
    }

    Ok(accepted)
}
