//! Typed request/response envelopes for the worker channel.
//!
//! Every message carries the work id of the job it belongs to; the
//! client drops anything tagged with a superseded id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fabrica_core::{ArgObjectStr, BlueprintStr, FunctionTag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    RunBlueprintJob {
        work_id: u64,
        blueprint: BlueprintStr,
        number_of_items: u64,
        seed: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    RunValueJob {
        work_id: u64,
        function_name: FunctionTag,
        arg_object: ArgObjectStr,
        number_of_items: u64,
        seed: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    FormatOutput { work_id: u64, objects: Vec<Value> },
}

impl Request {
    pub fn work_id(&self) -> u64 {
        match self {
            Request::RunBlueprintJob { work_id, .. }
            | Request::RunValueJob { work_id, .. }
            | Request::FormatOutput { work_id, .. } => *work_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    /// Fraction of blueprint columns resolved, 0..=100.
    #[serde(rename_all = "camelCase")]
    OverallProgress { work_id: u64, percent: u8 },
    /// Fraction of accepted items in the current column, 0..=100.
    #[serde(rename_all = "camelCase")]
    SpecificProgress { work_id: u64, percent: u8 },
    #[serde(rename_all = "camelCase")]
    ResultReady { work_id: u64, items: Vec<Value> },
    #[serde(rename_all = "camelCase")]
    OutputTextReady { work_id: u64, text: String },
    #[serde(rename_all = "camelCase")]
    JobFailed { work_id: u64, message: String },
}

impl Response {
    pub fn work_id(&self) -> u64 {
        match self {
            Response::OverallProgress { work_id, .. }
            | Response::SpecificProgress { work_id, .. }
            | Response::ResultReady { work_id, .. }
            | Response::OutputTextReady { work_id, .. }
            | Response::JobFailed { work_id, .. } => *work_id,
        }
    }

    /// True for the single message that ends a job.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Response::ResultReady { .. }
                | Response::OutputTextReady { .. }
                | Response::JobFailed { .. }
        )
    }
}
