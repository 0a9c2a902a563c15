//! Blueprint interpreter: resolves each field to a column of values and
//! zips the columns into output objects.

use rand_chacha::ChaCha8Rng;
use serde_json::{Map, Value};
use tracing::info;

use fabrica_core::{
    Blueprint, BlueprintField, BlueprintStr, IssueSet, ValueSpec, blueprint_from_mirror,
    validate_blueprint,
};

use crate::errors::{GenerateError, Result};
use crate::events::{ProgressEvent, ProgressSink};
use crate::model::GenerateOptions;
use crate::registry;

/// Converts a string-mirrored blueprint and runs the validation gate.
pub fn resolve_blueprint(mirrored: &BlueprintStr) -> Result<Blueprint> {
    let blueprint = blueprint_from_mirror(mirrored)?;
    check(&blueprint)?;
    Ok(blueprint)
}

fn check(blueprint: &Blueprint) -> Result<()> {
    let issues = validate_blueprint(blueprint);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(fabrica_core::Error::InvalidBlueprint(IssueSet(issues)).into())
    }
}

/// Generates `number_of_items` objects from `blueprint`.
///
/// All-or-nothing: any field failure aborts the whole run. Emits one
/// `ColumnCompleted` event per resolved field, in blueprint order.
pub fn generate_objects(
    blueprint: &Blueprint,
    number_of_items: u64,
    opts: &GenerateOptions,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Value>> {
    generate_objects_at_depth(blueprint, number_of_items, 0, opts, rng, sink)
}

pub(crate) fn generate_objects_at_depth(
    blueprint: &Blueprint,
    number_of_items: u64,
    depth: u32,
    opts: &GenerateOptions,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Value>> {
    if depth > opts.max_blueprint_depth {
        return Err(GenerateError::DepthExceeded(opts.max_blueprint_depth));
    }
    check(blueprint)?;

    let total = blueprint.len();
    info!(items = number_of_items, fields = total, depth, "resolving blueprint");

    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(total);
    for (index, field) in blueprint.fields.iter().enumerate() {
        let column = resolve_column(field, number_of_items, depth, opts, rng, sink)?;
        sink.emit(ProgressEvent::ColumnCompleted {
            index,
            total,
            key: field.key.clone(),
        });
        columns.push(column);
    }

    let mut objects = Vec::with_capacity(number_of_items as usize);
    for row in 0..number_of_items as usize {
        let mut object = Map::with_capacity(total);
        for (field, column) in blueprint.fields.iter().zip(&columns) {
            object.insert(field.key.clone(), column[row].clone());
        }
        objects.push(Value::Object(object));
    }

    info!(items = objects.len(), "blueprint resolved");
    Ok(objects)
}

fn resolve_column(
    field: &BlueprintField,
    number_of_items: u64,
    depth: u32,
    opts: &GenerateOptions,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Value>> {
    match &field.value {
        // Validation rejects empty values before this point.
        ValueSpec::Empty => Err(GenerateError::InvalidArgs(format!(
            "field '{}' has no value",
            field.key
        ))),
        ValueSpec::Static { static_value } => Ok(vec![
            Value::String(static_value.clone());
            number_of_items as usize
        ]),
        ValueSpec::Function { call } => {
            registry::call(call, number_of_items, depth, opts, rng, sink)
        }
    }
}
