//! Generator registry: one entry per function tag, plus the base
//! generators each tag wraps in the pipeline.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use fabrica_core::{FunctionArgs, FunctionTag, blueprint_from_mirror};

use crate::errors::{GenerateError, Result};
use crate::events::{NullSink, ProgressSink};
use crate::interpreter;
use crate::model::GenerateOptions;
use crate::pipeline::{PipelineOptions, generate_items};
use crate::script::CodeRuntime;
use crate::words;

/// Retry budget forced onto composite generators that sample a finite
/// candidate population.
pub const COMPOSITE_RETRY_LIMIT: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// General-purpose value generator.
    Fundamental,
    /// Produces one fixed, domain-shaped kind of output.
    Specific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionEntry {
    pub tag: FunctionTag,
    pub category: Category,
    pub display_name: &'static str,
}

/// Registry entry for `tag`. Total over the tag enum.
pub fn entry(tag: FunctionTag) -> FunctionEntry {
    let (category, display_name) = match tag {
        FunctionTag::RandomNumbers => (Category::Fundamental, "number"),
        FunctionTag::GradualValue => (Category::Fundamental, "gradual value"),
        FunctionTag::RandomsFromArray => (Category::Fundamental, "item from array"),
        FunctionTag::RandomIds => (Category::Fundamental, "identifier"),
        FunctionTag::RandomCustomFunction => (Category::Fundamental, "custom function"),
        FunctionTag::RandomStrings => (Category::Fundamental, "string"),
        FunctionTag::FromBlueprint => (Category::Fundamental, "object from vault"),
        FunctionTag::RandomArrays => (Category::Fundamental, "array from array"),
        FunctionTag::RandomEmail => (Category::Specific, "email"),
    };
    FunctionEntry {
        tag,
        category,
        display_name,
    }
}

pub fn all_entries() -> impl Iterator<Item = FunctionEntry> {
    FunctionTag::ALL.into_iter().map(entry)
}

fn json_number(v: f64) -> Result<Value> {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        return Ok(Value::Number((v as i64).into()));
    }
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| GenerateError::NonSerializable(format!("non-finite number {v}")))
}

/// Runs the generator for `args`, producing `number_of_items` values.
///
/// `number_of_items` always overrides whatever the argument object's own
/// base options carry. `depth` tracks nested vault-blueprint resolution.
pub fn call(
    args: &FunctionArgs,
    number_of_items: u64,
    depth: u32,
    opts: &GenerateOptions,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Value>> {
    let mut pipeline = PipelineOptions::from_base(args.base_options(), number_of_items)?;
    if pipeline.re_create_limit.is_none() {
        pipeline.re_create_limit = opts.default_re_create_limit;
    }

    match args {
        FunctionArgs::RandomNumbers { inputs, options } => {
            if inputs.starting > inputs.ending {
                return Err(GenerateError::InvalidArgs(
                    "starting must not exceed ending".to_string(),
                ));
            }
            if options.only_integers {
                let low = inputs.starting.ceil() as i64;
                let high = inputs.ending.floor() as i64;
                if low > high {
                    return Err(GenerateError::InvalidArgs(
                        "range contains no integers".to_string(),
                    ));
                }
                let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                    Ok(Value::Number(rng.random_range(low..=high).into()))
                };
                generate_items(&mut base, &pipeline, rng, sink)
            } else {
                let digits = options.maximum_digits_after_point.min(15);
                let factor = 10f64.powi(digits as i32);
                let (start, end) = (inputs.starting, inputs.ending);
                let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                    let v = rng.random_range(start..=end);
                    let rounded = (v * factor).round() / factor;
                    serde_json::Number::from_f64(rounded)
                        .map(Value::Number)
                        .ok_or_else(|| {
                            GenerateError::NonSerializable(format!("non-finite number {rounded}"))
                        })
                };
                generate_items(&mut base, &pipeline, rng, sink)
            }
        }

        FunctionArgs::GradualValue { inputs, options } => {
            let (start, step) = (inputs.starting, options.increment_value);
            let mut base =
                |index: u64, _: &mut ChaCha8Rng| json_number(start + index as f64 * step);
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomsFromArray { inputs, options } => {
            let items = &inputs.array_of_items;
            if items.is_empty() {
                return Err(GenerateError::InvalidArgs("arrayOfItems is empty".to_string()));
            }
            let keep_order = options.keep_order;
            let mut base = |index: u64, rng: &mut ChaCha8Rng| {
                let picked = if keep_order {
                    &items[index as usize % items.len()]
                } else {
                    &items[rng.random_range(0..items.len())]
                };
                Ok(picked.clone())
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomIds { inputs, options } => {
            if options.char_lib.is_empty() {
                return Err(GenerateError::InvalidArgs("charLib is empty".to_string()));
            }
            if inputs.min_id_length > inputs.max_id_length {
                return Err(GenerateError::InvalidArgs(
                    "minIDLength must not exceed maxIDLength".to_string(),
                ));
            }
            let chars: Vec<char> = options
                .char_lib
                .iter()
                .flat_map(|c| words::char_pool(*c).chars())
                .collect();
            let (min, max) = (inputs.min_id_length, inputs.max_id_length);
            let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                let len = rng.random_range(min..=max) as usize;
                let id: String = (0..len)
                    .map(|_| chars[rng.random_range(0..chars.len())])
                    .collect();
                Ok(Value::String(id))
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomCustomFunction { inputs, .. } => {
            let code = inputs.custom_function.as_ref().ok_or_else(|| {
                GenerateError::InvalidArgs("customFunction is not set".to_string())
            })?;
            let program = CodeRuntime.compile(code)?;
            let mut base = |index: u64, _: &mut ChaCha8Rng| program.run_function(index);
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomStrings { inputs, options } => {
            if options.lib.is_empty() {
                return Err(GenerateError::InvalidArgs("lib is empty".to_string()));
            }
            if inputs.min_number_of_words > inputs.max_number_of_words {
                return Err(GenerateError::InvalidArgs(
                    "minNumberOfWords must not exceed maxNumberOfWords".to_string(),
                ));
            }
            let pool: Vec<&'static str> = options
                .lib
                .iter()
                .flat_map(|c| words::word_pool(*c).iter().copied())
                .collect();
            let (min, max) = (inputs.min_number_of_words, inputs.max_number_of_words);
            let separator = options.separator.clone();
            let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                let count = rng.random_range(min..=max) as usize;
                let text = (0..count)
                    .map(|_| pool[rng.random_range(0..pool.len())])
                    .collect::<Vec<_>>()
                    .join(&separator);
                Ok(Value::String(text))
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::FromBlueprint { inputs, .. } => {
            pipeline.re_create_limit = Some(COMPOSITE_RETRY_LIMIT);
            let saved = inputs.blueprint.as_ref().ok_or_else(|| {
                GenerateError::VaultUnavailable("no blueprint selected".to_string())
            })?;
            if inputs.base_iteration == 0 {
                return Err(GenerateError::InvalidArgs(
                    "baseIteration must be at least 1".to_string(),
                ));
            }
            let inner = blueprint_from_mirror(&saved.blueprint)?;
            // The inner run is a population build; its progress stays silent.
            let population = interpreter::generate_objects_at_depth(
                &inner,
                inputs.base_iteration,
                depth + 1,
                opts,
                rng,
                &mut NullSink,
            )?;
            let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                Ok(population[rng.random_range(0..population.len())].clone())
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomArrays { inputs, options } => {
            let items = &inputs.array_of_items;
            if items.is_empty() {
                return Err(GenerateError::InvalidArgs("arrayOfItems is empty".to_string()));
            }
            let cap = if options.allow_duplicates {
                u32::MAX
            } else {
                items.len() as u32
            };
            let min = options.min_length_of_array.unwrap_or(1).min(cap);
            let max = options.max_length_of_array.unwrap_or(items.len() as u32).min(cap);
            if min > max {
                return Err(GenerateError::InvalidArgs(
                    "minLengthOfArray must not exceed maxLengthOfArray".to_string(),
                ));
            }
            let (keep_order, allow_duplicates) = (options.keep_order, options.allow_duplicates);
            let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                let len = rng.random_range(min..=max) as usize;
                let mut indexes: Vec<usize> = if allow_duplicates {
                    (0..len).map(|_| rng.random_range(0..items.len())).collect()
                } else {
                    rand::seq::index::sample(rng, items.len(), len).into_vec()
                };
                if keep_order {
                    indexes.sort_unstable();
                }
                Ok(Value::Array(
                    indexes.into_iter().map(|i| items[i].clone()).collect(),
                ))
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }

        FunctionArgs::RandomEmail { .. } => {
            pipeline.re_create_limit = Some(COMPOSITE_RETRY_LIMIT);
            let mut base = |_: u64, rng: &mut ChaCha8Rng| {
                let parts = rng.random_range(1..=3);
                let local: String = (0..parts)
                    .map(|_| words::NAMES[rng.random_range(0..words::NAMES.len())].to_lowercase())
                    .collect();
                let domain_pool = if rng.random_bool(0.5) {
                    words::NOUNS
                } else {
                    words::ADJECTIVES
                };
                let domain = domain_pool[rng.random_range(0..domain_pool.len())];
                let tld = words::TLDS[rng.random_range(0..words::TLDS.len())];
                Ok(Value::String(format!("{local}@{domain}.{tld}")))
            };
            generate_items(&mut base, &pipeline, rng, sink)
        }
    }
}
