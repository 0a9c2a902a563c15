//! String-mirrored form of the data model.
//!
//! Persisted blueprints and the editing surface both hold every argument
//! as a string. The tables in this module assign a [`FieldKind`] to each
//! argument of each function tag, and the conversion pair
//! [`to_mirror`] / [`from_mirror`] translates between the typed form and
//! the mirrored form without losing information.
//!
//! `numberOfItems`, `showLogs` and `reCreateLimit` are runtime-only and
//! are never mirrored.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::blueprint::{Blueprint, BlueprintField};
use crate::error::{Error, Result};
use crate::spec::{FunctionArgs, FunctionTag, ValueSpec};

/// Editing/persistence kind of a single mirrored argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    NonNegativeInt,
    Check,
    QuotedString,
    MultipleChecks,
    ArrayOfItems,
    CustomMap,
    CustomCompare,
    CustomFunction,
    BlueprintSelect,
}

/// Mirrored argument object: every value is a string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ArgObjectStr {
    pub inputs: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallStr {
    pub function_name: FunctionTag,
    pub arg_object: ArgObjectStr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueSpecStr {
    Empty,
    #[serde(rename_all = "camelCase")]
    Static { static_value: String },
    Function {
        #[serde(flatten)]
        call: FunctionCallStr,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BlueprintFieldStr {
    pub id: Uuid,
    pub key: String,
    pub value: ValueSpecStr,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BlueprintStr {
    pub fields: Vec<BlueprintFieldStr>,
}

/// Mirrored input fields for `tag`, in form order, with wire names.
pub fn input_fields(tag: FunctionTag) -> &'static [(&'static str, FieldKind)] {
    match tag {
        FunctionTag::RandomNumbers => &[
            ("starting", FieldKind::Float),
            ("ending", FieldKind::Float),
        ],
        FunctionTag::GradualValue => &[("starting", FieldKind::Float)],
        FunctionTag::RandomsFromArray => &[("arrayOfItems", FieldKind::ArrayOfItems)],
        FunctionTag::RandomIds => &[
            ("minIDLength", FieldKind::NonNegativeInt),
            ("maxIDLength", FieldKind::NonNegativeInt),
        ],
        FunctionTag::RandomCustomFunction => &[("customFunction", FieldKind::CustomFunction)],
        FunctionTag::RandomStrings => &[
            ("minNumberOfWords", FieldKind::NonNegativeInt),
            ("maxNumberOfWords", FieldKind::NonNegativeInt),
        ],
        FunctionTag::FromBlueprint => &[
            ("blueprint", FieldKind::BlueprintSelect),
            ("baseIteration", FieldKind::NonNegativeInt),
        ],
        FunctionTag::RandomArrays => &[("arrayOfItems", FieldKind::ArrayOfItems)],
        FunctionTag::RandomEmail => &[],
    }
}

/// Mirrored option fields for `tag`. Every tag ends with the shared
/// `unique` / `customMap` / `customCompare` triple.
pub fn option_fields(tag: FunctionTag) -> &'static [(&'static str, FieldKind)] {
    match tag {
        FunctionTag::RandomNumbers => &[
            ("onlyIntegers", FieldKind::Check),
            ("maximumDigitsAfterPoint", FieldKind::NonNegativeInt),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::GradualValue => &[
            ("incrementValue", FieldKind::Float),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomsFromArray => &[
            ("keepOrder", FieldKind::Check),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomIds => &[
            ("charLib", FieldKind::MultipleChecks),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomCustomFunction => &[
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomStrings => &[
            ("lib", FieldKind::MultipleChecks),
            ("separator", FieldKind::QuotedString),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::FromBlueprint => &[
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomArrays => &[
            ("keepOrder", FieldKind::Check),
            ("allowDuplicates", FieldKind::Check),
            ("minLengthOfArray", FieldKind::NonNegativeInt),
            ("maxLengthOfArray", FieldKind::NonNegativeInt),
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
        FunctionTag::RandomEmail => &[
            ("unique", FieldKind::Check),
            ("customMap", FieldKind::CustomMap),
            ("customCompare", FieldKind::CustomCompare),
        ],
    }
}

fn mirror_code_kind(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::CustomFunction => "function",
        FieldKind::CustomMap => "map",
        FieldKind::CustomCompare => "compare",
        _ => unreachable!("not a code field"),
    }
}

/// Renders one typed argument value as its mirrored string.
fn field_to_string(kind: FieldKind, value: &Value) -> String {
    match kind {
        FieldKind::Float | FieldKind::NonNegativeInt => match value {
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        },
        FieldKind::Check => match value {
            Value::Bool(true) => "true".to_string(),
            _ => "false".to_string(),
        },
        FieldKind::QuotedString => match value {
            Value::String(s) => format!("\"{s}\""),
            _ => "\"\"".to_string(),
        },
        FieldKind::MultipleChecks => match value {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(","),
            _ => String::new(),
        },
        FieldKind::ArrayOfItems => match value {
            Value::Array(_) => {
                let rendered = value.to_string();
                rendered[1..rendered.len() - 1].to_string()
            }
            _ => String::new(),
        },
        FieldKind::CustomFunction | FieldKind::CustomMap | FieldKind::CustomCompare => {
            match value {
                Value::Object(obj) => obj
                    .get("source")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                _ => String::new(),
            }
        }
        FieldKind::BlueprintSelect => match value {
            Value::Null => String::new(),
            other => other.to_string(),
        },
    }
}

/// Parses one mirrored string back into a typed argument value.
///
/// Returns `Value::Null` when the string denotes an absent optional value;
/// the caller drops the key so the tag default applies.
fn field_from_string(name: &str, kind: FieldKind, raw: &str) -> Result<Value> {
    let parse_err = |detail: &str| Error::Mirror(format!("field '{name}': {detail}"));
    match kind {
        FieldKind::Float => {
            if raw.is_empty() {
                return Ok(Value::Null);
            }
            let n: f64 = raw
                .trim()
                .parse()
                .map_err(|_| parse_err("expected a number"))?;
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| parse_err("expected a finite number"))
        }
        FieldKind::NonNegativeInt => {
            if raw.is_empty() {
                return Ok(Value::Null);
            }
            let n: u64 = raw
                .trim()
                .parse()
                .map_err(|_| parse_err("expected a non-negative integer"))?;
            Ok(Value::Number(n.into()))
        }
        FieldKind::Check => Ok(Value::Bool(raw == "true")),
        FieldKind::QuotedString => {
            let first = raw.find('"');
            let last = raw.rfind('"');
            let inner = match (first, last) {
                (Some(a), Some(b)) if a < b => &raw[a + 1..b],
                _ => raw,
            };
            Ok(Value::String(inner.to_string()))
        }
        FieldKind::MultipleChecks => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
        FieldKind::ArrayOfItems => {
            serde_json::from_str(&format!("[{raw}]")).map_err(|_| parse_err("expected JSON items"))
        }
        FieldKind::CustomFunction | FieldKind::CustomMap | FieldKind::CustomCompare => {
            if raw.is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::json!({
                "kind": mirror_code_kind(kind),
                "source": raw,
            }))
        }
        FieldKind::BlueprintSelect => {
            if raw.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(raw).map_err(|_| parse_err("expected a saved blueprint"))
        }
    }
}

/// Converts a typed argument object into its mirrored form.
pub fn to_mirror(args: &FunctionArgs) -> ArgObjectStr {
    let tag = args.tag();
    let json = serde_json::to_value(args).unwrap_or(Value::Null);
    let empty = Value::Object(serde_json::Map::new());
    let arg = json.get("argObject").unwrap_or(&empty);
    let inputs_json = arg.get("inputs").unwrap_or(&empty);
    let options_json = arg.get("options").unwrap_or(&empty);

    let mut mirror = ArgObjectStr::default();
    for (name, kind) in input_fields(tag) {
        let value = inputs_json.get(*name).unwrap_or(&Value::Null);
        mirror
            .inputs
            .insert((*name).to_string(), field_to_string(*kind, value));
    }
    for (name, kind) in option_fields(tag) {
        let value = options_json.get(*name).unwrap_or(&Value::Null);
        mirror
            .options
            .insert((*name).to_string(), field_to_string(*kind, value));
    }
    mirror
}

/// Converts a mirrored argument object back into typed form.
///
/// Starts from the tag's default argument object and applies every present
/// mirrored key, so partially filled forms still resolve.
pub fn from_mirror(tag: FunctionTag, mirror: &ArgObjectStr) -> Result<FunctionArgs> {
    let mut json = serde_json::to_value(FunctionArgs::default_for(tag))
        .map_err(|e| Error::Mirror(e.to_string()))?;
    let arg = json
        .get_mut("argObject")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::Mirror("malformed default argument object".to_string()))?;

    apply_section(
        arg.entry("inputs").or_insert_with(|| Value::Object(Default::default())),
        input_fields(tag),
        &mirror.inputs,
    )?;
    apply_section(
        arg.entry("options").or_insert_with(|| Value::Object(Default::default())),
        option_fields(tag),
        &mirror.options,
    )?;

    serde_json::from_value(json).map_err(|e| Error::Mirror(e.to_string()))
}

fn apply_section(
    section: &mut Value,
    table: &[(&'static str, FieldKind)],
    mirrored: &BTreeMap<String, String>,
) -> Result<()> {
    let obj = section
        .as_object_mut()
        .ok_or_else(|| Error::Mirror("malformed default argument object".to_string()))?;
    for (name, kind) in table {
        if let Some(raw) = mirrored.get(*name) {
            match field_from_string(name, *kind, raw)? {
                Value::Null => {
                    obj.remove(*name);
                }
                parsed => {
                    obj.insert((*name).to_string(), parsed);
                }
            }
        }
    }
    Ok(())
}

fn value_spec_to_mirror(value: &ValueSpec) -> ValueSpecStr {
    match value {
        ValueSpec::Empty => ValueSpecStr::Empty,
        ValueSpec::Static { static_value } => ValueSpecStr::Static {
            static_value: static_value.clone(),
        },
        ValueSpec::Function { call } => ValueSpecStr::Function {
            call: FunctionCallStr {
                function_name: call.tag(),
                arg_object: to_mirror(call),
            },
        },
    }
}

fn value_spec_from_mirror(value: &ValueSpecStr) -> Result<ValueSpec> {
    Ok(match value {
        ValueSpecStr::Empty => ValueSpec::Empty,
        ValueSpecStr::Static { static_value } => ValueSpec::Static {
            static_value: static_value.clone(),
        },
        ValueSpecStr::Function { call } => ValueSpec::Function {
            call: from_mirror(call.function_name, &call.arg_object)?,
        },
    })
}

pub fn blueprint_to_mirror(blueprint: &Blueprint) -> BlueprintStr {
    BlueprintStr {
        fields: blueprint
            .fields
            .iter()
            .map(|f| BlueprintFieldStr {
                id: f.id,
                key: f.key.clone(),
                value: value_spec_to_mirror(&f.value),
            })
            .collect(),
    }
}

pub fn blueprint_from_mirror(blueprint: &BlueprintStr) -> Result<Blueprint> {
    let mut fields = Vec::with_capacity(blueprint.fields.len());
    for f in &blueprint.fields {
        fields.push(BlueprintField {
            id: f.id,
            key: f.key.clone(),
            value: value_spec_from_mirror(&f.value)?,
        });
    }
    Ok(Blueprint { fields })
}
