use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::vault::SavedBlueprint;

/// Value source for one blueprint field.
///
/// A blueprint containing any `Empty` field is incomplete and is rejected
/// by validation before a generation job can start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueSpec {
    Empty,
    #[serde(rename_all = "camelCase")]
    Static { static_value: String },
    Function {
        #[serde(flatten)]
        call: FunctionArgs,
    },
}

impl ValueSpec {
    pub fn is_empty(&self) -> bool {
        matches!(self, ValueSpec::Empty)
    }
}

/// Closed enumeration of generator function names.
///
/// Wire names match the persisted vault contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FunctionTag {
    RandomNumbers,
    GradualValue,
    RandomsFromArray,
    #[serde(rename = "randomIDs")]
    RandomIds,
    RandomCustomFunction,
    RandomStrings,
    FromBlueprint,
    RandomArrays,
    RandomEmail,
}

impl FunctionTag {
    pub const ALL: [FunctionTag; 9] = [
        FunctionTag::RandomNumbers,
        FunctionTag::GradualValue,
        FunctionTag::RandomsFromArray,
        FunctionTag::RandomIds,
        FunctionTag::RandomCustomFunction,
        FunctionTag::RandomStrings,
        FunctionTag::FromBlueprint,
        FunctionTag::RandomArrays,
        FunctionTag::RandomEmail,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            FunctionTag::RandomNumbers => "randomNumbers",
            FunctionTag::GradualValue => "gradualValue",
            FunctionTag::RandomsFromArray => "randomsFromArray",
            FunctionTag::RandomIds => "randomIDs",
            FunctionTag::RandomCustomFunction => "randomCustomFunction",
            FunctionTag::RandomStrings => "randomStrings",
            FunctionTag::FromBlueprint => "fromBlueprint",
            FunctionTag::RandomArrays => "randomArrays",
            FunctionTag::RandomEmail => "randomEmail",
        }
    }
}

/// Parameter contract for a piece of user-authored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CodeKind {
    /// `customFunction(indexOfElement) -> value`
    Function,
    /// `customMap(element, indexOfElement) -> value`
    Map,
    /// `customCompare(element, createdElements, indexOfElement) -> bool`
    Compare,
}

impl CodeKind {
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            CodeKind::Function => &["indexOfElement"],
            CodeKind::Map => &["element", "indexOfElement"],
            CodeKind::Compare => &["element", "createdElements", "indexOfElement"],
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            CodeKind::Function => "customFunction",
            CodeKind::Map => "customMap",
            CodeKind::Compare => "customCompare",
        }
    }
}

/// User-authored code kept as source text.
///
/// The text is only turned into something executable by the code runtime
/// in the generation crate; everywhere else it travels as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomCode {
    pub kind: CodeKind,
    pub source: String,
}

impl CustomCode {
    pub fn new(kind: CodeKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }
}

/// Options shared by every generator function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseOptions {
    #[serde(default)]
    pub unique: bool,
    /// Overridden per job; never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_items: Option<u64>,
    /// Retry budget per output slot. `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub re_create_limit: Option<u32>,
    #[serde(default)]
    pub show_logs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_map: Option<CustomCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_compare: Option<CustomCode>,
}

/// Character classes selectable for identifier generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Number,
    Letter,
    Symbol,
}

impl CharClass {
    pub fn wire_name(&self) -> &'static str {
        match self {
            CharClass::Number => "number",
            CharClass::Letter => "letter",
            CharClass::Symbol => "symbol",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "number" => Some(CharClass::Number),
            "letter" => Some(CharClass::Letter),
            "symbol" => Some(CharClass::Symbol),
            _ => None,
        }
    }
}

/// Word libraries selectable for string generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Name,
    Adjective,
    Country,
    Noun,
}

impl WordClass {
    pub fn wire_name(&self) -> &'static str {
        match self {
            WordClass::Name => "name",
            WordClass::Adjective => "adjective",
            WordClass::Country => "country",
            WordClass::Noun => "noun",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(WordClass::Name),
            "adjective" => Some(WordClass::Adjective),
            "country" => Some(WordClass::Country),
            "noun" => Some(WordClass::Noun),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RandomNumbersInputs {
    pub starting: f64,
    pub ending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomNumbersOptions {
    pub only_integers: bool,
    pub maximum_digits_after_point: u32,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GradualValueInputs {
    pub starting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradualValueOptions {
    pub increment_value: f64,
    #[serde(flatten)]
    pub base: BaseOptions,
}

/// Shared input shape for `randomsFromArray` and `randomArrays`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArrayInputs {
    pub array_of_items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomsFromArrayOptions {
    pub keep_order: bool,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RandomIdsInputs {
    #[serde(rename = "minIDLength")]
    pub min_id_length: u32,
    #[serde(rename = "maxIDLength")]
    pub max_id_length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomIdsOptions {
    pub char_lib: Vec<CharClass>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomFunctionInputs {
    /// Absent while the user is still editing the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_function: Option<CustomCode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomStringsInputs {
    pub min_number_of_words: u32,
    pub max_number_of_words: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomStringsOptions {
    pub lib: Vec<WordClass>,
    pub separator: String,
    #[serde(flatten)]
    pub base: BaseOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FromBlueprintInputs {
    /// The referenced vault snapshot, embedded in string-mirrored form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<SavedBlueprint>,
    /// Object count for the inner blueprint, independent of the outer job.
    pub base_iteration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomArraysOptions {
    pub keep_order: bool,
    pub allow_duplicates: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length_of_array: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length_of_array: Option<u32>,
    #[serde(flatten)]
    pub base: BaseOptions,
}

/// One argument object per function tag.
///
/// Each variant pairs the tag-specific inputs with its options; the shared
/// `BaseOptions` is embedded in every options struct. Exhaustive matching
/// over this enum keeps adding a tag a compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "functionName", content = "argObject", rename_all = "camelCase")]
pub enum FunctionArgs {
    RandomNumbers {
        inputs: RandomNumbersInputs,
        options: RandomNumbersOptions,
    },
    GradualValue {
        inputs: GradualValueInputs,
        options: GradualValueOptions,
    },
    RandomsFromArray {
        inputs: ArrayInputs,
        options: RandomsFromArrayOptions,
    },
    #[serde(rename = "randomIDs")]
    RandomIds {
        inputs: RandomIdsInputs,
        options: RandomIdsOptions,
    },
    RandomCustomFunction {
        inputs: CustomFunctionInputs,
        options: BaseOptions,
    },
    RandomStrings {
        inputs: RandomStringsInputs,
        options: RandomStringsOptions,
    },
    FromBlueprint {
        inputs: FromBlueprintInputs,
        options: BaseOptions,
    },
    RandomArrays {
        inputs: ArrayInputs,
        options: RandomArraysOptions,
    },
    RandomEmail { options: BaseOptions },
}

impl FunctionArgs {
    pub fn tag(&self) -> FunctionTag {
        match self {
            FunctionArgs::RandomNumbers { .. } => FunctionTag::RandomNumbers,
            FunctionArgs::GradualValue { .. } => FunctionTag::GradualValue,
            FunctionArgs::RandomsFromArray { .. } => FunctionTag::RandomsFromArray,
            FunctionArgs::RandomIds { .. } => FunctionTag::RandomIds,
            FunctionArgs::RandomCustomFunction { .. } => FunctionTag::RandomCustomFunction,
            FunctionArgs::RandomStrings { .. } => FunctionTag::RandomStrings,
            FunctionArgs::FromBlueprint { .. } => FunctionTag::FromBlueprint,
            FunctionArgs::RandomArrays { .. } => FunctionTag::RandomArrays,
            FunctionArgs::RandomEmail { .. } => FunctionTag::RandomEmail,
        }
    }

    pub fn base_options(&self) -> &BaseOptions {
        match self {
            FunctionArgs::RandomNumbers { options, .. } => &options.base,
            FunctionArgs::GradualValue { options, .. } => &options.base,
            FunctionArgs::RandomsFromArray { options, .. } => &options.base,
            FunctionArgs::RandomIds { options, .. } => &options.base,
            FunctionArgs::RandomCustomFunction { options, .. } => options,
            FunctionArgs::RandomStrings { options, .. } => &options.base,
            FunctionArgs::FromBlueprint { options, .. } => options,
            FunctionArgs::RandomArrays { options, .. } => &options.base,
            FunctionArgs::RandomEmail { options } => options,
        }
    }

    pub fn base_options_mut(&mut self) -> &mut BaseOptions {
        match self {
            FunctionArgs::RandomNumbers { options, .. } => &mut options.base,
            FunctionArgs::GradualValue { options, .. } => &mut options.base,
            FunctionArgs::RandomsFromArray { options, .. } => &mut options.base,
            FunctionArgs::RandomIds { options, .. } => &mut options.base,
            FunctionArgs::RandomCustomFunction { options, .. } => options,
            FunctionArgs::RandomStrings { options, .. } => &mut options.base,
            FunctionArgs::FromBlueprint { options, .. } => options,
            FunctionArgs::RandomArrays { options, .. } => &mut options.base,
            FunctionArgs::RandomEmail { options } => options,
        }
    }

    /// Default argument object used to populate an empty form for `tag`.
    pub fn default_for(tag: FunctionTag) -> FunctionArgs {
        match tag {
            FunctionTag::RandomNumbers => FunctionArgs::RandomNumbers {
                inputs: RandomNumbersInputs {
                    starting: 0.0,
                    ending: 100.0,
                },
                options: RandomNumbersOptions {
                    only_integers: true,
                    maximum_digits_after_point: 15,
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
            FunctionTag::GradualValue => FunctionArgs::GradualValue {
                inputs: GradualValueInputs { starting: 0.0 },
                options: GradualValueOptions {
                    increment_value: 1.0,
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
            FunctionTag::RandomsFromArray => FunctionArgs::RandomsFromArray {
                inputs: ArrayInputs {
                    array_of_items: Vec::new(),
                },
                options: RandomsFromArrayOptions {
                    keep_order: false,
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
            FunctionTag::RandomIds => FunctionArgs::RandomIds {
                inputs: RandomIdsInputs {
                    min_id_length: 8,
                    max_id_length: 12,
                },
                options: RandomIdsOptions {
                    char_lib: vec![CharClass::Number, CharClass::Letter, CharClass::Symbol],
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
            FunctionTag::RandomCustomFunction => FunctionArgs::RandomCustomFunction {
                inputs: CustomFunctionInputs {
                    custom_function: None,
                },
                options: BaseOptions::default(),
            },
            FunctionTag::RandomStrings => FunctionArgs::RandomStrings {
                inputs: RandomStringsInputs {
                    min_number_of_words: 1,
                    max_number_of_words: 4,
                },
                options: RandomStringsOptions {
                    lib: vec![WordClass::Noun, WordClass::Adjective],
                    separator: " ".to_string(),
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
            FunctionTag::FromBlueprint => FunctionArgs::FromBlueprint {
                inputs: FromBlueprintInputs {
                    blueprint: None,
                    base_iteration: 100,
                },
                options: BaseOptions::default(),
            },
            FunctionTag::RandomArrays => FunctionArgs::RandomArrays {
                inputs: ArrayInputs {
                    array_of_items: Vec::new(),
                },
                options: RandomArraysOptions {
                    keep_order: true,
                    allow_duplicates: false,
                    min_length_of_array: None,
                    max_length_of_array: None,
                    base: BaseOptions::default(),
                },
            },
            FunctionTag::RandomEmail => FunctionArgs::RandomEmail {
                options: BaseOptions::default(),
            },
        }
    }
}
