//! Core contracts and helpers for Fabrica.
//!
//! This crate defines the value-spec data model, the string-mirrored
//! persistence form, blueprint validation, and the vault snapshot types
//! shared across the generation engine and the worker protocol.

pub mod blueprint;
pub mod error;
pub mod mirror;
pub mod spec;
pub mod validation;
pub mod vault;

pub use blueprint::{Blueprint, BlueprintField};
pub use error::{Error, IssueSet, Result};
pub use mirror::{
    ArgObjectStr, BlueprintFieldStr, BlueprintStr, FieldKind, FunctionCallStr, ValueSpecStr,
    blueprint_from_mirror, blueprint_to_mirror, from_mirror, input_fields, option_fields,
    to_mirror,
};
pub use spec::{
    ArrayInputs, BaseOptions, CharClass, CodeKind, CustomCode, CustomFunctionInputs,
    FromBlueprintInputs, FunctionArgs, FunctionTag, GradualValueInputs, GradualValueOptions,
    RandomArraysOptions, RandomIdsInputs, RandomIdsOptions, RandomNumbersInputs,
    RandomNumbersOptions, RandomStringsInputs, RandomStringsOptions, RandomsFromArrayOptions,
    ValueSpec, WordClass,
};
pub use validation::{BlueprintIssue, IssueKind, blueprint_is_valid, duplicate_flags, validate_blueprint};
pub use vault::{SavedBlueprint, SavedFunction, VAULT_VERSION, Vault};
