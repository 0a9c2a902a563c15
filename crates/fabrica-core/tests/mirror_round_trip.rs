use chrono::{TimeZone, Utc};
use serde_json::json;

use fabrica_core::{
    ArgObjectStr, ArrayInputs, BaseOptions, Blueprint, BlueprintStr, CharClass, CodeKind,
    CustomCode, CustomFunctionInputs, FromBlueprintInputs, FunctionArgs, FunctionTag,
    RandomIdsInputs, RandomIdsOptions, RandomNumbersInputs, RandomNumbersOptions,
    RandomStringsInputs, RandomStringsOptions, RandomsFromArrayOptions, SavedBlueprint, ValueSpec,
    WordClass, blueprint_from_mirror, blueprint_to_mirror, from_mirror, to_mirror,
};

#[test]
fn defaults_round_trip_for_every_tag() {
    for tag in FunctionTag::ALL {
        let args = FunctionArgs::default_for(tag);
        let mirror = to_mirror(&args);
        let back = from_mirror(tag, &mirror).unwrap();
        assert_eq!(args, back, "tag {}", tag.wire_name());
    }
}

#[test]
fn number_arguments_survive_the_mirror() {
    let args = FunctionArgs::RandomNumbers {
        inputs: RandomNumbersInputs {
            starting: -12.5,
            ending: 99.25,
        },
        options: RandomNumbersOptions {
            only_integers: false,
            maximum_digits_after_point: 3,
            base: BaseOptions {
                unique: true,
                ..BaseOptions::default()
            },
        },
    };
    let mirror = to_mirror(&args);
    assert_eq!(mirror.inputs["starting"], "-12.5");
    assert_eq!(mirror.options["onlyIntegers"], "false");
    assert_eq!(from_mirror(FunctionTag::RandomNumbers, &mirror).unwrap(), args);
}

#[test]
fn array_items_are_rendered_without_outer_brackets() {
    let args = FunctionArgs::RandomsFromArray {
        inputs: ArrayInputs {
            array_of_items: vec![json!(1), json!("two"), json!({"n": 3})],
        },
        options: RandomsFromArrayOptions {
            keep_order: true,
            base: BaseOptions::default(),
        },
    };
    let mirror = to_mirror(&args);
    assert_eq!(mirror.inputs["arrayOfItems"], r#"1,"two",{"n":3}"#);
    assert_eq!(from_mirror(FunctionTag::RandomsFromArray, &mirror).unwrap(), args);
}

#[test]
fn separator_keeps_surrounding_quotes_in_the_mirror() {
    let args = FunctionArgs::RandomStrings {
        inputs: RandomStringsInputs {
            min_number_of_words: 2,
            max_number_of_words: 5,
        },
        options: RandomStringsOptions {
            lib: vec![WordClass::Name, WordClass::Country],
            separator: " - ".to_string(),
            base: BaseOptions::default(),
        },
    };
    let mirror = to_mirror(&args);
    assert_eq!(mirror.options["separator"], "\" - \"");
    assert_eq!(mirror.options["lib"], "name,country");
    assert_eq!(from_mirror(FunctionTag::RandomStrings, &mirror).unwrap(), args);
}

#[test]
fn custom_code_is_mirrored_as_bare_source() {
    let args = FunctionArgs::RandomCustomFunction {
        inputs: CustomFunctionInputs {
            custom_function: Some(CustomCode::new(CodeKind::Function, "indexOfElement * 2")),
        },
        options: BaseOptions {
            unique: true,
            custom_compare: Some(CustomCode::new(CodeKind::Compare, "element > 0")),
            ..BaseOptions::default()
        },
    };
    let mirror = to_mirror(&args);
    assert_eq!(mirror.inputs["customFunction"], "indexOfElement * 2");
    assert_eq!(mirror.options["customCompare"], "element > 0");
    assert_eq!(mirror.options["customMap"], "");
    assert_eq!(
        from_mirror(FunctionTag::RandomCustomFunction, &mirror).unwrap(),
        args
    );
}

#[test]
fn runtime_options_are_never_mirrored() {
    let mut args = FunctionArgs::default_for(FunctionTag::RandomIds);
    {
        let base = args.base_options_mut();
        base.number_of_items = Some(500);
        base.re_create_limit = Some(9);
        base.show_logs = true;
    }
    let mirror = to_mirror(&args);
    assert!(!mirror.options.contains_key("numberOfItems"));
    assert!(!mirror.options.contains_key("reCreateLimit"));
    assert!(!mirror.options.contains_key("showLogs"));

    let back = from_mirror(FunctionTag::RandomIds, &mirror).unwrap();
    let base = back.base_options();
    assert_eq!(base.number_of_items, None);
    assert_eq!(base.re_create_limit, None);
    assert!(!base.show_logs);
}

#[test]
fn saved_blueprint_is_embedded_as_json() {
    let inner = SavedBlueprint {
        title: "people".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        times_requested: 4,
        blueprint: BlueprintStr::default(),
    };
    let args = FunctionArgs::FromBlueprint {
        inputs: FromBlueprintInputs {
            blueprint: Some(inner.clone()),
            base_iteration: 250,
        },
        options: BaseOptions::default(),
    };
    let mirror = to_mirror(&args);
    assert!(mirror.inputs["blueprint"].contains("\"people\""));
    assert_eq!(mirror.inputs["baseIteration"], "250");
    assert_eq!(from_mirror(FunctionTag::FromBlueprint, &mirror).unwrap(), args);
}

#[test]
fn partially_filled_mirror_falls_back_to_defaults() {
    let mut mirror = ArgObjectStr::default();
    mirror.inputs.insert("minIDLength".to_string(), "3".to_string());
    let back = from_mirror(FunctionTag::RandomIds, &mirror).unwrap();
    match back {
        FunctionArgs::RandomIds { inputs, options } => {
            assert_eq!(inputs.min_id_length, 3);
            assert_eq!(inputs.max_id_length, 12);
            assert_eq!(
                options.char_lib,
                vec![CharClass::Number, CharClass::Letter, CharClass::Symbol]
            );
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn bad_numbers_are_reported_with_the_field_name() {
    let mut mirror = ArgObjectStr::default();
    mirror.inputs.insert("starting".to_string(), "abc".to_string());
    let err = from_mirror(FunctionTag::RandomNumbers, &mirror).unwrap_err();
    assert!(err.to_string().contains("starting"));
}

#[test]
fn whole_blueprints_round_trip() {
    let mut blueprint = Blueprint::new();
    blueprint.push(
        "id",
        ValueSpec::Function {
            call: FunctionArgs::RandomIds {
                inputs: RandomIdsInputs {
                    min_id_length: 4,
                    max_id_length: 4,
                },
                options: RandomIdsOptions {
                    char_lib: vec![CharClass::Number],
                    base: BaseOptions {
                        unique: true,
                        ..BaseOptions::default()
                    },
                },
            },
        },
    );
    blueprint.push(
        "kind",
        ValueSpec::Static {
            static_value: "person".to_string(),
        },
    );
    blueprint.push("pending", ValueSpec::Empty);

    let mirror = blueprint_to_mirror(&blueprint);
    let back = blueprint_from_mirror(&mirror).unwrap();
    assert_eq!(blueprint, back);
}
