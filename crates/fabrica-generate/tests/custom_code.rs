use serde_json::json;

use fabrica_core::{
    BaseOptions, CodeKind, CustomCode, CustomFunctionInputs, FunctionArgs, GradualValueInputs,
    GradualValueOptions,
};
use fabrica_generate::{
    CodeRuntime, GenerateError, GenerateOptions, GenerationEngine, NullSink,
};

fn seeded(seed: u64) -> GenerationEngine {
    GenerationEngine::new(GenerateOptions {
        seed: Some(seed),
        ..GenerateOptions::default()
    })
}

fn custom_function(source: &str, base: BaseOptions) -> FunctionArgs {
    FunctionArgs::RandomCustomFunction {
        inputs: CustomFunctionInputs {
            custom_function: Some(CustomCode::new(CodeKind::Function, source)),
        },
        options: base,
    }
}

fn gradual(base: BaseOptions) -> FunctionArgs {
    FunctionArgs::GradualValue {
        inputs: GradualValueInputs { starting: 0.0 },
        options: GradualValueOptions {
            increment_value: 1.0,
            base,
        },
    }
}

#[test]
fn function_code_receives_the_slot_index() {
    let args = custom_function("indexOfElement * 2", BaseOptions::default());
    let out = seeded(1).run_value(&args, 4, &mut NullSink).unwrap();
    assert_eq!(out, vec![json!(0), json!(2), json!(4), json!(6)]);
}

#[test]
fn unparsable_code_is_a_compile_error() {
    let result = CodeRuntime.compile(&CustomCode::new(CodeKind::Function, "(1 + 2"));
    assert!(matches!(
        result,
        Err(GenerateError::Compile { role: "customFunction", .. })
    ));
}

#[test]
fn operator_arity_problems_only_show_up_at_run_time() {
    // "1 +* 2" parses; the missing operand is caught on evaluation.
    let compiled = CodeRuntime.compile(&CustomCode::new(CodeKind::Function, "1 +* 2"));
    assert!(compiled.is_ok());

    let args = custom_function("1 +* 2", BaseOptions::default());
    let err = seeded(1).run_value(&args, 1, &mut NullSink).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Eval { role: "customFunction", index: 0, .. }
    ));
}

#[test]
fn missing_function_source_is_rejected() {
    let args = FunctionArgs::RandomCustomFunction {
        inputs: CustomFunctionInputs {
            custom_function: None,
        },
        options: BaseOptions::default(),
    };
    let err = seeded(1).run_value(&args, 3, &mut NullSink).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidArgs(_)));
}

#[test]
fn map_transforms_every_accepted_item() {
    let args = gradual(BaseOptions {
        custom_map: Some(CustomCode::new(CodeKind::Map, "element * 10")),
        ..BaseOptions::default()
    });
    let out = seeded(1).run_value(&args, 3, &mut NullSink).unwrap();
    assert_eq!(out, vec![json!(0), json!(10), json!(20)]);
}

#[test]
fn empty_map_result_is_an_error() {
    let args = gradual(BaseOptions {
        custom_map: Some(CustomCode::new(CodeKind::Map, "()")),
        ..BaseOptions::default()
    });
    let err = seeded(1).run_value(&args, 3, &mut NullSink).unwrap_err();
    assert!(matches!(err, GenerateError::UndefinedMap { index: 0 }));
}

#[test]
fn compare_overrides_the_uniqueness_check() {
    // Every candidate is identical; the compare keeps them all anyway.
    let args = custom_function(
        "42",
        BaseOptions {
            unique: true,
            custom_compare: Some(CustomCode::new(CodeKind::Compare, "element == 42")),
            ..BaseOptions::default()
        },
    );
    let out = seeded(1).run_value(&args, 5, &mut NullSink).unwrap();
    assert_eq!(out, vec![json!(42); 5]);
}

#[test]
fn compare_sees_previously_accepted_items() {
    let args = gradual(BaseOptions {
        custom_compare: Some(CustomCode::new(CodeKind::Compare, "len(createdElements) < 10")),
        ..BaseOptions::default()
    });
    let out = seeded(1).run_value(&args, 3, &mut NullSink).unwrap();
    assert_eq!(out.len(), 3);
}

#[test]
fn non_boolean_compare_is_an_error() {
    let args = gradual(BaseOptions {
        custom_compare: Some(CustomCode::new(CodeKind::Compare, "element + 1")),
        ..BaseOptions::default()
    });
    let err = seeded(1).run_value(&args, 3, &mut NullSink).unwrap_err();
    assert!(matches!(err, GenerateError::NonBooleanCompare { index: 0 }));
}

#[test]
fn non_finite_results_cannot_be_serialized() {
    let args = custom_function("1.0 / 0.0", BaseOptions::default());
    let err = seeded(1).run_value(&args, 1, &mut NullSink).unwrap_err();
    assert!(matches!(err, GenerateError::NonSerializable(_)));
}

#[test]
fn runtime_failures_carry_the_role_and_index() {
    let args = custom_function("unknownVariable + 1", BaseOptions::default());
    let err = seeded(1).run_value(&args, 2, &mut NullSink).unwrap_err();
    match err {
        GenerateError::Eval { role, index, .. } => {
            assert_eq!(role, "customFunction");
            assert_eq!(index, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}
