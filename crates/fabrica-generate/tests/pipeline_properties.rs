use std::collections::HashSet;

use fabrica_generate::{
    GenerateOptions, GenerationEngine, NullSink, ProgressEvent,
};

use fabrica_core::{
    ArrayInputs, BaseOptions, FunctionArgs, GradualValueInputs, GradualValueOptions,
    RandomNumbersInputs, RandomNumbersOptions, RandomsFromArrayOptions,
};
use serde_json::json;

fn seeded(seed: u64) -> GenerationEngine {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    GenerationEngine::new(GenerateOptions {
        seed: Some(seed),
        ..GenerateOptions::default()
    })
}

fn int_range(starting: f64, ending: f64, base: BaseOptions) -> FunctionArgs {
    FunctionArgs::RandomNumbers {
        inputs: RandomNumbersInputs { starting, ending },
        options: RandomNumbersOptions {
            only_integers: true,
            maximum_digits_after_point: 15,
            base,
        },
    }
}

#[test]
fn same_seed_same_output() {
    let args = int_range(0.0, 1_000_000.0, BaseOptions::default());
    let a = seeded(7).run_value(&args, 50, &mut NullSink).unwrap();
    let b = seeded(7).run_value(&args, 50, &mut NullSink).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unique_produces_distinct_values_when_space_allows() {
    let args = int_range(
        0.0,
        9.0,
        BaseOptions {
            unique: true,
            ..BaseOptions::default()
        },
    );
    let out = seeded(3).run_value(&args, 10, &mut NullSink).unwrap();
    let distinct: HashSet<String> = out.iter().map(|v| v.to_string()).collect();
    assert_eq!(out.len(), 10);
    assert_eq!(distinct.len(), 10);
}

#[test]
fn exhausted_retry_budget_accepts_and_reports() {
    let args = int_range(
        0.0,
        2.0,
        BaseOptions {
            unique: true,
            re_create_limit: Some(5),
            ..BaseOptions::default()
        },
    );
    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    let out = seeded(11).run_value(&args, 6, &mut sink).unwrap();

    // Only three distinct values exist; the job still yields six items.
    assert_eq!(out.len(), 6);
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::RetryLimitReached { .. })));
}

#[test]
fn compared_fires_for_every_candidate() {
    let args = int_range(0.0, 100.0, BaseOptions::default());
    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    seeded(5).run_value(&args, 8, &mut sink).unwrap();

    let compared = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::Compared { .. }))
        .count();
    let created = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ItemCreated { .. }))
        .count();
    assert_eq!(compared, created);
    assert_eq!(compared, 8);
}

#[test]
fn accepted_compares_count_one_per_slot() {
    let args = int_range(
        0.0,
        4.0,
        BaseOptions {
            unique: true,
            ..BaseOptions::default()
        },
    );
    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    seeded(9).run_value(&args, 5, &mut sink).unwrap();

    let accepted = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::Compared { accepted: true, .. }))
        .count();
    assert_eq!(accepted, 5);
}

#[test]
fn events_within_a_slot_run_create_then_map_then_compare() {
    use fabrica_core::{CodeKind, CustomCode};

    let args = int_range(
        0.0,
        1000.0,
        BaseOptions {
            custom_map: Some(CustomCode::new(CodeKind::Map, "element + 1")),
            custom_compare: Some(CustomCode::new(CodeKind::Compare, "element > 0")),
            ..BaseOptions::default()
        },
    );
    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    seeded(13).run_value(&args, 6, &mut sink).unwrap();

    for chunk in events.chunks(3) {
        assert!(matches!(chunk[0], ProgressEvent::ItemCreated { .. }));
        assert!(matches!(chunk[1], ProgressEvent::Mapped { .. }));
        assert!(matches!(chunk[2], ProgressEvent::Compared { .. }));
    }
}

#[test]
fn gradual_values_step_from_the_start() {
    let args = FunctionArgs::GradualValue {
        inputs: GradualValueInputs { starting: 5.0 },
        options: GradualValueOptions {
            increment_value: 2.0,
            base: BaseOptions::default(),
        },
    };
    let out = seeded(1).run_value(&args, 4, &mut NullSink).unwrap();
    assert_eq!(out, vec![json!(5), json!(7), json!(9), json!(11)]);
}

#[test]
fn keep_order_cycles_the_source_array() {
    let args = FunctionArgs::RandomsFromArray {
        inputs: ArrayInputs {
            array_of_items: vec![json!("a"), json!("b"), json!("c")],
        },
        options: RandomsFromArrayOptions {
            keep_order: true,
            base: BaseOptions::default(),
        },
    };
    let out = seeded(2).run_value(&args, 5, &mut NullSink).unwrap();
    assert_eq!(
        out,
        vec![json!("a"), json!("b"), json!("c"), json!("a"), json!("b")]
    );
}

#[test]
fn engine_wide_retry_limit_applies_when_the_call_sets_none() {
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(11),
        default_re_create_limit: Some(5),
        ..GenerateOptions::default()
    });
    // Only three distinct values exist; without the engine-wide budget
    // this job would retry forever.
    let args = int_range(
        0.0,
        2.0,
        BaseOptions {
            unique: true,
            ..BaseOptions::default()
        },
    );
    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    let out = engine.run_value(&args, 6, &mut sink).unwrap();
    assert_eq!(out.len(), 6);
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::RetryLimitReached { .. })));
}

#[test]
fn email_is_the_only_specific_registry_entry() {
    use fabrica_core::FunctionTag;
    use fabrica_generate::{Category, all_entries, entry};

    let specific: Vec<FunctionTag> = all_entries()
        .filter(|e| e.category == Category::Specific)
        .map(|e| e.tag)
        .collect();
    assert_eq!(specific, vec![FunctionTag::RandomEmail]);
    assert_eq!(
        entry(FunctionTag::FromBlueprint).category,
        Category::Fundamental
    );
    assert_eq!(
        entry(FunctionTag::RandomArrays).category,
        Category::Fundamental
    );
}

#[test]
fn empty_source_array_is_rejected() {
    let args = FunctionArgs::RandomsFromArray {
        inputs: ArrayInputs {
            array_of_items: Vec::new(),
        },
        options: RandomsFromArrayOptions {
            keep_order: false,
            base: BaseOptions::default(),
        },
    };
    let err = seeded(2).run_value(&args, 5, &mut NullSink).unwrap_err();
    assert!(matches!(err, fabrica_generate::GenerateError::InvalidArgs(_)));
}
