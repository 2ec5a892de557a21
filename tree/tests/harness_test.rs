mod common;

use sprout_engine::harness::{self, progression, Harness};
use sprout_engine::{Number, Squares, TreeParams};
use sprout_tree::{compare, Strategy, MAX_RECURSIVE_HEIGHT};

#[test]
fn test_run_keeps_size_order_and_minimum() {
    common::init_test_setup();
    for strategy in Strategy::ALL {
        let builder = strategy.builder();
        let samples = harness::run(
            |height| builder.build(&TreeParams::default().with_height(height), &Squares),
            &[2, 4, 6, 8],
            5,
        )
        .unwrap();

        let sizes: Vec<u32> = samples.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![2, 4, 6, 8], "{}", strategy.name());
        for sample in &samples {
            assert_eq!(sample.trials.len(), 5);
            assert!(sample.trials.iter().all(|&t| sample.elapsed <= t));
            assert!(sample.trials.contains(&sample.elapsed));
        }
    }
}

#[test]
fn test_run_rejects_zero_repeats() {
    let builder = Strategy::Iterative.builder();
    let err = harness::run(
        |height| builder.build(&TreeParams::default().with_height(height), &Squares),
        &[2],
        0,
    )
    .unwrap_err();
    assert_eq!(err.argument(), "repeats");
}

#[test]
fn test_builder_error_aborts_comparison() {
    let harness = Harness::new(1).unwrap();
    let sizes = [2, MAX_RECURSIVE_HEIGHT + 1];
    let err = compare(&[Strategy::Recursive], Number::Int(1), &Squares, &sizes, &harness).unwrap_err();
    assert_eq!(err.argument(), "height");
}

#[test]
fn test_compare_default_progression() {
    common::init_test_setup();
    let sizes = progression(2, 12, 2).unwrap();
    let harness = Harness::new(3).unwrap().with_warmup(1);
    let cmp = compare(&Strategy::ALL, Number::Int(11), &Squares, &sizes, &harness).unwrap();

    assert_eq!(cmp.builders(), vec!["iterative", "recursive", "explicit-stack"]);
    for series in &cmp.series {
        assert_eq!(series.sizes().collect::<Vec<_>>(), sizes);
    }
    for size in &sizes {
        assert!(cmp.fastest_at(*size).is_some());
    }
}
