//! Permutation engine tests.

mod common;

use faer::Mat;
use neuropls::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reference_for(x: &Mat<f64>, cond_order: &ConditionOrder) -> Decomposition {
    let processed = MeanCenter
        .apply(x, None, cond_order)
        .expect("preprocess should succeed");
    decompose(&processed).expect("decomposition should succeed")
}

// ============================================================================
// Two-group layout: 12x4 matrix, 2 groups of 6 rows, 3 conditions of 2 rows
// ============================================================================

#[test]
fn test_two_group_scenario() {
    let (x, cond_order) = common::generate_condition_data(&[2, 2], 3, 4, 1.0, 0.3, 101);
    assert_eq!(x.nrows(), 12);
    assert_eq!(x.ncols(), 4);

    let reference = reference_for(&x, &cond_order);
    let mut rng = StdRng::seed_from_u64(1);

    let result = permutation_test(
        &x,
        None,
        &reference,
        &cond_order,
        10,
        &MeanCenter,
        RotationMethod::Unrotated,
        &mut rng,
    )
    .expect("permutation test should run");

    assert_eq!(result.ratio.nrows(), 4);
    for j in 0..result.ratio.nrows() {
        assert!(result.ratio[j] >= 0.0);
        assert!(result.ratio[j] <= 1.0);
    }
}

#[test]
fn test_single_iteration_ratio_is_binary() {
    let (x, cond_order) = common::generate_condition_data(&[3], 2, 5, 0.8, 0.4, 102);
    let reference = reference_for(&x, &cond_order);
    let mut rng = StdRng::seed_from_u64(2);

    let result = permutation_test(
        &x,
        None,
        &reference,
        &cond_order,
        1,
        &MeanCenter,
        RotationMethod::Unrotated,
        &mut rng,
    )
    .unwrap();

    for j in 0..result.ratio.nrows() {
        assert!(result.ratio[j] == 0.0 || result.ratio[j] == 1.0);
    }
}

#[test]
fn test_all_rotation_methods_agree_on_shape() {
    let (x, cond_order) = common::generate_condition_data(&[2, 2], 3, 4, 0.9, 0.3, 103);
    let reference = reference_for(&x, &cond_order);

    for rotation in [
        RotationMethod::Unrotated,
        RotationMethod::Procrustes,
        RotationMethod::Derived,
    ] {
        let mut rng = StdRng::seed_from_u64(3);
        let result = permutation_test(
            &x,
            None,
            &reference,
            &cond_order,
            5,
            &MeanCenter,
            rotation,
            &mut rng,
        )
        .unwrap_or_else(|e| panic!("rotation {rotation:?} failed: {e}"));

        assert_eq!(result.ratio.nrows(), reference.s.nrows());
        for j in 0..result.ratio.nrows() {
            assert!((0.0..=1.0).contains(&result.ratio[j]));
        }
    }
}

#[test]
fn test_unsupported_rotation_code_fails_fast() {
    let err = RotationMethod::from_code(3).unwrap_err();
    assert!(matches!(err, PlsError::UnimplementedRotation(3)));
    // the error fires before any engine is constructed, so no partial
    // accumulator state can exist
}

#[test]
fn test_seeded_determinism() {
    let (x, cond_order) = common::generate_condition_data(&[2, 2], 3, 4, 1.1, 0.2, 104);
    let reference = reference_for(&x, &cond_order);

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        permutation_test(
            &x,
            None,
            &reference,
            &cond_order,
            20,
            &MeanCenter,
            RotationMethod::Unrotated,
            &mut rng,
        )
        .unwrap()
    };

    let a = run(77);
    let b = run(77);
    let c = run(78);

    for j in 0..a.ratio.nrows() {
        assert_eq!(a.ratio[j], b.ratio[j]);
    }
    // a different seed is allowed to differ; just confirm both are valid
    for j in 0..c.ratio.nrows() {
        assert!((0.0..=1.0).contains(&c.ratio[j]));
    }
}

#[test]
fn test_strong_effect_yields_low_ratio_for_first_component() {
    // A single strong condition contrast concentrates the reference
    // spectrum on one component; permuted data should rarely match it.
    let cond_order = ConditionOrder::generate(&[6], 3).unwrap();
    let x = Mat::from_fn(18, 8, |i, j| {
        let cond = i / 6;
        let profile = ((j + 1) as f64).sqrt();
        4.0 * (cond as f64 + 1.0) * profile + 0.05 * ((i * 8 + j) as f64 * 0.91).sin()
    });
    let reference = reference_for(&x, &cond_order);
    let mut rng = StdRng::seed_from_u64(4);

    let result = permutation_test(
        &x,
        None,
        &reference,
        &cond_order,
        50,
        &MeanCenter,
        RotationMethod::Unrotated,
        &mut rng,
    )
    .unwrap();

    assert!(result.ratio[0] < 0.5);
}

#[test]
fn test_mismatched_condition_order_rejected() {
    let (x, _) = common::generate_condition_data(&[2, 2], 3, 4, 1.0, 0.3, 106);
    let wrong_order = ConditionOrder::generate(&[2], 3).unwrap();
    let reference = reference_for(
        &x,
        &ConditionOrder::generate(&[2, 2], 3).unwrap(),
    );
    let mut rng = StdRng::seed_from_u64(5);

    let result = permutation_test(
        &x,
        None,
        &reference,
        &wrong_order,
        5,
        &MeanCenter,
        RotationMethod::Unrotated,
        &mut rng,
    );
    assert!(matches!(result, Err(PlsError::RowCountMismatch { .. })));
}
