//! Common test utilities and data generators.

use faer::Mat;
use neuropls::ConditionOrder;

/// Generate a condition-structured observation matrix with a real condition
/// effect plus noise: rows are stacked per group as `[cond 0; size], ..`.
pub fn generate_condition_data(
    group_sizes: &[usize],
    n_conditions: usize,
    n_features: usize,
    effect: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, ConditionOrder) {
    // Simple deterministic "random" for reproducibility
    let mut rng_state = seed;
    let mut next_rand = move || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    };

    let cond_order =
        ConditionOrder::generate(group_sizes, n_conditions).expect("valid layout");
    let n_rows = cond_order.total_rows();
    let mut x = Mat::zeros(n_rows, n_features);

    let mut row = 0;
    for &size in group_sizes {
        for cond in 0..n_conditions {
            for _ in 0..size {
                for j in 0..n_features {
                    // condition shifts a subset of features
                    let shift = if j % n_conditions == cond {
                        effect * (cond + 1) as f64
                    } else {
                        0.0
                    };
                    x[(row, j)] = shift + noise_std * next_rand();
                }
                row += 1;
            }
        }
    }

    (x, cond_order)
}

/// Approximate equality check for floating point values.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}
