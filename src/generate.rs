use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::Vector;
use log::debug;
use ndarray::{Array1, Axis, Zip};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Model inputs, in the order the fitter expects its coefficients.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "Age",
    "Income",
    "HealthScore",
    "DrivingHistory",
    "RiskScore",
];

/// Regression target.
pub const TARGET_COLUMN: &str = "Premium";

const BASE_PREMIUM: f64 = 200.0;
const PREMIUM_NOISE_STD: f64 = 100.0;

/// Composite risk score derived from the base columns.
///
/// Younger drivers, healthier policyholders, and clean driving records all
/// reduce the score.
pub fn risk_score(age: f64, health_score: f64, driving_history: f64) -> f64 {
    0.4 * (70.0 - age) + 0.3 * (10.0 - health_score) + 0.3 * (5.0 - driving_history)
}

/// Noise-free component of the premium for one policyholder.
pub fn expected_premium(income: f64, health_score: f64, driving_history: f64) -> f64 {
    BASE_PREMIUM + 0.05 * income + 50.0 * (10.0 - health_score) + 100.0 * driving_history
}

/// Generates a synthetic policyholder portfolio.
///
/// The same `(n_samples, seed)` pair always yields a bit-identical dataset:
/// a single `StdRng` is seeded once and columns are drawn in a fixed order
/// (Age, Income, HealthScore, DrivingHistory, premium noise).
///
/// Base columns are integers drawn uniformly from half-open ranges:
/// Age [18, 70), Income [20000, 150000), HealthScore [1, 10),
/// DrivingHistory [0, 5). `RiskScore` and `Premium` are derived row-wise;
/// the premium noise term is Normal(0, 100).
pub fn synthetic_portfolio(n_samples: usize, seed: u64) -> Result<Dataset> {
    if n_samples == 0 {
        return Err(Error::invalid_argument(
            "n_samples must be positive".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let age = draw_uniform_ints(n_samples, 18, 70, &mut rng);
    let income = draw_uniform_ints(n_samples, 20_000, 150_000, &mut rng);
    let health_score = draw_uniform_ints(n_samples, 1, 10, &mut rng);
    let driving_history = draw_uniform_ints(n_samples, 0, 5, &mut rng);

    let noise_dist =
        Normal::new(0.0, PREMIUM_NOISE_STD).expect("noise standard deviation is positive");
    let noise: Vector = Array1::random_using(n_samples, noise_dist, &mut rng);

    let risk: Vector = Zip::from(&age)
        .and(&health_score)
        .and(&driving_history)
        .map_collect(|&a, &h, &d| risk_score(a, h, d));

    let premium: Vector = Zip::from(&income)
        .and(&health_score)
        .and(&driving_history)
        .and(&noise)
        .map_collect(|&i, &h, &d, &e| expected_premium(i, h, d) + e);

    let data = ndarray::stack(
        Axis(1),
        &[
            age.view(),
            income.view(),
            health_score.view(),
            driving_history.view(),
            risk.view(),
            premium.view(),
        ],
    )
    .expect("generated columns have equal length");

    let columns = FEATURE_COLUMNS
        .iter()
        .chain([TARGET_COLUMN].iter())
        .map(|s| s.to_string())
        .collect();

    debug!("generated synthetic portfolio: {n_samples} rows (seed {seed})");

    Dataset::new(columns, data)
}

fn draw_uniform_ints(n: usize, low: i64, high: i64, rng: &mut StdRng) -> Vector {
    let raw: Array1<i64> = Array1::random_using(n, Uniform::new(low, high), rng);
    raw.mapv(|v| v as f64)
}
