pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod generate;
pub mod linear_model;
pub mod metrics;
pub mod preprocessing;
pub mod pricing;
pub mod solve;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use generate::{FEATURE_COLUMNS, TARGET_COLUMN, synthetic_portfolio};
pub use linear_model::LinearRegression;
pub use preprocessing::StandardScaler;
pub use pricing::{PricingReport, fit_and_evaluate, fit_premium_model};
pub use solve::{CholeskySolver, NormalEquationsSolver, SpectralSolver};
