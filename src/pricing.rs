use crate::Vector;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::generate::{FEATURE_COLUMNS, TARGET_COLUMN};
use crate::linear_model::LinearRegression;
use crate::metrics;
use log::info;

/// Everything the presentation layer needs from one fit: the fitted
/// parameters aligned to `feature_names`, per-row predictions, and the
/// in-sample fit metrics.
#[derive(Clone, Debug)]
pub struct PricingReport {
    pub feature_names: Vec<String>,
    pub coefficients: Vector,
    pub intercept: f64,
    pub predictions: Vector,
    pub r_squared: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl PricingReport {
    /// Fitted coefficient for a feature, by name.
    pub fn coefficient(&self, feature: &str) -> Option<f64> {
        self.feature_names
            .iter()
            .position(|name| name == feature)
            .map(|idx| self.coefficients[idx])
    }
}

/// Fits an OLS model of `target_name` on `feature_names` and evaluates it
/// in-sample. Either the whole pipeline succeeds and yields a complete
/// report, or it fails and no partial model is exposed.
pub fn fit_and_evaluate(
    dataset: &Dataset,
    feature_names: &[&str],
    target_name: &str,
) -> Result<PricingReport> {
    if dataset.n_samples() == 0 {
        return Err(Error::invalid_argument("dataset is empty".to_string()));
    }
    if feature_names.is_empty() {
        return Err(Error::invalid_argument(
            "at least one feature column is required".to_string(),
        ));
    }

    let x = dataset.select(feature_names)?;
    let y = dataset.column_owned(target_name)?;

    let mut model = LinearRegression::new();
    model.fit(&x, &y)?;
    let predictions = model.predict(&x)?;

    let r_squared = metrics::r2_score(&y, &predictions)?;
    let rmse = metrics::root_mean_squared_error(&y, &predictions)?;
    let mae = metrics::mean_absolute_error(&y, &predictions)?;

    info!(
        "fit {target_name} on {} rows x {} features: R^2 {r_squared:.3}, RMSE {rmse:.2}",
        dataset.n_samples(),
        feature_names.len()
    );

    let coefficients = model.coefficients.take().unwrap();
    let intercept = model.intercept.unwrap_or(0.0);

    Ok(PricingReport {
        feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
        coefficients,
        intercept,
        predictions,
        r_squared,
        rmse,
        mae,
    })
}

/// Fits the canonical premium model: `Premium` on all five feature columns.
pub fn fit_premium_model(dataset: &Dataset) -> Result<PricingReport> {
    fit_and_evaluate(dataset, &FEATURE_COLUMNS, TARGET_COLUMN)
}
