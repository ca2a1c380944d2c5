use crate::error::{Error, Result};
use crate::preprocessing::StandardScaler;
use crate::solve::{CholeskySolver, NormalEquationsSolver, SpectralSolver};
use crate::{Matrix, Vector};
use log::debug;

/// Ordinary least-squares linear regression.
///
/// Fitting solves the normal equations on centered, standardized features
/// and maps the coefficients back to original units. The default backend is
/// a direct Cholesky solve; if the Gram matrix is not positive definite
/// (collinear features), the fit falls back to a spectral pseudo-inverse,
/// which yields the minimum-norm least-squares solution.
#[derive(Clone, Debug)]
pub struct LinearRegression {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    fit_intercept: bool,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
        }
    }

    pub fn with_intercept(fit_intercept: bool) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept,
        }
    }

    /// Fits with the default solver chain: Cholesky, then the spectral
    /// pseudo-inverse when the normal equations are singular.
    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        match self.fit_with_solver(x, y, &CholeskySolver) {
            Err(Error::Numerical { .. }) => {
                debug!("normal equations not positive definite, falling back to spectral solve");
                self.fit_with_solver(x, y, &SpectralSolver::default())
            }
            other => other,
        }
    }

    /// Fits with a caller-supplied normal-equations backend.
    pub fn fit_with_solver(
        &mut self,
        x: &Matrix,
        y: &Vector,
        solver: &dyn NormalEquationsSolver,
    ) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(Error::invalid_argument(format!(
                "number of samples in X ({}) and y ({}) must match",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() < 2 {
            return Err(Error::invalid_argument(
                "at least two samples are required to fit".to_string(),
            ));
        }
        if x.ncols() == 0 {
            return Err(Error::invalid_argument(
                "at least one feature is required to fit".to_string(),
            ));
        }

        let (coeffs, intercept) = if self.fit_intercept {
            self.solve_centered(x, y, solver)?
        } else {
            (self.solve_raw(x, y, solver)?, 0.0)
        };

        self.coefficients = Some(coeffs);
        self.intercept = Some(intercept);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self
            .coefficients
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("model not fitted, call fit() first"))?;
        let intercept = self.intercept.unwrap_or(0.0);

        if x.ncols() != coeffs.len() {
            return Err(Error::invalid_argument(format!(
                "number of features in X ({}) doesn't match training data ({})",
                x.ncols(),
                coeffs.len()
            )));
        }

        Ok(x.dot(coeffs) + intercept)
    }

    /// In-sample coefficient of determination.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }

    fn solve_centered(
        &self,
        x: &Matrix,
        y: &Vector,
        solver: &dyn NormalEquationsSolver,
    ) -> Result<(Vector, f64)> {
        let y_mean = y.mean().unwrap();
        let y_centered = y - y_mean;

        let mut scaler = StandardScaler::new();
        let xs = scaler.fit_transform(x)?;

        let gram = xs.t().dot(&xs);
        let rhs = xs.t().dot(&y_centered);
        let scaled_coeffs = solver.solve(&gram, &rhs)?;

        // Back to original units: w_j = ws_j / scale_j.
        let scale = scaler.scale().unwrap();
        let x_means = scaler.mean().unwrap();
        let coeffs = &scaled_coeffs / scale;
        let intercept = y_mean - coeffs.dot(x_means);

        Ok((coeffs, intercept))
    }

    fn solve_raw(
        &self,
        x: &Matrix,
        y: &Vector,
        solver: &dyn NormalEquationsSolver,
    ) -> Result<Vector> {
        let gram = x.t().dot(x);
        let rhs = x.t().dot(y);
        solver.solve(&gram, &rhs)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}
