use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Column-wise standardization: `(x - mean) / scale`.
///
/// `scale` is the population standard deviation, except that zero-variance
/// columns keep a scale of 1.0 so constant features pass through centered
/// instead of dividing by zero.
pub struct StandardScaler {
    mean: Option<Vector>,
    scale: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            scale: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or_else(|| Error::invalid_argument("cannot standardize an empty matrix"))?;
        let std = data.std_axis(ndarray::Axis(0), 0.0);
        let scale = std.mapv(|s| if s > 0.0 { s } else { 1.0 });

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("scaler not fitted, call fit() first"))?;
        let scale = self
            .scale
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("scaler not fitted, call fit() first"))?;

        if data.ncols() != mean.len() {
            return Err(Error::invalid_argument(format!(
                "number of features ({}) doesn't match fitted data ({})",
                data.ncols(),
                mean.len()
            )));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= scale;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    pub fn scale(&self) -> Option<&Vector> {
        self.scale.as_ref()
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());

        // Columns come out zero-mean, unit-variance.
        let col_mean = scaled.mean_axis(ndarray::Axis(0)).unwrap();
        let col_std = scaled.std_axis(ndarray::Axis(0), 0.0);
        for j in 0..2 {
            assert!(col_mean[j].abs() < 1e-12);
            assert!((col_std[j] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_column_keeps_unit_scale() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&data).unwrap();

        // Constant column is centered, not divided by zero.
        for i in 0..3 {
            assert_eq!(scaled[(i, 0)], 0.0);
        }
        assert_eq!(scaler.scale().unwrap()[0], 1.0);
    }

    #[test]
    fn test_transform_before_fit() {
        let data = array![[1.0], [2.0]];
        let scaler = StandardScaler::new();
        assert!(scaler.transform(&data).is_err());
    }
}
