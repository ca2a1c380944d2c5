use crate::Vector;
use crate::error::{Error, Result};

fn validate_pair(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::invalid_argument(
            "y_true and y_pred must have the same length".to_string(),
        ));
    }
    if y_true.is_empty() {
        return Err(Error::invalid_argument(
            "metrics are undefined for empty inputs".to_string(),
        ));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    validate_pair(y_true, y_pred)?;

    let diff = y_true - y_pred;
    let mse = diff.mapv(|x| x * x).mean().unwrap();
    Ok(mse)
}

/// Typical residual magnitude, in target units.
pub fn root_mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    validate_pair(y_true, y_pred)?;

    let diff = y_true - y_pred;
    let mae = diff.mapv(|x| x.abs()).mean().unwrap();
    Ok(mae)
}

/// Coefficient of determination, `1 - ss_res / ss_tot`.
///
/// At most 1.0, unbounded below. A zero-variance target scores 1.0 by
/// convention.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    validate_pair(y_true, y_pred)?;

    let y_mean = y_true.mean().unwrap();
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(1.0);
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 3.0];

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert!((mse - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_root_mean_squared_error() {
        let y_true = array![0.0, 0.0, 0.0, 0.0];
        let y_pred = array![2.0, -2.0, 2.0, -2.0];

        let rmse = root_mean_squared_error(&y_true, &y_pred).unwrap();
        assert!((rmse - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_rmse_non_negative() {
        let y_true = array![3.0, -1.0, 7.5];
        let y_pred = array![-2.0, 4.0, 0.5];

        let rmse = root_mean_squared_error(&y_true, &y_pred).unwrap();
        assert!(rmse >= 0.0);
    }

    #[test]
    fn test_mean_absolute_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 2.0];

        let mae = mean_absolute_error(&y_true, &y_pred).unwrap();
        assert!((mae - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_r2_score_perfect_fit() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.0, 2.0, 3.0, 4.0];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert!((r2 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_r2_score_never_exceeds_one() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![4.0, 1.0, 5.0, 0.0];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert!(r2 <= 1.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0, 2.0, 3.0];
        assert!(mean_squared_error(&y_true, &y_pred).is_err());
        assert!(r2_score(&y_true, &y_pred).is_err());
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let empty = Vector::zeros(0);
        assert!(mean_squared_error(&empty, &empty).is_err());
    }
}
