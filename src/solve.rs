use crate::error::{Error, Result};
use crate::{Matrix, Vector};

/// Solves the normal equations `G w = r` where `G = XᵀX` is symmetric.
///
/// Implementations are interchangeable numerical backends; the fit contract
/// in [`crate::linear_model`] does not change when one is swapped for
/// another.
pub trait NormalEquationsSolver {
    fn solve(&self, gram: &Matrix, rhs: &Vector) -> Result<Vector>;
}

fn validate_system(gram: &Matrix, rhs: &Vector) -> Result<()> {
    if gram.nrows() != gram.ncols() {
        return Err(Error::invalid_argument(format!(
            "Gram matrix must be square, got {}x{}",
            gram.nrows(),
            gram.ncols()
        )));
    }
    if gram.nrows() != rhs.len() {
        return Err(Error::invalid_argument(format!(
            "Gram matrix size ({}) must match right-hand side length ({})",
            gram.nrows(),
            rhs.len()
        )));
    }
    Ok(())
}

/// Direct Cholesky solve. Requires the Gram matrix to be symmetric positive
/// definite; fails with a numerical error otherwise.
pub struct CholeskySolver;

impl NormalEquationsSolver for CholeskySolver {
    fn solve(&self, gram: &Matrix, rhs: &Vector) -> Result<Vector> {
        validate_system(gram, rhs)?;

        let n = gram.nrows();
        let max_diag = gram.diag().iter().fold(0.0f64, |m, &d| m.max(d.abs()));
        let tol = 1e-12 * max_diag.max(1.0);

        // Decompose G = L Lᵀ, lower triangle only.
        let mut l = Matrix::zeros((n, n));
        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                if i == j {
                    for k in 0..j {
                        sum += l[(j, k)] * l[(j, k)];
                    }
                    let diag = gram[(j, j)] - sum;
                    if diag <= tol {
                        return Err(Error::numerical(
                            "Gram matrix is not positive definite".to_string(),
                        ));
                    }
                    l[(j, j)] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += l[(i, k)] * l[(j, k)];
                    }
                    l[(i, j)] = (gram[(i, j)] - sum) / l[(j, j)];
                }
            }
        }

        // Forward substitution: L y = r
        let mut y = Vector::zeros(n);
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += l[(i, j)] * y[j];
            }
            y[i] = (rhs[i] - sum) / l[(i, i)];
        }

        // Backward substitution: Lᵀ w = y
        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += l[(j, i)] * x[j];
            }
            x[i] = (y[i] - sum) / l[(i, i)];
        }

        Ok(x)
    }
}

/// Pseudo-inverse solve through a symmetric Jacobi eigendecomposition.
///
/// Eigenvalues below `rcond * |lambda_max|` are treated as zero, so a
/// rank-deficient system yields the minimum-norm least-squares solution
/// instead of failing.
pub struct SpectralSolver {
    rcond: f64,
}

impl SpectralSolver {
    pub fn new(rcond: f64) -> Self {
        Self { rcond }
    }
}

impl Default for SpectralSolver {
    fn default() -> Self {
        Self { rcond: 1e-9 }
    }
}

impl NormalEquationsSolver for SpectralSolver {
    fn solve(&self, gram: &Matrix, rhs: &Vector) -> Result<Vector> {
        validate_system(gram, rhs)?;

        let n = gram.nrows();
        let (eigenvalues, eigenvectors) = jacobi_eigen(gram)?;

        let lambda_max = eigenvalues.iter().fold(0.0f64, |m, &l| m.max(l.abs()));
        if lambda_max == 0.0 {
            // Zero matrix: minimum-norm solution of 0 w = r is the zero vector.
            return Ok(Vector::zeros(n));
        }
        let cutoff = self.rcond * lambda_max;

        let mut x = Vector::zeros(n);
        for k in 0..n {
            let lambda = eigenvalues[k];
            if lambda.abs() <= cutoff {
                continue;
            }
            let v = eigenvectors.column(k);
            let coeff = v.dot(rhs) / lambda;
            x.scaled_add(coeff, &v);
        }

        Ok(x)
    }
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvectors as columns, so
/// `A = V diag(lambda) Vᵀ`. Unsorted.
fn jacobi_eigen(matrix: &Matrix) -> Result<(Vector, Matrix)> {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let mut v = Matrix::eye(n);

    let initial_off = off_diagonal_norm(&a);
    let target = 1e-14 * initial_off.max(1.0);
    let max_sweeps = 64;

    for _ in 0..max_sweeps {
        if off_diagonal_norm(&a) <= target {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[(p, q)];
                if apq.abs() <= f64::MIN_POSITIVE {
                    continue;
                }

                let theta = (a[(q, q)] - a[(p, p)]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- Jᵀ A J, rotating the (p, q) plane.
                for k in 0..n {
                    let akp = a[(k, p)];
                    let akq = a[(k, q)];
                    a[(k, p)] = c * akp - s * akq;
                    a[(k, q)] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[(p, k)];
                    let aqk = a[(q, k)];
                    a[(p, k)] = c * apk - s * aqk;
                    a[(q, k)] = s * apk + c * aqk;
                }

                // V <- V J accumulates the eigenvectors.
                for k in 0..n {
                    let vkp = v[(k, p)];
                    let vkq = v[(k, q)];
                    v[(k, p)] = c * vkp - s * vkq;
                    v[(k, q)] = s * vkp + c * vkq;
                }
            }
        }
    }

    if off_diagonal_norm(&a) > target {
        return Err(Error::numerical(
            "Jacobi eigendecomposition did not converge".to_string(),
        ));
    }

    Ok((a.diag().to_owned(), v))
}

fn off_diagonal_norm(a: &Matrix) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[(i, j)] * a[(i, j)];
            }
        }
    }
    sum.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cholesky_solves_spd_system() {
        let gram = array![[4.0, 2.0], [2.0, 3.0]];
        let rhs = array![2.0, 5.0];

        let x = CholeskySolver.solve(&gram, &rhs).unwrap();
        let residual = gram.dot(&x) - &rhs;
        for r in residual.iter() {
            assert!(r.abs() < 1e-10);
        }
    }

    #[test]
    fn test_cholesky_rejects_singular_system() {
        let gram = array![[1.0, 1.0], [1.0, 1.0]];
        let rhs = array![2.0, 2.0];

        let result = CholeskySolver.solve(&gram, &rhs);
        assert!(matches!(result, Err(Error::Numerical { .. })));
    }

    #[test]
    fn test_spectral_agrees_with_cholesky_on_spd() {
        let gram = array![[6.0, 2.0, 1.0], [2.0, 5.0, 2.0], [1.0, 2.0, 4.0]];
        let rhs = array![1.0, -2.0, 3.0];

        let direct = CholeskySolver.solve(&gram, &rhs).unwrap();
        let spectral = SpectralSolver::default().solve(&gram, &rhs).unwrap();

        for (a, b) in direct.iter().zip(spectral.iter()) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn test_spectral_returns_minimum_norm_on_singular() {
        let gram = array![[1.0, 1.0], [1.0, 1.0]];
        let rhs = array![2.0, 2.0];

        let x = SpectralSolver::default().solve(&gram, &rhs).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-10);
        assert!((x[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let gram = array![[1.0, 0.0], [0.0, 1.0]];
        let rhs = array![1.0, 2.0, 3.0];
        assert!(CholeskySolver.solve(&gram, &rhs).is_err());

        let non_square = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let rhs2 = array![1.0, 2.0];
        assert!(SpectralSolver::default().solve(&non_square, &rhs2).is_err());
    }

    #[test]
    fn test_jacobi_recovers_known_eigenvalues() {
        // Eigenvalues of [[2, 1], [1, 2]] are 1 and 3.
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let (eigenvalues, eigenvectors) = jacobi_eigen(&a).unwrap();

        let mut sorted: Vec<f64> = eigenvalues.to_vec();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((sorted[0] - 1.0).abs() < 1e-10);
        assert!((sorted[1] - 3.0).abs() < 1e-10);

        // Reconstruction: A = V diag(lambda) Vᵀ.
        let lambda = Matrix::from_diag(&eigenvalues);
        let reconstructed = eigenvectors.dot(&lambda).dot(&eigenvectors.t());
        for (x, y) in reconstructed.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-10);
        }
    }
}
