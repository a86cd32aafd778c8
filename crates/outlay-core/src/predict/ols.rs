//! Ordinary least squares polynomial fitting.
//!
//! Fits `y = c0 + c1*x + ... + cd*x^d` by solving the normal equations
//! with a Cholesky decomposition. Series here are a few dozen points at
//! most, so the normal equations are well within double precision.

use crate::error::{Error, Result};

/// Relative tolerance for treating a residual sum of squares as zero
const ZERO_TOLERANCE: f64 = 1e-9;

/// Fitted polynomial coefficients, lowest power first
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub coefficients: Vec<f64>,
}

impl PolynomialFit {
    /// Least-squares fit of the given degree
    pub fn fit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::DegenerateFit(format!(
                "length mismatch: {} x values, {} y values",
                xs.len(),
                ys.len()
            )));
        }

        let num_params = degree + 1;
        if xs.len() < num_params {
            return Err(Error::DegenerateFit(format!(
                "degree {} needs at least {} points, got {}",
                degree,
                num_params,
                xs.len()
            )));
        }

        let coefficients = NormalEquations::accumulate(xs, ys, num_params)
            .solve()
            .ok_or_else(|| {
                Error::DegenerateFit("normal equations are not positive definite".into())
            })?;

        Ok(Self { coefficients })
    }

    /// Evaluate the polynomial at `x` (Horner's method)
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Coefficient of determination on the given observations.
    ///
    /// Observations that are all equal have no variance to explain: R² is
    /// 1.0 when the fit reproduces them and 0.0 otherwise.
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> f64 {
        let Some(&first) = ys.first() else {
            return 0.0;
        };

        let ss_res: f64 = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (y - self.evaluate(x)).powi(2))
            .sum();

        if ys.iter().all(|&y| y == first) {
            let scale = 1.0 + ys.iter().map(|y| y * y).sum::<f64>();
            return if ss_res <= ZERO_TOLERANCE * scale {
                1.0
            } else {
                0.0
            };
        }

        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let ss_tot: f64 = ys.iter().map(|y| (y - mean).powi(2)).sum();

        1.0 - ss_res / ss_tot
    }
}

/// Normal equations `X'X c = X'y` for the design rows `[1, x, x^2, ...]`
struct NormalEquations {
    xtx: Vec<Vec<f64>>,
    xty: Vec<f64>,
}

impl NormalEquations {
    fn accumulate(xs: &[f64], ys: &[f64], num_params: usize) -> Self {
        let mut xtx = vec![vec![0.0; num_params]; num_params];
        let mut xty = vec![0.0; num_params];

        for (&x, &y) in xs.iter().zip(ys) {
            let powers: Vec<f64> = (0..num_params).map(|p| x.powi(p as i32)).collect();
            for (i, &pi) in powers.iter().enumerate() {
                xty[i] += pi * y;
                for (j, &pj) in powers.iter().enumerate() {
                    xtx[i][j] += pi * pj;
                }
            }
        }

        Self { xtx, xty }
    }

    /// Coefficients, lowest power first, via `X'X = L L'`.
    ///
    /// `None` when `X'X` is not positive definite, which happens when the
    /// observations repeat x values or are fewer than the coefficients.
    fn solve(&self) -> Option<Vec<f64>> {
        let n = self.xty.len();
        if n == 0 || self.xtx.len() != n {
            return None;
        }

        let mut lower = vec![vec![0.0; n]; n];
        for row in 0..n {
            for col in 0..=row {
                let dot: f64 = (0..col).map(|k| lower[row][k] * lower[col][k]).sum();
                let value = self.xtx[row][col] - dot;

                if row == col {
                    if value.is_nan() || value <= 0.0 {
                        return None;
                    }
                    lower[row][col] = value.sqrt();
                } else {
                    lower[row][col] = value / lower[col][col];
                }
            }
        }

        // L z = X'y
        let mut z = vec![0.0; n];
        for row in 0..n {
            let dot: f64 = (0..row).map(|k| lower[row][k] * z[k]).sum();
            z[row] = (self.xty[row] - dot) / lower[row][row];
        }

        // L' c = z
        let mut coefficients = vec![0.0; n];
        for row in (0..n).rev() {
            let dot: f64 = (row + 1..n).map(|k| lower[k][row] * coefficients[k]).sum();
            coefficients[row] = (z[row] - dot) / lower[row][row];
        }

        Some(coefficients)
    }
}
