//! Piecewise-linear interpolation with linear extrapolation past both ends.

use crate::error::LimitError;

/// Linear interpolant over `(x, y)` knots sorted by `x`.
///
/// Outside the knot range the first/last segment is extended, so every
/// finite input produces a value.
#[derive(Debug, Clone)]
pub struct Interp1d {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Interp1d {
    /// Build from unsorted pairs. At least two knots are required.
    pub fn new(points: &[[f64; 2]]) -> Result<Self, LimitError> {
        if points.len() < 2 {
            return Err(LimitError::Degenerate {
                points: points.len(),
            });
        }
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
        let (xs, ys) = sorted.into_iter().map(|[x, y]| (x, y)).unzip();
        Ok(Self { xs, ys })
    }

    pub fn eval(&self, x: f64) -> f64 {
        // Knots return the stored value exactly.
        if let Ok(i) = self.xs.binary_search_by(|k| k.total_cmp(&x)) {
            return self.ys[i];
        }

        let n = self.xs.len();
        let upper = self.xs.partition_point(|&k| k < x);
        let lo = upper.saturating_sub(1).min(n - 2);
        let (x0, x1) = (self.xs[lo], self.xs[lo + 1]);
        let (y0, y1) = (self.ys[lo], self.ys[lo + 1]);
        if x1 == x0 {
            return y0;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
