//! Numerical utilities for the thermodynamic engine

pub mod roots;

use nalgebra::{DMatrix, DVector};

use crate::error::{EngineError, EngineResult};

pub use roots::first_zero_crossing;

pub type Mat = DMatrix<f64>;
pub type Vector = DVector<f64>;

/// Evenly spaced samples over `[start, stop]` (inclusive)
pub fn linspace(start: f64, stop: f64, samples: usize) -> Vector {
    match samples {
        0 => Vector::zeros(0),
        1 => Vector::from_element(1, start),
        n => {
            let step = (stop - start) / (n - 1) as f64;
            // Last sample is exactly `stop`
            Vector::from_fn(n, |i, _| if i == n - 1 { stop } else { start + step * i as f64 })
        }
    }
}

/// Clamp every finite element to `[-limit, limit]`; NaN stays NaN
pub fn clamp_symmetric(values: &mut Vector, limit: f64) {
    values.apply(|v| {
        if !v.is_nan() {
            *v = v.clamp(-limit, limit);
        }
    });
}

/// Least-squares polynomial fit of the given degree
///
/// # Returns
/// Coefficients in ascending order `[c0, c1, ..., c_degree]` so that
/// `y ≈ c0 + c1·x + ... + c_degree·x^degree`.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> EngineResult<Vec<f64>> {
    if x.len() != y.len() {
        return Err(EngineError::ShapeMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    if x.len() <= degree {
        return Err(EngineError::InsufficientData(format!(
            "degree {} fit needs at least {} points, got {}",
            degree,
            degree + 1,
            x.len()
        )));
    }

    // Vandermonde design matrix on x / scale to keep the columns comparable
    let scale = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let a = Mat::from_fn(x.len(), degree + 1, |i, j| (x[i] / scale).powi(j as i32));
    let b = Vector::from_column_slice(y);

    let svd = a.svd(true, true);
    let coeffs = svd
        .solve(&b, 1e-12)
        .map_err(|e| EngineError::InsufficientData(e.to_string()))?;

    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(EngineError::InsufficientData(
            "polynomial fit produced non-finite coefficients".to_string(),
        ));
    }
    Ok(coeffs
        .iter()
        .enumerate()
        .map(|(j, c)| c / scale.powi(j as i32))
        .collect())
}

/// Piecewise-linear interpolation of `(xs, ys)` at `x`
///
/// `xs` must be ascending. Outside the table the end segments are extended.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.len() != ys.len() || xs.is_empty() {
        return None;
    }
    if xs.len() == 1 {
        return Some(ys[0]);
    }
    let idx = match xs.iter().position(|&xi| xi >= x) {
        Some(0) => 1,
        Some(i) => i,
        None => xs.len() - 1,
    };
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    if (x1 - x0).abs() < f64::EPSILON {
        return Some(y0);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}
