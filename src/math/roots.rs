//! Bracketing root search over sampled data

/// First zero crossing of `ys(xs)` in ascending `xs` order
///
/// Scans consecutive samples for a sign change and linearly interpolates the
/// root between the bracketing pair. A sample that is exactly zero is itself
/// the root. Non-finite samples never form a bracket.
pub fn first_zero_crossing(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }

    for i in 0..xs.len() {
        let (x0, y0) = (xs[i], ys[i]);
        if !y0.is_finite() {
            continue;
        }
        if y0 == 0.0 {
            return Some(x0);
        }
        let Some((&x1, &y1)) = xs.get(i + 1).zip(ys.get(i + 1)) else {
            break;
        };
        if !y1.is_finite() || y1 == 0.0 {
            continue;
        }
        if (y0 < 0.0) != (y1 < 0.0) {
            return Some(x0 + (x1 - x0) * (-y0) / (y1 - y0));
        }
    }
    None
}
