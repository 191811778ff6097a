//! Regression error measures over paired truth and estimate slices.
//!
//! All three return `None` for empty or mismatched inputs.

fn paired<'a>(truth: &'a [f64], estimate: &'a [f64]) -> Option<impl Iterator<Item = (f64, f64)> + 'a> {
    if truth.is_empty() || truth.len() != estimate.len() {
        return None;
    }
    Some(truth.iter().copied().zip(estimate.iter().copied()))
}

/// Mean of `|truth - estimate|`.
#[must_use]
pub fn mean_absolute_error(truth: &[f64], estimate: &[f64]) -> Option<f64> {
    let total: f64 = paired(truth, estimate)?.map(|(t, e)| (t - e).abs()).sum();
    Some(total / truth.len() as f64)
}

/// Mean of `(truth - estimate)^2`.
#[must_use]
pub fn mean_squared_error(truth: &[f64], estimate: &[f64]) -> Option<f64> {
    let total: f64 = paired(truth, estimate)?.map(|(t, e)| (t - e).powi(2)).sum();
    Some(total / truth.len() as f64)
}

/// Coefficient of determination.
///
/// A constant `truth` scores 1.0 when predicted exactly and 0.0 otherwise.
#[must_use]
pub fn r2_score(truth: &[f64], estimate: &[f64]) -> Option<f64> {
    let residual: f64 = paired(truth, estimate)?.map(|(t, e)| (t - e).powi(2)).sum();
    let mean = truth.iter().sum::<f64>() / truth.len() as f64;
    let total: f64 = truth.iter().map(|t| (t - mean).powi(2)).sum();

    if total == 0.0 {
        return Some(if residual == 0.0 { 1.0 } else { 0.0 });
    }
    Some(1.0 - residual / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[3.0, -0.5, 2.0, 7.0], &[2.5, 0.0, 2.0, 8.0], 0.5, 0.375)]
    #[case(&[1.0, 2.0], &[1.0, 2.0], 0.0, 0.0)]
    fn absolute_and_squared(
        #[case] truth: &[f64],
        #[case] estimate: &[f64],
        #[case] mae: f64,
        #[case] mse: f64,
    ) {
        assert_eq!(mean_absolute_error(truth, estimate), Some(mae));
        assert_eq!(mean_squared_error(truth, estimate), Some(mse));
    }

    #[test]
    fn r2_matches_reference_values() {
        let r2 = r2_score(&[3.0, -0.5, 2.0, 7.0], &[2.5, 0.0, 2.0, 8.0]).unwrap();
        assert!((r2 - 0.948_608_137_044_967_9).abs() < 1e-12);
        assert_eq!(r2_score(&[4.0, 4.0], &[4.0, 4.0]), Some(1.0));
        assert_eq!(r2_score(&[4.0, 4.0], &[4.0, 5.0]), Some(0.0));
    }

    #[test]
    fn empty_or_mismatched() {
        assert_eq!(mean_absolute_error(&[], &[]), None);
        assert_eq!(mean_squared_error(&[1.0], &[1.0, 2.0]), None);
        assert_eq!(r2_score(&[], &[]), None);
    }
}
