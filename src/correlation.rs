//! Pearson correlation between paired series, with the degenerate cases
//! (too few samples, a constant side) reported as errors rather than as a
//! numeric coefficient.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::series::{TimeSeries, is_missing};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrelationError {
    #[error("correlation inputs differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("mask length {mask} does not match series length {series}")]
    MaskLength { mask: usize, series: usize },
    #[error("series are not on the same dates")]
    DateMismatch,
    #[error("insufficient samples: {found} valid pairs, at least 2 required")]
    InsufficientSamples { found: usize },
    #[error("correlation undefined: {side} series is constant over {samples} valid samples")]
    ConstantSeries { side: &'static str, samples: usize },
    #[error("t distribution unavailable: {0}")]
    Distribution(String),
}

impl CorrelationError {
    /// True for the statistical degeneracies, as opposed to malformed input.
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSamples { .. } | Self::ConstantSeries { .. }
        )
    }
}

/// Pearson coefficient with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub r: f64,
    pub p: f64,
    pub samples: usize,
}

/// Correlates `a` and `b` over indices where both are present and `mask`,
/// when given, is true.
pub fn pearson(a: &[f64], b: &[f64], mask: Option<&[bool]>) -> Result<Correlation, CorrelationError> {
    if a.len() != b.len() {
        return Err(CorrelationError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if let Some(mask) = mask
        && mask.len() != a.len()
    {
        return Err(CorrelationError::MaskLength {
            mask: mask.len(),
            series: a.len(),
        });
    }

    let (x, y): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b)
        .enumerate()
        .filter(|(i, _)| mask.is_none_or(|m| m[*i]))
        .filter(|(_, (x, y))| !is_missing(**x) && !is_missing(**y))
        .map(|(_, (x, y))| (*x, *y))
        .unzip();

    let n = x.len();
    if n < 2 {
        return Err(CorrelationError::InsufficientSamples { found: n });
    }
    if is_constant(&x) {
        return Err(CorrelationError::ConstantSeries {
            side: "first",
            samples: n,
        });
    }
    if is_constant(&y) {
        return Err(CorrelationError::ConstantSeries {
            side: "second",
            samples: n,
        });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(&y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Err(CorrelationError::ConstantSeries {
            side: if var_x == 0.0 { "first" } else { "second" },
            samples: n,
        });
    }

    let r = (cov / denom).clamp(-1.0, 1.0);
    let p = p_value(r, n)?;

    Ok(Correlation { r, p, samples: n })
}

/// [`pearson`] over two series on identical dates.
pub fn pearson_series(
    a: &TimeSeries,
    b: &TimeSeries,
    mask: Option<&[bool]>,
) -> Result<Correlation, CorrelationError> {
    if a.dates() != b.dates() {
        return Err(CorrelationError::DateMismatch);
    }
    pearson(a.values(), b.values(), mask)
}

/// Keeps samples where both quantities vary by more than `lower_limit`
/// relative to their rolling mean, `std / mean > lower_limit`. Missing
/// statistics never pass.
pub fn variability_mask(
    mean_a: &[f64],
    std_a: &[f64],
    mean_b: &[f64],
    std_b: &[f64],
    lower_limit: f64,
) -> Result<Vec<bool>, CorrelationError> {
    let n = mean_a.len();
    for other in [std_a.len(), mean_b.len(), std_b.len()] {
        if other != n {
            return Err(CorrelationError::LengthMismatch {
                left: n,
                right: other,
            });
        }
    }

    Ok((0..n)
        .map(|i| std_a[i] / mean_a[i] > lower_limit && std_b[i] / mean_b[i] > lower_limit)
        .collect())
}

/// Raw correlation of an aligned pair within each calendar year.
pub fn yearly_correlations(
    a: &TimeSeries,
    b: &TimeSeries,
) -> Result<Vec<(i32, Result<Correlation, CorrelationError>)>, CorrelationError> {
    if a.dates() != b.dates() {
        return Err(CorrelationError::DateMismatch);
    }

    Ok(a.years()
        .into_iter()
        .map(|year| (year, pearson_series(&a.year(year), &b.year(year), None)))
        .collect())
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

fn p_value(r: f64, n: usize) -> Result<f64, CorrelationError> {
    if n == 2 {
        return Ok(1.0);
    }
    if r.abs() == 1.0 {
        return Ok(0.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| CorrelationError::Distribution(e.to_string()))?;

    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_anticorrelation() {
        let result = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0], None).unwrap();

        assert!((result.r + 1.0).abs() < 1e-12, "{}", result.r);
        assert!(result.p < 1e-6, "{}", result.p);
        assert_eq!(result.samples, 5);
    }

    #[test]
    fn test_pearson_known_value() {
        // scipy.stats.pearsonr([1, 2, 3, 4, 5], [2, 1, 4, 3, 5])
        let result = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0], None).unwrap();

        assert!((result.r - 0.8).abs() < 1e-12, "{}", result.r);
        assert!((result.p - 0.10408803866182788).abs() < 1e-6, "{}", result.p);
    }

    #[test]
    fn test_pearson_insufficient_samples() {
        let err = pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, f64::NAN], None).unwrap_err();

        assert_eq!(err, CorrelationError::InsufficientSamples { found: 1 });
        assert!(err.is_undefined());
    }

    #[test]
    fn test_pearson_constant_series_is_undefined() {
        let err = pearson(&[2.0, 2.0, 2.0, 2.0], &[1.0, 2.0, 3.0, 4.0], None).unwrap_err();

        assert_eq!(
            err,
            CorrelationError::ConstantSeries {
                side: "first",
                samples: 4
            }
        );
        assert!(err.is_undefined());
    }

    #[test]
    fn test_pearson_applies_mask() {
        let a = [1.0, 2.0, 3.0, 4.0, 100.0];
        let b = [2.0, 4.0, 6.0, 8.0, -50.0];
        let mask = [true, true, true, true, false];

        let result = pearson(&a, &b, Some(&mask)).unwrap();
        assert!((result.r - 1.0).abs() < 1e-12);
        assert_eq!(result.samples, 4);

        let err = pearson(&a, &b, Some(&mask[..3])).unwrap_err();
        assert!(matches!(err, CorrelationError::MaskLength { .. }));
    }

    #[test]
    fn test_pearson_two_samples() {
        let result = pearson(&[1.0, 2.0], &[3.0, 1.0], None).unwrap();
        assert!((result.r + 1.0).abs() < 1e-12);
        assert_eq!(result.p, 1.0);
    }

    #[test]
    fn test_variability_mask() {
        let mean_a = [100.0, 100.0, f64::NAN, 100.0];
        let std_a = [10.0, 1.0, 10.0, 10.0];
        let mean_b = [10.0, 10.0, 10.0, 10.0];
        let std_b = [1.0, 1.0, 1.0, 0.1];

        let mask = variability_mask(&mean_a, &std_a, &mean_b, &std_b, 0.05).unwrap();
        assert_eq!(mask, vec![true, false, false, false]);

        assert!(variability_mask(&mean_a, &std_a[..2], &mean_b, &std_b, 0.05).is_err());
    }
}
