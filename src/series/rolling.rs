use super::{SeriesError, TimeSeries, is_missing};

/// Length of a centered rolling window. Always a positive odd number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window(usize);

impl Window {
    /// 81 days, about three solar rotations.
    pub const DEFAULT: Window = Window(81);

    pub fn new(length: usize) -> Result<Self, SeriesError> {
        if length == 0 || length % 2 == 0 {
            return Err(SeriesError::InvalidWindow(length));
        }
        Ok(Self(length))
    }

    pub fn length(self) -> usize {
        self.0
    }

    /// Samples on each side of the center.
    pub fn half_width(self) -> usize {
        self.0 / 2
    }
}

/// Centered rolling mean and sample standard deviation of a series, on the
/// same dates as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStats {
    pub mean: TimeSeries,
    pub std: TimeSeries,
}

pub fn rolling_stats(series: &TimeSeries, window: usize) -> Result<RollingStats, SeriesError> {
    let (mean, std) = rolling_values(series.values(), window)?;

    Ok(RollingStats {
        mean: series.with_values(mean)?,
        std: series.with_values(std)?,
    })
}

/// Slice form of [`rolling_stats`].
///
/// Position `i` holds the statistics of `values[i - k ..= i + k]` with
/// `k = window / 2`. Positions closer than `k` to either end, and windows
/// containing a missing sample, are `NaN`. The standard deviation uses
/// `window - 1` degrees of freedom, so it is `NaN` for a window of one.
pub fn rolling_values(values: &[f64], window: usize) -> Result<(Vec<f64>, Vec<f64>), SeriesError> {
    let window = Window::new(window)?;
    let k = window.half_width();
    let n = values.len();

    let mut mean = vec![f64::NAN; n];
    let mut std = vec![f64::NAN; n];

    if n < window.length() {
        return Ok((mean, std));
    }

    for i in k..n - k {
        let samples = &values[i - k..=i + k];
        if samples.iter().any(|v| is_missing(*v)) {
            continue;
        }

        // A flat window has exactly zero spread.
        if samples.iter().all(|v| *v == samples[0]) {
            mean[i] = samples[0];
            if samples.len() > 1 {
                std[i] = 0.0;
            }
            continue;
        }

        let m = samples.iter().sum::<f64>() / samples.len() as f64;
        mean[i] = m;

        if samples.len() > 1 {
            let ss: f64 = samples.iter().map(|v| (v - m) * (v - m)).sum();
            std[i] = (ss / (samples.len() - 1) as f64).sqrt();
        }
    }

    Ok((mean, std))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            if x.is_nan() || y.is_nan() {
                assert!(x.is_nan() && y.is_nan(), "index {i}: {x} vs {y}");
            } else {
                assert!((x - y).abs() < 1e-12, "index {i}: {x} vs {y}");
            }
        }
    }

    #[test]
    fn test_window_must_be_odd() {
        assert_eq!(Window::new(4), Err(SeriesError::InvalidWindow(4)));
        assert_eq!(Window::new(0), Err(SeriesError::InvalidWindow(0)));
        assert_eq!(Window::new(81).map(|w| w.half_width()), Ok(40));
        assert!(rolling_values(&[1.0, 2.0], 2).is_err());
    }

    #[test]
    fn test_rolling_values_centered() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let (mean, std) = rolling_values(&values, 3).unwrap();

        assert_close(&mean, &[f64::NAN, 2.0, 3.0, 4.0, 5.0, f64::NAN]);
        assert_close(&std, &[f64::NAN, 1.0, 1.0, 1.0, 1.0, f64::NAN]);
    }

    #[test]
    fn test_rolling_values_depend_only_on_window() {
        let base = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0];
        let mut changed = base;
        changed[8] = 100.0;

        let (mean_a, std_a) = rolling_values(&base, 5).unwrap();
        let (mean_b, std_b) = rolling_values(&changed, 5).unwrap();

        // Index 8 only enters windows centered at 6 and beyond.
        assert_close(&mean_a[..6], &mean_b[..6]);
        assert_close(&std_a[..6], &std_b[..6]);
        assert!((mean_a[6] - mean_b[6]).abs() > 1.0);
    }

    #[test]
    fn test_rolling_values_reversal_symmetry() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0];
        let reversed: Vec<f64> = values.iter().rev().copied().collect();

        let (mean, std) = rolling_values(&values, 5).unwrap();
        let (mut mean_r, mut std_r) = rolling_values(&reversed, 5).unwrap();
        mean_r.reverse();
        std_r.reverse();

        assert_close(&mean, &mean_r);
        assert_close(&std, &std_r);
    }

    #[test]
    fn test_rolling_values_missing_sample_poisons_window() {
        let values = [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        let (mean, _) = rolling_values(&values, 3).unwrap();

        assert!(mean[1].is_nan());
        assert!(mean[2].is_nan());
        assert!(mean[3].is_nan());
        assert_eq!(mean[4], 5.0);
    }

    #[test]
    fn test_rolling_values_flat_window_has_zero_std() {
        let values = vec![70.1; 120];
        let (mean, std) = rolling_values(&values, 81).unwrap();

        for i in 40..80 {
            assert_eq!(mean[i], 70.1, "index {i}");
            assert_eq!(std[i], 0.0, "index {i}");
        }
        assert!(std[39].is_nan() && std[80].is_nan());
    }

    #[test]
    fn test_rolling_values_short_series_and_unit_window() {
        let (mean, std) = rolling_values(&[1.0, 2.0], 5).unwrap();
        assert!(mean.iter().chain(&std).all(|v| v.is_nan()));

        let (mean, std) = rolling_values(&[1.0, 2.0], 1).unwrap();
        assert_eq!(mean, vec![1.0, 2.0]);
        assert!(std.iter().all(|v| v.is_nan()));
    }
}
