use super::{SeriesError, TimeSeries, is_missing};

/// Z-scores `series` against its rolling statistics, `(x - mean) / std`.
///
/// All three series must share the same dates.
pub fn normalize(
    series: &TimeSeries,
    mean: &TimeSeries,
    std: &TimeSeries,
) -> Result<TimeSeries, SeriesError> {
    series.same_dates(mean)?;
    series.same_dates(std)?;

    let values = normalize_values(series.values(), mean.values(), std.values())?;
    series.with_values(values)
}

/// Slice form of [`normalize`]. A zero or missing standard deviation, or any
/// missing input, gives `NaN` at that position.
pub fn normalize_values(values: &[f64], mean: &[f64], std: &[f64]) -> Result<Vec<f64>, SeriesError> {
    check_lengths(values, mean)?;
    check_lengths(values, std)?;

    Ok(values
        .iter()
        .zip(mean)
        .zip(std)
        .map(|((x, m), s)| {
            if is_missing(*x) || is_missing(*m) || is_missing(*s) || *s == 0.0 {
                return f64::NAN;
            }
            let z = (x - m) / s;
            if is_missing(z) { f64::NAN } else { z }
        })
        .collect())
}

/// Averages a daily index with its rolling mean, the F10.7P form
/// `(F10.7 + F10.7_mean) / 2`.
pub fn p_index(series: &TimeSeries, mean: &TimeSeries) -> Result<TimeSeries, SeriesError> {
    series.same_dates(mean)?;

    let values = series
        .values()
        .iter()
        .zip(mean.values())
        .map(|(x, m)| (x + m) / 2.0)
        .collect();

    series.with_values(values)
}

fn check_lengths(values: &[f64], other: &[f64]) -> Result<(), SeriesError> {
    if values.len() == other.len() {
        Ok(())
    } else {
        Err(SeriesError::LengthMismatch {
            dates: values.len(),
            values: other.len(),
        })
    }
}
