//! Dated value series and the operations that line them up for comparison:
//! intersection on common dates, centered rolling statistics and z-score
//! normalization.
//!
//! Missing samples are stored as `NaN` so that every array keeps its
//! alignment with the date axis. Any non-finite value counts as missing.

pub mod align;
pub mod normalize;
pub mod rolling;

pub use align::align;
pub use normalize::{normalize, normalize_values, p_index};
pub use rolling::{RollingStats, Window, rolling_stats, rolling_values};

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("series length mismatch: {dates} dates for {values} values")]
    LengthMismatch { dates: usize, values: usize },
    #[error("dates must be strictly increasing, {current} follows {previous} at index {index}")]
    Unordered {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("series are not on the same dates")]
    DateMismatch,
    #[error("rolling window must be a positive odd integer, got {0}")]
    InvalidWindow(usize),
}

/// Returns true when `value` stands for a missing sample.
pub fn is_missing(value: f64) -> bool {
    !value.is_finite()
}

/// Fails unless every date is strictly later than the one before it.
pub fn check_increasing(dates: &[NaiveDate]) -> Result<(), SeriesError> {
    match dates.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(SeriesError::Unordered {
            index: index + 1,
            previous: dates[index],
            current: dates[index + 1],
        }),
        None => Ok(()),
    }
}

/// A sequence of values indexed by strictly increasing calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }

        check_increasing(&dates)?;

        Ok(Self { dates, values })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of samples that are not missing.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !is_missing(**v)).count()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|index| self.values[index])
    }

    /// Same dates, new values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() != self.dates.len() {
            return Err(SeriesError::LengthMismatch {
                dates: self.dates.len(),
                values: values.len(),
            });
        }

        Ok(Self {
            dates: self.dates.clone(),
            values,
        })
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dates: self.dates.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Samples with `start <= date <= end`; an open bound keeps that side.
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let (dates, values) = self
            .iter()
            .filter(|(date, _)| start.is_none_or(|s| *date >= s))
            .filter(|(date, _)| end.is_none_or(|e| *date <= e))
            .unzip();

        Self { dates, values }
    }

    /// Samples falling in one calendar year.
    pub fn year(&self, year: i32) -> Self {
        let (dates, values) = self.iter().filter(|(date, _)| date.year() == year).unzip();
        Self { dates, values }
    }

    /// Distinct calendar years covered by the series, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.dates.iter().map(|d| d.year()).collect();
        years.dedup();
        years
    }

    pub(crate) fn same_dates(&self, other: &TimeSeries) -> Result<(), SeriesError> {
        if self.dates == other.dates {
            Ok(())
        } else {
            Err(SeriesError::DateMismatch)
        }
    }
}
