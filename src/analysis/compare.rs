use chrono::NaiveDate;
use serde::Serialize;

use super::AnalysisError;
use crate::correlation::{
    Correlation, CorrelationError, pearson_series, variability_mask, yearly_correlations,
};
use crate::dates::fractional_year;
use crate::series::{TimeSeries, Window, align, is_missing, normalize, p_index, rolling_stats};

/// A correlation, or the reason it does not exist for this data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorrelationOutcome {
    Defined(Correlation),
    Undefined { undefined: String },
}

impl CorrelationOutcome {
    /// Keeps statistical degeneracies as an outcome and fails on bad input.
    pub fn from_result(result: Result<Correlation, CorrelationError>) -> Result<Self, CorrelationError> {
        match result {
            Ok(correlation) => Ok(Self::Defined(correlation)),
            Err(e) if e.is_undefined() => Ok(Self::Undefined {
                undefined: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub fn correlation(&self) -> Option<&Correlation> {
        match self {
            Self::Defined(correlation) => Some(correlation),
            Self::Undefined { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyCorrelation {
    pub year: i32,
    pub correlation: CorrelationOutcome,
}

/// Agreement between a proxy series and a reference index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub proxy: String,
    pub reference: String,
    pub window: usize,
    pub lower_limit: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// `first_date` and `last_date` as fractional years.
    pub first_fyear: Option<f64>,
    pub last_fyear: Option<f64>,
    /// Dates where both series have a value.
    pub aligned_samples: usize,
    /// Aligned dates where both series vary by more than `lower_limit`.
    pub masked_samples: usize,
    pub raw: CorrelationOutcome,
    pub mean: CorrelationOutcome,
    pub normalized: CorrelationOutcome,
    pub p_index: CorrelationOutcome,
    pub yearly: Vec<YearlyCorrelation>,
}

/// Compares `proxy` against `reference`.
///
/// Both are restricted to their common dates, then smoothed with a centered
/// rolling window and z-scored against it. Only dates where both series vary
/// by more than `lower_limit` relative to their rolling mean are correlated.
/// The `mean` and `normalized` correlations additionally require both
/// normalized values, so they share one set of samples.
pub fn compare(
    proxy_name: &str,
    proxy: &TimeSeries,
    reference_name: &str,
    reference: &TimeSeries,
    window: Window,
    lower_limit: f64,
) -> Result<ComparisonReport, AnalysisError> {
    let (proxy, reference) = align(proxy, reference);

    let proxy_stats = rolling_stats(&proxy, window.length())?;
    let reference_stats = rolling_stats(&reference, window.length())?;

    let proxy_nrm = normalize(&proxy, &proxy_stats.mean, &proxy_stats.std)?;
    let reference_nrm = normalize(&reference, &reference_stats.mean, &reference_stats.std)?;

    let mask = variability_mask(
        proxy_stats.mean.values(),
        proxy_stats.std.values(),
        reference_stats.mean.values(),
        reference_stats.std.values(),
        lower_limit,
    )?;

    let nrm_mask: Vec<bool> = mask
        .iter()
        .zip(proxy_nrm.values().iter().zip(reference_nrm.values()))
        .map(|(&keep, (&a, &b))| keep && !is_missing(a) && !is_missing(b))
        .collect();

    let reference_p = p_index(&reference, &reference_stats.mean)?;

    let raw = pearson_series(&proxy, &reference, Some(&mask));
    let mean = pearson_series(&proxy_stats.mean, &reference_stats.mean, Some(&nrm_mask));
    let normalized = pearson_series(&proxy_nrm, &reference_nrm, Some(&nrm_mask));
    let p_index = pearson_series(&proxy, &reference_p, Some(&mask));

    let yearly = yearly_correlations(&proxy, &reference)?
        .into_iter()
        .map(|(year, result)| {
            Ok(YearlyCorrelation {
                year,
                correlation: CorrelationOutcome::from_result(result)?,
            })
        })
        .collect::<Result<Vec<_>, CorrelationError>>()?;

    let first_date = proxy.dates().first().copied();
    let last_date = proxy.dates().last().copied();

    Ok(ComparisonReport {
        proxy: proxy_name.to_string(),
        reference: reference_name.to_string(),
        window: window.length(),
        lower_limit,
        first_date,
        last_date,
        first_fyear: first_date.map(fractional_year),
        last_fyear: last_date.map(fractional_year),
        aligned_samples: proxy.len(),
        masked_samples: mask.iter().filter(|&&keep| keep).count(),
        raw: CorrelationOutcome::from_result(raw)?,
        mean: CorrelationOutcome::from_result(mean)?,
        normalized: CorrelationOutcome::from_result(normalized)?,
        p_index: CorrelationOutcome::from_result(p_index)?,
        yearly,
    })
}
