//! Proxy versus reference index comparison.

pub mod compare;
pub mod runner;

pub use compare::{ComparisonReport, CorrelationOutcome, YearlyCorrelation, compare};
pub use runner::{IndexComparison, RunReport};

use crate::correlation::CorrelationError;
use crate::series::SeriesError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0} proxy is not available in the spectral data")]
    MissingProxy(String),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}
