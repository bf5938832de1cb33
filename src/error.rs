use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::correlation::CorrelationError;
use crate::cross_section::TableError;
use crate::data::DataError;
use crate::integrator::IntegrationError;
use crate::readers::{FileError, ReadError};
use crate::series::SeriesError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("cross-section table error: {0}")]
    Table(#[from] TableError),
    #[error("{0}")]
    File(#[from] FileError),
    #[error("read error: {0}")]
    Read(#[from] ReadError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("series error: {0}")]
    Series(#[from] SeriesError),
    #[error("integration error: {0}")]
    Integration(#[from] IntegrationError),
    #[error("correlation error: {0}")]
    Correlation(#[from] CorrelationError),
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}
