//! In-memory forms of the two data sources: EUV spectra and the daily
//! reference index table.

pub mod flux;
pub mod reference;
pub mod spectral;

pub use flux::FluxMatrix;
pub use reference::{IndexColumn, ReferenceIndex};
pub use spectral::{COR_1AU, HE_II, SpectralData};

use crate::series::SeriesError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{values} values cannot be split into rows of {columns} columns")]
    FlatLength { values: usize, columns: usize },
    #[error("flux has {rows} rows for {dates} dates")]
    RowMismatch { dates: usize, rows: usize },
    #[error("flux has {columns} columns for {wavelengths} wavelengths")]
    ColumnMismatch { wavelengths: usize, columns: usize },
    #[error("scalar '{name}' has {found} values for {expected} dates")]
    ScalarLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Series(#[from] SeriesError),
}
