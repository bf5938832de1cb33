use std::fmt;
use std::path::PathBuf;

use crate::data::{DataError, ReferenceIndex, SpectralData};

pub trait SpectralReader {
    fn read_spectra(&self) -> Result<SpectralData, ReadError>;
}

pub trait IndexReader {
    fn read_index(&self) -> Result<ReferenceIndex, ReadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("unknown file directory {0}")]
    MissingDirectory(PathBuf),
    #[error("unknown file {0}")]
    MissingFile(PathBuf),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("variable '{0}' not found")]
    MissingVariable(String),
    #[error("variable '{name}' has shape {found:?}, expected {expected}")]
    VariableShape {
        name: String,
        expected: String,
        found: Vec<usize>,
    },
    #[error("invalid packed date {0}")]
    InvalidDate(f64),
    #[error("NetCDF error: {0}")]
    NetCdf(String),
    #[error("unsupported format: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Data(#[from] DataError),
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("unknown file type: {0}")]
    UnknownFileType(PathBuf),
    #[error("{path} is a {found} file, expected {expected}")]
    UnexpectedFileType {
        path: PathBuf,
        expected: FileType,
        found: FileType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    NetCdf,
    OmniText,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::NetCdf => write!(f, "netCDF"),
            FileType::OmniText => write!(f, "OMNI text"),
        }
    }
}
