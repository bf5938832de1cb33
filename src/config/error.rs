use crate::cross_section::TableError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("end_date cannot be earlier than start_date")]
    DateOrder,
    #[error("Failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("window should be a positive odd integer, got {0}")]
    Window(usize),
    #[error("lower_limit should be a finite, non-negative number, got {0}")]
    LowerLimit(f64),
    #[error("power_scale should be a finite, non-zero number, got {0}")]
    PowerScale(f64),
    #[error("{0}.file_name cannot be empty")]
    EmptyFileName(&'static str),
    #[error("at least one species is required")]
    NoSpecies,
    #[error("unknown species '{species}' for cross-section table '{table}'")]
    UnknownSpecies { species: String, table: String },
    #[error(transparent)]
    Table(#[from] TableError),
}
