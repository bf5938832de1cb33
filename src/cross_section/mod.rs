//! Photoionization cross-section tables.
//!
//! A table maps a species identifier to wavelength bins `[lower, upper)` in
//! nm, each carrying a cross-section area in m^2, plus optional discrete
//! emission lines. Tables are immutable once built and are normally loaded
//! from the versioned JSON files under `data/cross_sections/`.

pub mod sets;
pub mod species;

pub use sets::CoefficientSet;
pub use species::{Species, SpeciesParseError};

use serde::{Deserialize, Deserializer, de::Error};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse cross-section table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cross-section table '{0}' lists no species")]
    Empty(String),
    #[error("species '{species}' has no bins")]
    NoBins { species: String },
    #[error("species '{species}' bin {index} is invalid: [{lower}, {upper}) with area {area}")]
    InvalidBin {
        species: String,
        index: usize,
        lower: f64,
        upper: f64,
        area: f64,
    },
    #[error("species '{species}' emission line {index} is invalid: center {center}, area {area}")]
    InvalidLine {
        species: String,
        index: usize,
        center: f64,
        area: f64,
    },
}

/// One wavelength bin. Negative areas are valid subtractive corrections.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CrossSectionBin {
    pub lower: f64,
    pub upper: f64,
    pub area: f64,
}

impl CrossSectionBin {
    pub fn new(lower: f64, upper: f64, area: f64) -> Self {
        Self { lower, upper, area }
    }

    /// Half-open membership: the lower edge belongs to the bin, the upper does not.
    pub fn contains(&self, wavelength: f64) -> bool {
        self.lower <= wavelength && wavelength < self.upper
    }

    fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.area.is_finite() && self.lower < self.upper
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmissionLine {
    pub center: f64,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionTable {
    name: String,
    version: u32,
    reference: Option<String>,
    species: BTreeMap<String, Vec<CrossSectionBin>>,
    lines: BTreeMap<String, Vec<EmissionLine>>,
}

impl<'de> Deserialize<'de> for CrossSectionTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TableHelper {
            name: String,
            #[serde(default = "default_version")]
            version: u32,
            reference: Option<String>,
            species: BTreeMap<String, Vec<CrossSectionBin>>,
            #[serde(default)]
            lines: BTreeMap<String, Vec<EmissionLine>>,
        }

        fn default_version() -> u32 {
            1
        }

        let helper = TableHelper::deserialize(deserializer)?;

        let mut table = CrossSectionTable::new(helper.name, helper.species).map_err(D::Error::custom)?;
        table.version = helper.version;
        table.reference = helper.reference;

        for (species, lines) in helper.lines {
            table = table.with_lines(species, lines).map_err(D::Error::custom)?;
        }

        Ok(table)
    }
}

impl CrossSectionTable {
    pub fn new(
        name: impl Into<String>,
        species: BTreeMap<String, Vec<CrossSectionBin>>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        if species.is_empty() {
            return Err(TableError::Empty(name));
        }

        for (key, bins) in &species {
            if bins.is_empty() {
                return Err(TableError::NoBins {
                    species: key.clone(),
                });
            }
            if let Some((index, bin)) = bins.iter().enumerate().find(|(_, bin)| !bin.is_valid()) {
                return Err(TableError::InvalidBin {
                    species: key.clone(),
                    index,
                    lower: bin.lower,
                    upper: bin.upper,
                    area: bin.area,
                });
            }
        }

        Ok(Self {
            name,
            version: 1,
            reference: None,
            species,
            lines: BTreeMap::new(),
        })
    }

    /// Attaches emission lines to a species already present in the table.
    pub fn with_lines(
        mut self,
        species: impl Into<String>,
        lines: Vec<EmissionLine>,
    ) -> Result<Self, TableError> {
        let species = species.into();
        if !self.species.contains_key(&species) {
            return Err(TableError::NoBins { species });
        }

        let invalid = lines
            .iter()
            .enumerate()
            .find(|(_, line)| !(line.center.is_finite() && line.center > 0.0 && line.area.is_finite()));
        if let Some((index, line)) = invalid {
            return Err(TableError::InvalidLine {
                species,
                index,
                center: line.center,
                area: line.area,
            });
        }

        self.lines.insert(species, lines);
        Ok(self)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn bins(&self, species: &str) -> Option<&[CrossSectionBin]> {
        self.species.get(species).map(Vec::as_slice)
    }

    pub fn lines(&self, species: &str) -> Option<&[EmissionLine]> {
        self.lines.get(species).map(Vec::as_slice)
    }

    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn contains(&self, species: &str) -> bool {
        self.species.contains_key(species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_bin_is_half_open() {
        let bin = CrossSectionBin::new(10.0, 20.0, 1.0);
        assert!(bin.contains(10.0));
        assert!(bin.contains(19.999));
        assert!(!bin.contains(20.0));
        assert!(!bin.contains(9.999));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("custom.json");
        let mut file = File::create(&file_path).unwrap();

        let table_data = r#"
    {
        "name": "custom",
        "species": {
            "x": [[10.0, 20.0, 2.0], {"lower": 30.0, "upper": 40.0, "area": -0.5}]
        },
        "lines": { "x": [[15.5, 1.0]] }
    }
    "#;

        file.write_all(table_data.as_bytes()).unwrap();

        let table = CrossSectionTable::from_file(file_path).unwrap();

        assert_eq!(table.name(), "custom");
        assert_eq!(table.version(), 1);
        assert_eq!(
            table.bins("x").unwrap(),
            &[
                CrossSectionBin::new(10.0, 20.0, 2.0),
                CrossSectionBin::new(30.0, 40.0, -0.5)
            ]
        );
        assert_eq!(table.lines("x").unwrap().len(), 1);
        assert!(table.bins("y").is_none());
    }

    #[test]
    fn test_rejects_inverted_bin() {
        let err = CrossSectionTable::from_json(
            r#"{"name": "bad", "species": {"x": [[20.0, 10.0, 1.0]]}}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("bin 0 is invalid"), "{err}");
    }

    #[test]
    fn test_rejects_lines_for_unknown_species() {
        let err = CrossSectionTable::from_json(
            r#"{"name": "bad", "species": {"x": [[10.0, 20.0, 1.0]]}, "lines": {"y": [[15.0, 1.0]]}}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("'y'"), "{err}");
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = CrossSectionTable::new("none", BTreeMap::new()).unwrap_err();
        assert!(matches!(err, TableError::Empty(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CrossSectionTable::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }
}
