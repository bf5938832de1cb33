use chrono::NaiveDate;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::cross_section::{CoefficientSet, CrossSectionTable};
use crate::data::IndexColumn;
use crate::readers::{FillValue, ReadError, source_path};
use crate::series::Window;

pub mod error;
pub use error::ConfigError;

/// A data file and the sentinel its producer uses for missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub file_dir: PathBuf,
    pub file_name: String,
    pub fill_value: f64,
}

impl SourceFile {
    /// Full path, checked to exist.
    pub fn path(&self) -> Result<PathBuf, ReadError> {
        source_path(&self.file_dir, &self.file_name)
    }

    pub fn fill(&self) -> FillValue {
        FillValue::new(self.fill_value)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    euv: SourceFile,
    omni: SourceFile,
    coefficient_set: CoefficientSet,
    cross_section_file: Option<PathBuf>,
    species: Vec<String>,
    include_he_ii: bool,
    window: Window,
    lower_limit: f64,
    power_scale: f64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    reference: IndexColumn,
}

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_EUV_FILE: &str = "latest_see_L3_merged.ncdf";
const DEFAULT_OMNI_FILE: &str = "omni2_daily_12664.txt";
const DEFAULT_WINDOW: usize = 81;
const DEFAULT_LOWER_LIMIT: f64 = 0.05;
const DEFAULT_POWER_SCALE: f64 = 1.0e24;

// Deserializes a Config, filling documented defaults for omitted options and
// rejecting invalid values instead of replacing them.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ConfigHelper {
            #[serde(default)]
            euv: SourceHelper,
            #[serde(default)]
            omni: SourceHelper,
            #[serde(default)]
            coefficient_set: CoefficientSet,
            cross_section_file: Option<PathBuf>,
            species: Option<Vec<String>>,
            #[serde(default)]
            include_he_ii: bool,
            window: Option<usize>,
            lower_limit: Option<f64>,
            power_scale: Option<f64>,
            start_date: Option<String>,
            end_date: Option<String>,
            #[serde(default)]
            reference: IndexColumn,
        }

        #[derive(Default, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct SourceHelper {
            file_dir: Option<PathBuf>,
            file_name: Option<String>,
            fill_value: Option<f64>,
        }

        fn source<E: Error>(
            helper: SourceHelper,
            name: &'static str,
            default_file: &str,
            default_fill: FillValue,
        ) -> Result<SourceFile, E> {
            let file_name = helper.file_name.unwrap_or_else(|| default_file.to_string());
            if file_name.trim().is_empty() {
                return Err(E::custom(ConfigError::EmptyFileName(name)));
            }

            Ok(SourceFile {
                file_dir: helper
                    .file_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
                file_name,
                fill_value: helper.fill_value.unwrap_or(default_fill.sentinel),
            })
        }

        fn date<E: Error>(value: Option<String>, field: &str) -> Result<Option<NaiveDate>, E> {
            value
                .map(|s| {
                    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                        .map_err(|e| E::custom(format!("Invalid {} format: {}", field, e)))
                })
                .transpose()
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let euv = source(helper.euv, "euv", DEFAULT_EUV_FILE, FillValue::SEE)?;
        let omni = source(helper.omni, "omni", DEFAULT_OMNI_FILE, FillValue::OMNI_F107)?;

        let start_date = date(helper.start_date, "start_date")?;
        let end_date = date(helper.end_date, "end_date")?;
        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            return Err(D::Error::custom(ConfigError::DateOrder));
        }

        let window_length = helper.window.unwrap_or(DEFAULT_WINDOW);
        let window = Window::new(window_length)
            .map_err(|_| D::Error::custom(ConfigError::Window(window_length)))?;

        let lower_limit = helper.lower_limit.unwrap_or(DEFAULT_LOWER_LIMIT);
        if !(lower_limit.is_finite() && lower_limit >= 0.0) {
            return Err(D::Error::custom(ConfigError::LowerLimit(lower_limit)));
        }

        let power_scale = helper.power_scale.unwrap_or(DEFAULT_POWER_SCALE);
        if !power_scale.is_finite() || power_scale == 0.0 {
            return Err(D::Error::custom(ConfigError::PowerScale(power_scale)));
        }

        let species = helper.species.unwrap_or_else(|| vec!["o".to_string()]);
        if species.is_empty() && !helper.include_he_ii {
            return Err(D::Error::custom(ConfigError::NoSpecies));
        }

        Ok(Config {
            euv,
            omni,
            coefficient_set: helper.coefficient_set,
            cross_section_file: helper.cross_section_file,
            species,
            include_he_ii: helper.include_he_ii,
            window,
            lower_limit,
            power_scale,
            start_date,
            end_date,
            reference: helper.reference,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            euv: SourceFile {
                file_dir: PathBuf::from(DEFAULT_DATA_DIR),
                file_name: DEFAULT_EUV_FILE.to_string(),
                fill_value: FillValue::SEE.sentinel,
            },
            omni: SourceFile {
                file_dir: PathBuf::from(DEFAULT_DATA_DIR),
                file_name: DEFAULT_OMNI_FILE.to_string(),
                fill_value: FillValue::OMNI_F107.sentinel,
            },
            coefficient_set: CoefficientSet::default(),
            cross_section_file: None,
            species: vec!["o".to_string()],
            include_he_ii: false,
            window: Window::DEFAULT,
            lower_limit: DEFAULT_LOWER_LIMIT,
            power_scale: DEFAULT_POWER_SCALE,
            start_date: None,
            end_date: None,
            reference: IndexColumn::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn euv(&self) -> &SourceFile {
        &self.euv
    }

    pub fn omni(&self) -> &SourceFile {
        &self.omni
    }

    pub fn coefficient_set(&self) -> CoefficientSet {
        self.coefficient_set
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn include_he_ii(&self) -> bool {
        self.include_he_ii
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn lower_limit(&self) -> f64 {
        self.lower_limit
    }

    pub fn power_scale(&self) -> f64 {
        self.power_scale
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn reference(&self) -> IndexColumn {
        self.reference
    }

    /// Loads the configured table and checks it lists every configured species.
    pub fn cross_section_table(&self) -> Result<CrossSectionTable, ConfigError> {
        let table = match &self.cross_section_file {
            Some(path) => CrossSectionTable::from_file(path)?,
            None => self.coefficient_set.table()?,
        };

        if let Some(species) = self.species.iter().find(|s| !table.contains(s)) {
            return Err(ConfigError::UnknownSpecies {
                species: species.clone(),
                table: table.name().to_string(),
            });
        }

        Ok(table)
    }
}
