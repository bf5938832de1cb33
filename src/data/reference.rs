use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use super::DataError;
use crate::dates::missing_days;
use crate::series::TimeSeries;

/// Columns of the OMNI2 daily table exposed as reference indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum IndexColumn {
    #[serde(rename = "sunspot_number")]
    SunspotNumber,
    /// 10.7 cm radio flux in solar flux units.
    #[default]
    #[serde(rename = "f107")]
    F107,
    #[serde(rename = "lyman_alpha")]
    LymanAlpha,
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndexColumn::SunspotNumber => write!(f, "sunspot number"),
            IndexColumn::F107 => write!(f, "F10.7"),
            IndexColumn::LymanAlpha => write!(f, "Lyman-alpha"),
        }
    }
}

/// Daily geophysical indices. Days absent from the source table are absent
/// here too; filled values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceIndex {
    sunspot_number: TimeSeries,
    f107: TimeSeries,
    lyman_alpha: TimeSeries,
}

impl ReferenceIndex {
    pub fn new(
        dates: Vec<NaiveDate>,
        sunspot_number: Vec<f64>,
        f107: Vec<f64>,
        lyman_alpha: Vec<f64>,
    ) -> Result<Self, DataError> {
        Ok(Self {
            sunspot_number: TimeSeries::new(dates.clone(), sunspot_number)?,
            f107: TimeSeries::new(dates.clone(), f107)?,
            lyman_alpha: TimeSeries::new(dates, lyman_alpha)?,
        })
    }

    pub fn column(&self, column: IndexColumn) -> &TimeSeries {
        match column {
            IndexColumn::SunspotNumber => &self.sunspot_number,
            IndexColumn::F107 => &self.f107,
            IndexColumn::LymanAlpha => &self.lyman_alpha,
        }
    }

    pub fn f107(&self) -> &TimeSeries {
        &self.f107
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.f107.dates()
    }

    pub fn len(&self) -> usize {
        self.f107.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f107.is_empty()
    }

    /// Calendar days with no row between the first and last date.
    pub fn missing_days(&self) -> usize {
        missing_days(self.dates())
    }
}
