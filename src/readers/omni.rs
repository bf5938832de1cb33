use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, info};

use super::{FillValue, IndexReader, ReadError};
use crate::data::ReferenceIndex;
use crate::dates::date_from_year_doy;

/// Columns: year, day of year, hour, sunspot number, F10.7, Lyman-alpha.
const COLUMNS: usize = 6;

/// Reader for the whitespace-separated OMNI2 daily table.
pub struct OmniReader {
    pub file_name: PathBuf,
    pub f107_fill: FillValue,
    pub sunspot_fill: Option<FillValue>,
    pub lyman_alpha_fill: Option<FillValue>,
}

impl OmniReader {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            f107_fill: FillValue::OMNI_F107,
            sunspot_fill: None,
            lyman_alpha_fill: None,
        }
    }

    pub fn with_f107_fill(mut self, fill: FillValue) -> Self {
        self.f107_fill = fill;
        self
    }

    /// Sunspot numbers are kept as read unless a fill is set.
    pub fn with_sunspot_fill(mut self, fill: FillValue) -> Self {
        self.sunspot_fill = Some(fill);
        self
    }

    /// Lyman-alpha values are kept as read unless a fill is set.
    pub fn with_lyman_alpha_fill(mut self, fill: FillValue) -> Self {
        self.lyman_alpha_fill = Some(fill);
        self
    }

    pub fn parse<R: BufRead>(&self, reader: R) -> Result<ReferenceIndex, ReadError> {
        let mut dates = Vec::new();
        let mut sunspot = Vec::new();
        let mut f107 = Vec::new();
        let mut lyman_alpha = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| ReadError::Io {
                path: self.file_name.clone(),
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let row = parse_row(&line).map_err(|message| ReadError::Parse {
                line: line_number,
                message,
            })?;

            let date = date_from_year_doy(row[0] as i32, row[1] as u32).ok_or_else(|| {
                ReadError::Parse {
                    line: line_number,
                    message: format!("invalid year/day {} {}", row[0], row[1]),
                }
            })?;

            dates.push(date);
            sunspot.push(apply(self.sunspot_fill, row[3]));
            f107.push(self.f107_fill.apply(row[4]));
            lyman_alpha.push(apply(self.lyman_alpha_fill, row[5]));
        }

        debug!("Parsed {} OMNI rows", dates.len());
        Ok(ReferenceIndex::new(dates, sunspot, f107, lyman_alpha)?)
    }
}

impl IndexReader for OmniReader {
    fn read_index(&self) -> Result<ReferenceIndex, ReadError> {
        info!("Reading OMNI table {}", self.file_name.display());

        let file = File::open(&self.file_name).map_err(|source| ReadError::Io {
            path: self.file_name.clone(),
            source,
        })?;

        self.parse(BufReader::new(file))
    }
}

fn apply(fill: Option<FillValue>, value: f64) -> f64 {
    fill.map_or(value, |fill| fill.apply(value))
}

fn parse_row(line: &str) -> Result<[f64; COLUMNS], String> {
    let mut row = [0.0_f64; COLUMNS];
    let mut fields = line.split_whitespace();

    for (column, slot) in row.iter_mut().enumerate() {
        let field = fields
            .next()
            .ok_or_else(|| format!("expected {} columns, found {}", COLUMNS, column))?;
        *slot = field
            .parse()
            .map_err(|e| format!("column {}: cannot parse '{}': {}", column + 1, field, e))?;
    }

    if row[0].fract() != 0.0 || row[1].fract() != 0.0 || row[1] < 1.0 {
        return Err(format!("invalid year/day {} {}", row[0], row[1]));
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IndexColumn;
    use chrono::NaiveDate;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;

    const TABLE: &str = "\
2002   1  0 221 227.2 5.77
2002   2  0 234 999.9 5.81

2002   4  0 203 215.0 5.74
";

    #[test]
    fn test_parse_replaces_f107_fill() {
        let reader = OmniReader::new("omni.txt");
        let index = reader.parse(Cursor::new(TABLE)).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(
            index.dates()[2],
            NaiveDate::from_ymd_opt(2002, 1, 4).expect("Invalid date")
        );

        let f107 = index.f107().values();
        assert_eq!(f107[0], 227.2);
        assert!(f107[1].is_nan());

        let sunspot = index.column(IndexColumn::SunspotNumber).values();
        assert_eq!(sunspot[1], 234.0);
        assert_eq!(index.column(IndexColumn::LymanAlpha).values()[1], 5.81);
        assert_eq!(index.missing_days(), 1);
    }

    #[test]
    fn test_parse_replaces_optional_fills() {
        let table = "2002 1 0 999 150.0 0.999999\n2002 2 0 87 151.0 5.80\n";

        let index = OmniReader::new("omni.txt").parse(Cursor::new(table)).unwrap();
        assert_eq!(index.column(IndexColumn::SunspotNumber).values()[0], 999.0);
        assert_eq!(index.column(IndexColumn::LymanAlpha).values()[0], 0.999999);

        let index = OmniReader::new("omni.txt")
            .with_sunspot_fill(FillValue::OMNI_SUNSPOT)
            .with_lyman_alpha_fill(FillValue::OMNI_LYMAN_ALPHA)
            .parse(Cursor::new(table))
            .unwrap();

        let sunspot = index.column(IndexColumn::SunspotNumber).values();
        assert!(sunspot[0].is_nan());
        assert_eq!(sunspot[1], 87.0);

        let lyman_alpha = index.column(IndexColumn::LymanAlpha).values();
        assert!(lyman_alpha[0].is_nan());
        assert_eq!(lyman_alpha[1], 5.80);
        assert_eq!(index.f107().valid_count(), 2);
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let reader = OmniReader::new("omni.txt");

        let err = reader
            .parse(Cursor::new("2002 1 0 221 227.2 5.77\n2002 2 0 234\n"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Parse { line: 2, .. }));

        let err = reader
            .parse(Cursor::new("2002 1 0 abc 227.2 5.77\n"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Parse { line: 1, .. }));

        let err = reader
            .parse(Cursor::new("2002 366 0 100 150.0 5.0\n"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_unordered_rows() {
        let reader = OmniReader::new("omni.txt");
        let err = reader
            .parse(Cursor::new("2002 2 0 1 150.0 5.0\n2002 1 0 1 150.0 5.0\n"))
            .unwrap_err();
        assert!(matches!(err, ReadError::Data(_)));
    }

    #[test]
    fn test_read_index_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("omni2_daily.txt");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let index = OmniReader::new(&file_path).read_index().unwrap();
        assert_eq!(index.f107().valid_count(), 2);

        let missing = OmniReader::new(dir.path().join("missing.txt")).read_index();
        assert!(matches!(missing, Err(ReadError::Io { .. })));
    }
}
