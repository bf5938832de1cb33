use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::{DataError, FluxMatrix};
use crate::series::{TimeSeries, check_increasing};

/// Distance correction factor to 1 AU.
pub const COR_1AU: &str = "cor_1au";
/// He II 30.4 nm emission-line flux.
pub const HE_II: &str = "he_ii";

/// EUV spectra on a shared wavelength grid, one record per date.
///
/// Every per-date array has exactly one entry per date; missing
/// measurements are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralData {
    dates: Vec<NaiveDate>,
    wavelengths: Vec<f64>,
    flux: FluxMatrix,
    scalars: BTreeMap<String, Vec<f64>>,
    line_wavelengths: Vec<f64>,
    line_flux: FluxMatrix,
}

impl SpectralData {
    pub fn new(
        dates: Vec<NaiveDate>,
        wavelengths: Vec<f64>,
        flux: FluxMatrix,
    ) -> Result<Self, DataError> {
        check_increasing(&dates)?;
        check_shape(dates.len(), wavelengths.len(), &flux)?;

        let line_flux = FluxMatrix::empty(dates.len());
        Ok(Self {
            dates,
            wavelengths,
            flux,
            scalars: BTreeMap::new(),
            line_wavelengths: Vec::new(),
            line_flux,
        })
    }

    /// Adds a named per-date calibration series.
    pub fn with_scalar(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, DataError> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(DataError::ScalarLength {
                name,
                expected: self.dates.len(),
                found: values.len(),
            });
        }

        self.scalars.insert(name, values);
        Ok(self)
    }

    /// Adds the discrete emission-line wavelengths and their per-date flux.
    pub fn with_lines(mut self, wavelengths: Vec<f64>, flux: FluxMatrix) -> Result<Self, DataError> {
        check_shape(self.dates.len(), wavelengths.len(), &flux)?;

        self.line_wavelengths = wavelengths;
        self.line_flux = flux;
        Ok(self)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn flux(&self) -> &FluxMatrix {
        &self.flux
    }

    pub fn line_wavelengths(&self) -> &[f64] {
        &self.line_wavelengths
    }

    pub fn line_flux(&self) -> &FluxMatrix {
        &self.line_flux
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn scalar(&self, name: &str) -> Option<TimeSeries> {
        let values = self.scalars.get(name)?;
        TimeSeries::new(self.dates.clone(), values.clone()).ok()
    }

    /// The 30.4 nm He II line flux, when the archive provided it.
    pub fn he_ii(&self) -> Option<TimeSeries> {
        self.scalar(HE_II)
    }

    /// Pairs any per-date values with this record's dates.
    pub fn series(&self, values: Vec<f64>) -> Result<TimeSeries, DataError> {
        Ok(TimeSeries::new(self.dates.clone(), values)?)
    }
}

fn check_shape(dates: usize, wavelengths: usize, flux: &FluxMatrix) -> Result<(), DataError> {
    if flux.rows() != dates {
        return Err(DataError::RowMismatch {
            dates,
            rows: flux.rows(),
        });
    }
    if flux.columns() != wavelengths {
        return Err(DataError::ColumnMismatch {
            wavelengths,
            columns: flux.columns(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|d| NaiveDate::from_yo_opt(2008, d).expect("Invalid date"))
            .collect()
    }

    #[test]
    fn test_new_checks_shape() {
        let flux = FluxMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();

        assert!(SpectralData::new(dates(2), vec![10.0, 20.0], flux.clone()).is_ok());
        assert!(matches!(
            SpectralData::new(dates(3), vec![10.0, 20.0], flux.clone()),
            Err(DataError::RowMismatch { dates: 3, rows: 2 })
        ));
        assert!(matches!(
            SpectralData::new(dates(2), vec![10.0], flux),
            Err(DataError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_scalars_and_lines() {
        let flux = FluxMatrix::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        let lines = FluxMatrix::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();

        let data = SpectralData::new(dates(2), vec![30.4], flux)
            .unwrap()
            .with_scalar(HE_II, vec![5.0, f64::NAN])
            .unwrap()
            .with_lines(vec![28.4, 30.4], lines)
            .unwrap();

        let he_ii = data.he_ii().unwrap();
        assert_eq!(he_ii.values()[0], 5.0);
        assert!(he_ii.values()[1].is_nan());
        assert_eq!(data.line_flux().column(1), vec![0.2, 0.4]);
        assert!(data.scalar(COR_1AU).is_none());

        let err = data.clone().with_scalar(COR_1AU, vec![1.0]).unwrap_err();
        assert!(matches!(err, DataError::ScalarLength { .. }));
    }
}
