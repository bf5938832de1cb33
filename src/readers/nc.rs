use std::path::PathBuf;
use tracing::{info, warn};

use super::{FillValue, ReadError, SpectralReader};
use crate::data::{COR_1AU, FluxMatrix, HE_II, SpectralData};
use crate::dates::date_from_yyyyddd;

/// Index of the 30.4 nm He II line in the SEE line list.
pub const HE_II_LINE: usize = 1;

/// Reader for the merged TIMED/SEE level 3 netCDF archive.
pub struct NcReader {
    pub file_name: PathBuf,
    pub fill: FillValue,
}

impl NcReader {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            fill: FillValue::SEE,
        }
    }

    pub fn with_fill(mut self, fill: FillValue) -> Self {
        self.fill = fill;
        self
    }
}

/// Raw SEE variables, first record only, before fill replacement.
#[derive(Debug, Clone, Default)]
pub struct SeeArrays {
    pub dates: Vec<f64>,
    pub wavelengths: Vec<f64>,
    pub flux: Vec<f64>,
    pub cor_1au: Vec<f64>,
    pub line_wavelengths: Vec<f64>,
    pub line_flux: Vec<f64>,
}

impl SeeArrays {
    /// Replaces fill values and checks shapes, returning nothing partial.
    pub fn into_spectra(mut self, fill: FillValue) -> Result<SpectralData, ReadError> {
        let dates = self
            .dates
            .iter()
            .map(|&packed| date_from_yyyyddd(packed).ok_or(ReadError::InvalidDate(packed)))
            .collect::<Result<Vec<_>, _>>()?;

        for values in [
            &mut self.wavelengths,
            &mut self.flux,
            &mut self.cor_1au,
            &mut self.line_wavelengths,
            &mut self.line_flux,
        ] {
            fill.replace_fill(values);
        }

        let flux = flat_matrix("SP_FLUX", self.flux, dates.len(), self.wavelengths.len())?;
        let line_flux = flat_matrix(
            "LINE_FLUX",
            self.line_flux,
            dates.len(),
            self.line_wavelengths.len(),
        )?;

        let he_ii = (line_flux.columns() > HE_II_LINE).then(|| line_flux.column(HE_II_LINE));

        let mut data = SpectralData::new(dates, self.wavelengths, flux)?
            .with_scalar(COR_1AU, self.cor_1au)?
            .with_lines(self.line_wavelengths, line_flux)?;

        match he_ii {
            Some(values) => data = data.with_scalar(HE_II, values)?,
            None => warn!("SEE archive lists no He II line"),
        }

        Ok(data)
    }
}

fn flat_matrix(
    name: &str,
    values: Vec<f64>,
    rows: usize,
    columns: usize,
) -> Result<FluxMatrix, ReadError> {
    if values.len() != rows * columns {
        return Err(ReadError::VariableShape {
            name: name.to_string(),
            expected: format!("[{}, {}]", rows, columns),
            found: vec![values.len()],
        });
    }

    if columns == 0 {
        Ok(FluxMatrix::empty(rows))
    } else {
        Ok(FluxMatrix::from_flat(values, columns)?)
    }
}

impl SpectralReader for NcReader {
    fn read_spectra(&self) -> Result<SpectralData, ReadError> {
        info!("Reading SEE archive {}", self.file_name.display());
        let arrays = self.read_arrays()?;
        let data = arrays.into_spectra(self.fill)?;
        info!(
            "Loaded {} spectra on {} wavelengths",
            data.len(),
            data.wavelengths().len()
        );
        Ok(data)
    }
}

#[cfg(feature = "netcdf")]
impl NcReader {
    fn read_arrays(&self) -> Result<SeeArrays, ReadError> {
        let file =
            netcdf::open(&self.file_name).map_err(|e| ReadError::NetCdf(e.to_string()))?;

        Ok(SeeArrays {
            dates: first_record(&file, "DATE")?,
            wavelengths: first_record(&file, "SP_WAVE")?,
            flux: first_record(&file, "SP_FLUX")?,
            cor_1au: first_record(&file, "COR_1AU")?,
            line_wavelengths: first_record(&file, "LINEWAVE")?,
            line_flux: first_record(&file, "LINE_FLUX")?,
        })
    }
}

#[cfg(not(feature = "netcdf"))]
impl NcReader {
    fn read_arrays(&self) -> Result<SeeArrays, ReadError> {
        Err(ReadError::Unsupported(format!(
            "{} needs the `netcdf` feature",
            self.file_name.display()
        )))
    }
}

/// Values of the leading record `[0, ...]` of a SEE variable.
#[cfg(feature = "netcdf")]
fn first_record(file: &netcdf::File, name: &str) -> Result<Vec<f64>, ReadError> {
    let variable = file
        .variable(name)
        .ok_or_else(|| ReadError::MissingVariable(name.to_string()))?;

    let shape: Vec<usize> = variable.dimensions().iter().map(|d| d.len()).collect();
    let (&records, rest) = shape.split_first().ok_or_else(|| ReadError::VariableShape {
        name: name.to_string(),
        expected: "[1, ...]".to_string(),
        found: shape.clone(),
    })?;

    if records == 0 {
        return Err(ReadError::VariableShape {
            name: name.to_string(),
            expected: "[1, ...]".to_string(),
            found: shape.clone(),
        });
    }

    let mut values = variable
        .get_values::<f64, _>(..)
        .map_err(|e| ReadError::NetCdf(format!("{}: {}", name, e)))?;
    values.truncate(rest.iter().product());

    Ok(values)
}
