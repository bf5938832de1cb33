//! Spectral-bin integration of EUV flux against photoionization
//! cross-sections.
//!
//! For every bin `[lower, upper)` of a species the flux of the grid columns
//! falling inside the bin is summed, weighted by the bin area and a fixed
//! 1 nm bin width, and accumulated into that date's power.

use std::ops::Range;
use tracing::debug;

use crate::cross_section::{CrossSectionBin, CrossSectionTable};
use crate::data::{DataError, FluxMatrix, SpectralData};
use crate::series::TimeSeries;

/// Width applied to every bin, in nm.
pub const BIN_WIDTH: f64 = 1.0;

/// Default half-width used to match grid wavelengths to emission lines, in nm.
pub const LINE_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    #[error("unknown species '{species}' in cross-section table '{table}'")]
    UnknownSpecies { species: String, table: String },
    #[error("wavelength grid must be finite and strictly increasing, offending value {value} at index {index}")]
    WavelengthGrid { index: usize, value: f64 },
    #[error("flux has {columns} columns for {wavelengths} wavelengths")]
    ShapeMismatch { wavelengths: usize, columns: usize },
    #[error("species '{0}' has no emission lines")]
    NoEmissionLines(String),
    #[error("line tolerance must be positive, got {0}")]
    Tolerance(f64),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Power per date for `species`, one value per flux row.
pub fn integrate(
    species: &str,
    wavelengths: &[f64],
    flux: &FluxMatrix,
    table: &CrossSectionTable,
) -> Result<Vec<f64>, IntegrationError> {
    let bins = table
        .bins(species)
        .ok_or_else(|| IntegrationError::UnknownSpecies {
            species: species.to_string(),
            table: table.name().to_string(),
        })?;
    check_grid(wavelengths, flux)?;

    let ranges: Vec<(Range<usize>, f64)> = bins
        .iter()
        .map(|bin| (bin_columns(wavelengths, bin), bin.area))
        .collect();

    let empty = ranges.iter().filter(|(columns, _)| columns.is_empty()).count();
    if empty > 0 {
        debug!(
            "{} of {} '{}' bins cover no grid wavelength",
            empty,
            ranges.len(),
            species
        );
    }

    Ok(flux
        .iter_rows()
        .map(|row| {
            let mut power = 0.0;
            for (columns, area) in &ranges {
                let in_bin: f64 = row[columns.clone()].iter().sum();
                power += in_bin * area * BIN_WIDTH;
            }
            power
        })
        .collect())
}

/// Emission-line contribution per date: flux of grid columns within
/// `tolerance` nm of each line center, weighted by the line area.
pub fn integrate_lines(
    species: &str,
    wavelengths: &[f64],
    flux: &FluxMatrix,
    table: &CrossSectionTable,
    tolerance: f64,
) -> Result<Vec<f64>, IntegrationError> {
    if !table.contains(species) {
        return Err(IntegrationError::UnknownSpecies {
            species: species.to_string(),
            table: table.name().to_string(),
        });
    }
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(IntegrationError::Tolerance(tolerance));
    }

    let lines = table
        .lines(species)
        .filter(|lines| !lines.is_empty())
        .ok_or_else(|| IntegrationError::NoEmissionLines(species.to_string()))?;
    check_grid(wavelengths, flux)?;

    let matches: Vec<(Vec<usize>, f64)> = lines
        .iter()
        .map(|line| {
            let columns = wavelengths
                .iter()
                .enumerate()
                .filter(|(_, w)| (*w - line.center).abs() < tolerance)
                .map(|(i, _)| i)
                .collect();
            (columns, line.area)
        })
        .collect();

    Ok(flux
        .iter_rows()
        .map(|row| {
            let mut power = 0.0;
            for (columns, area) in &matches {
                let on_line: f64 = columns.iter().map(|&i| row[i]).sum();
                power += on_line * area;
            }
            power
        })
        .collect())
}

/// [`integrate`] over a spectral record, keeping its dates.
pub fn integrate_spectra(
    data: &SpectralData,
    species: &str,
    table: &CrossSectionTable,
) -> Result<TimeSeries, IntegrationError> {
    let power = integrate(species, data.wavelengths(), data.flux(), table)?;
    Ok(data.series(power)?)
}

/// [`integrate_lines`] over a spectral record, keeping its dates.
pub fn integrate_spectra_lines(
    data: &SpectralData,
    species: &str,
    table: &CrossSectionTable,
    tolerance: f64,
) -> Result<TimeSeries, IntegrationError> {
    let power = integrate_lines(species, data.wavelengths(), data.flux(), table, tolerance)?;
    Ok(data.series(power)?)
}

fn check_grid(wavelengths: &[f64], flux: &FluxMatrix) -> Result<(), IntegrationError> {
    if let Some((index, &value)) = wavelengths.iter().enumerate().find(|(_, w)| !w.is_finite()) {
        return Err(IntegrationError::WavelengthGrid { index, value });
    }
    if let Some(index) = wavelengths.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(IntegrationError::WavelengthGrid {
            index: index + 1,
            value: wavelengths[index + 1],
        });
    }
    if flux.columns() != wavelengths.len() {
        return Err(IntegrationError::ShapeMismatch {
            wavelengths: wavelengths.len(),
            columns: flux.columns(),
        });
    }
    Ok(())
}

/// Grid columns with `lower <= w < upper` on a strictly increasing grid.
fn bin_columns(wavelengths: &[f64], bin: &CrossSectionBin) -> Range<usize> {
    let start = wavelengths.partition_point(|&w| w < bin.lower);
    let end = wavelengths.partition_point(|&w| w < bin.upper);
    start..end.max(start)
}
