use serde::Serialize;
use tracing::{debug, info, warn};

use super::{AnalysisError, ComparisonReport, compare};
use crate::Error;
use crate::config::Config;
use crate::cross_section::{CrossSectionTable, Species};
use crate::data::{ReferenceIndex, SpectralData};
use crate::integrator::{LINE_TOLERANCE, integrate_spectra, integrate_spectra_lines};
use crate::readers::{create_index_reader, create_spectral_reader};
use crate::series::TimeSeries;

/// Everything one run produced, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub cross_section_table: String,
    pub table_version: u32,
    pub reference: String,
    /// Calendar days absent from the reference table.
    pub reference_missing_days: usize,
    pub comparisons: Vec<ComparisonReport>,
}

/// Compares each configured proxy (species bin and line power, He II flux)
/// against the reference index.
#[derive(Debug)]
pub struct IndexComparison {
    config: Config,
}

impl IndexComparison {
    pub fn new(config: Config) -> Self {
        IndexComparison { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads both sources named by the configuration and runs the comparison.
    pub fn run(&self) -> Result<RunReport, Error> {
        let table = self.config.cross_section_table()?;

        let euv = self.config.euv();
        let spectra = create_spectral_reader(euv.path()?, euv.fill())?.read_spectra()?;

        let omni = self.config.omni();
        let index = create_index_reader(omni.path()?, omni.fill())?.read_index()?;

        self.run_with(&spectra, &index, &table)
    }

    /// Runs the comparison on data already in memory.
    pub fn run_with(
        &self,
        spectra: &SpectralData,
        index: &ReferenceIndex,
        table: &CrossSectionTable,
    ) -> Result<RunReport, Error> {
        let config = &self.config;
        let (start, end) = (config.start_date(), config.end_date());

        let reference_missing_days = index.missing_days();
        if reference_missing_days > 0 {
            warn!("Reference table is missing {} days", reference_missing_days);
        }

        let column = config.reference();
        let reference = index.column(column).between(start, end);
        let reference_name = column.to_string();
        debug!(
            "{} has {} valid samples of {}",
            reference_name,
            reference.valid_count(),
            reference.len()
        );

        let mut comparisons = Vec::new();

        for species in config.species() {
            let name = species
                .parse::<Species>()
                .map(|s| s.to_string())
                .unwrap_or_else(|_| species.clone());

            let power = integrate_spectra(spectra, species, table)?
                .scaled(config.power_scale())
                .between(start, end);
            comparisons.push(self.compare_proxy(&format!("{} power", name), &power, &reference)?);

            if table.lines(species).is_some_and(|lines| !lines.is_empty()) {
                let line_power =
                    integrate_spectra_lines(spectra, species, table, LINE_TOLERANCE)?
                        .scaled(config.power_scale())
                        .between(start, end);
                comparisons.push(self.compare_proxy(
                    &format!("{} line power", name),
                    &line_power,
                    &reference,
                )?);
            }
        }

        if config.include_he_ii() {
            let he_ii = spectra
                .he_ii()
                .ok_or_else(|| AnalysisError::MissingProxy("He II".to_string()))?
                .between(start, end);

            comparisons.push(self.compare_proxy("He II", &he_ii, &reference)?);
        }

        Ok(RunReport {
            cross_section_table: table.name().to_string(),
            table_version: table.version(),
            reference: reference_name,
            reference_missing_days,
            comparisons,
        })
    }
}

impl IndexComparison {
    fn compare_proxy(
        &self,
        proxy_name: &str,
        proxy: &TimeSeries,
        reference: &TimeSeries,
    ) -> Result<ComparisonReport, AnalysisError> {
        let column = self.config.reference().to_string();
        info!("Comparing {} with {}", proxy_name, column);

        let report = compare(
            proxy_name,
            proxy,
            &column,
            reference,
            self.config.window(),
            self.config.lower_limit(),
        )?;
        log_report(&report);
        Ok(report)
    }
}

fn log_report(report: &ComparisonReport) {
    match report.raw.correlation() {
        Some(c) => info!(
            "{}: r = {:.3} (p = {:.3e}) over {} of {} days",
            report.proxy, c.r, c.p, c.samples, report.aligned_samples
        ),
        None => warn!("{}: raw correlation undefined", report.proxy),
    }
}
