//! Derived solar EUV indices from TIMED/SEE spectra, compared against daily
//! geophysical indices such as F10.7.
//!
//! The pipeline integrates each spectrum against photoionization
//! cross-sections ([`integrator`]), lines the resulting power series up with
//! the reference index ([`series`]) and correlates the two ([`correlation`]).
//! [`analysis::IndexComparison`] runs the whole thing from a [`Config`].

pub mod analysis;
pub mod config;
pub mod correlation;
pub mod cross_section;
pub mod data;
pub mod dates;
pub mod error;
pub mod integrator;
pub mod readers;
pub mod series;

pub use config::Config;
pub use error::Error;
