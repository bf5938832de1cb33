use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{CrossSectionTable, TableError};

const RICHARDS_1994: &str = include_str!("../../data/cross_sections/richards1994.json");
const SOLOMON_2005: &str = include_str!("../../data/cross_sections/solomon2005.json");

/// The historical coefficient sets shipped with the crate.
///
/// The two sets disagree on bin boundaries, so results are only comparable
/// between runs that used the same set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CoefficientSet {
    /// Twenty 5 nm bins from 5 to 105 nm, plus O emission lines.
    #[default]
    #[serde(rename = "richards1994")]
    Richards1994,
    /// Seventeen irregular bins from 0.05 to 105 nm.
    #[serde(rename = "solomon2005")]
    Solomon2005,
}

impl CoefficientSet {
    pub const fn as_str(self) -> &'static str {
        match self {
            CoefficientSet::Richards1994 => "richards1994",
            CoefficientSet::Solomon2005 => "solomon2005",
        }
    }

    pub fn table(self) -> Result<CrossSectionTable, TableError> {
        let json = match self {
            CoefficientSet::Richards1994 => RICHARDS_1994,
            CoefficientSet::Solomon2005 => SOLOMON_2005,
        };
        CrossSectionTable::from_json(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coefficient set '{0}', expected richards1994 or solomon2005")]
pub struct CoefficientSetParseError(pub String);

impl FromStr for CoefficientSet {
    type Err = CoefficientSetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "richards1994" => Ok(CoefficientSet::Richards1994),
            "solomon2005" => Ok(CoefficientSet::Solomon2005),
            _ => Err(CoefficientSetParseError(s.to_string())),
        }
    }
}

impl fmt::Display for CoefficientSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_section::Species;

    #[test]
    fn test_built_in_sets_are_well_formed() {
        for set in [CoefficientSet::Richards1994, CoefficientSet::Solomon2005] {
            let table = set.table().unwrap();
            assert_eq!(table.name(), set.as_str());

            for species in Species::BUILT_IN {
                let bins = table.bins(species.as_str()).unwrap();
                assert!(
                    bins.windows(2).all(|pair| pair[0].upper <= pair[1].lower),
                    "{set}/{species} bins overlap"
                );
                assert!(bins.iter().all(|bin| bin.area >= 0.0));
            }
        }
    }

    #[test]
    fn test_richards_bins() {
        let table = CoefficientSet::Richards1994.table().unwrap();
        let bins = table.bins("o").unwrap();

        assert_eq!(bins.len(), 20);
        assert_eq!((bins[0].lower, bins[0].upper), (5.0, 10.0));
        assert_eq!((bins[19].lower, bins[19].upper), (100.0, 105.0));
        assert!((bins[12].area - 17.245e-22).abs() < 1e-30);
        assert_eq!(table.lines("o").map(<[_]>::len), Some(14));
        assert!(table.lines("n2").is_none());
    }

    #[test]
    fn test_solomon_bins() {
        let table = CoefficientSet::Solomon2005.table().unwrap();
        let bins = table.bins("n2").unwrap();

        assert_eq!(bins.len(), 17);
        assert!((bins[0].lower - 0.05).abs() < 1e-12);
        assert_eq!(bins[16].upper, 105.0);
        assert!((bins[3].area - 1.1370e-22).abs() < 1e-30);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Solomon2005".parse::<CoefficientSet>(),
            Ok(CoefficientSet::Solomon2005)
        );
        assert!("euvac".parse::<CoefficientSet>().is_err());
        assert_eq!(CoefficientSet::default(), CoefficientSet::Richards1994);
    }
}
