use std::fmt::Display;
use std::str::FromStr;

/// Absorbers tabulated by the built-in coefficient sets.
///
/// Tables are keyed by the short identifier returned from [`Species::as_str`];
/// externally supplied tables may carry other keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Unit cross-section over every bin, i.e. the total integrated flux.
    All,
    AtomicOxygen,
    MolecularNitrogen,
    MolecularOxygen,
}

impl Species {
    pub const BUILT_IN: [Species; 4] = [
        Species::All,
        Species::AtomicOxygen,
        Species::MolecularNitrogen,
        Species::MolecularOxygen,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Species::All => "all",
            Species::AtomicOxygen => "o",
            Species::MolecularNitrogen => "n2",
            Species::MolecularOxygen => "o2",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Species::All => "total",
            Species::AtomicOxygen => "O",
            Species::MolecularNitrogen => "N2",
            Species::MolecularOxygen => "O2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown species '{0}'")]
pub struct SpeciesParseError(pub String);

impl FromStr for Species {
    type Err = SpeciesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::BUILT_IN
            .into_iter()
            .find(|species| species.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpeciesParseError(s.to_string()))
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
