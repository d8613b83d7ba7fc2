use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Bohr radius in Å, from
/// <https://physics.nist.gov/cgi-bin/cuu/Value?bohrrada0>
pub const ANGBOHR: f64 = 0.529_177_210_903;

#[derive(
    Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize,
)]
pub enum Unit {
    #[default]
    #[serde(alias = "bohr")]
    Bohr,
    #[serde(alias = "angstrom")]
    Angstrom,
}

impl Unit {
    /// the factor to multiply a length in `self` by to obtain the length in
    /// `other`
    pub fn factor_to(self, other: Unit) -> f64 {
        match (self, other) {
            (Unit::Bohr, Unit::Angstrom) => ANGBOHR,
            (Unit::Angstrom, Unit::Bohr) => 1.0 / ANGBOHR,
            _ => 1.0,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Unit::Bohr => "bohr",
                Unit::Angstrom => "angstrom",
            }
        )
    }
}
