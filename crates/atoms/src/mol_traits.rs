use crate::{Atom, Atoms, AtomsError, Unit};
use approx::AbsDiffEq;
use std::{fmt::Display, str::FromStr};

impl std::fmt::Debug for Atoms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Two `Atoms` are AbsDiffEq if they have the same units and their atoms match
/// pairwise in order. Ordering matters because atom indices carry meaning
impl AbsDiffEq for Atoms {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.unit == other.unit
            && self.len() == other.len()
            && self
                .atoms
                .iter()
                .zip(&other.atoms)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl PartialEq for Atoms {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl FromStr for Atoms {
    type Err = AtomsError;

    /// parse every `Sym x y z` line of `s` into an `Atoms` in Å, skipping
    /// headers, comments and other lines without exactly four fields
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .filter(|line| line.split_whitespace().count() == 4)
            .map(str::parse)
            .collect::<Result<Vec<Atom>, _>>()
            .map(|atoms| Self::new(atoms, Unit::Angstrom))
    }
}

impl Display for Atoms {
    /// one [Atom] line per atom, each terminated by a newline. the formatter
    /// precision is passed through and defaults to 8 digits
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(8);
        self.atoms
            .iter()
            .try_for_each(|atom| writeln!(f, "{atom:.p$}"))
    }
}
