use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::{
    AtomsError, Vec3,
    weights::{COVALENT_RADII, WEIGHTS},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Atom {
    pub atomic_number: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// overrides the tabulated mass of the most abundant isotope
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl AbsDiffEq for Atom {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    /// atoms are equal when they are the same element and no coordinate
    /// differs by `epsilon` or more
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.atomic_number == other.atomic_number
            && (self.coord() - other.coord()).amax() < epsilon
    }
}

impl Add<Vec3> for Atom {
    type Output = Atom;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for Atom {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Atom {
    type Output = Vec3;

    /// the displacement vector pointing from `rhs` to `self`
    fn sub(self, rhs: Self) -> Self::Output {
        self.coord() - rhs.coord()
    }
}

impl Display for Atom {
    /// one line of an XYZ file, in the units of the owning geometry
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(8);
        let [x, y, z] = [self.x, self.y, self.z];
        write!(f, "{:<3}{x:w$.p$}{y:w$.p$}{z:w$.p$}", self.label(), w = p + 6)
    }
}

impl FromStr for Atom {
    type Err = AtomsError;

    /// parse an Atom from a line like
    ///  C 1.0 1.0 1.0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(AtomsError::WrongFieldCount(s.to_owned()));
        }
        let mut coord = [0.0; 3];
        for (c, field) in coord.iter_mut().zip(&fields[1..]) {
            *c = field
                .parse()
                .map_err(|_| AtomsError::ParseFloat(field.to_string()))?;
        }
        Self::new_from_label(fields[0], coord[0], coord[1], coord[2])
    }
}

pub const NUMBER_TO_SYMBOL: [&str; 55] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe",
];

fn symbol_to_number(s: &str) -> Option<usize> {
    NUMBER_TO_SYMBOL.iter().position(|&x| x == s)
}

fn titlecase(s: &str) -> String {
    let mut cs = s.chars();
    let Some(first) = cs.next() else {
        return String::new();
    };
    let mut ret = first.to_uppercase().to_string();
    for c in cs {
        ret.push_str(&c.to_lowercase().to_string());
    }
    ret
}

impl Atom {
    pub fn new(atomic_number: usize, x: f64, y: f64, z: f64) -> Self {
        Self {
            atomic_number,
            x,
            y,
            z,
            weight: None,
        }
    }

    /// build an Atom from its element symbol, ignoring the case of the symbol
    /// and any trailing digits, so labels like `O1` or `h12` from numbered
    /// geometries are accepted
    pub fn new_from_label(
        atomic_symbol: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, AtomsError> {
        let bare = atomic_symbol.trim_end_matches(|c: char| c.is_ascii_digit());
        let sym = symbol_to_number(bare)
            .or_else(|| symbol_to_number(&titlecase(bare)))
            .filter(|&n| n != 0)
            .ok_or_else(|| {
                AtomsError::UnknownSymbol(atomic_symbol.to_owned())
            })?;
        Ok(Self::new(sym, x, y, z))
    }

    #[inline]
    pub const fn label(&self) -> &str {
        debug_assert!(self.atomic_number != 0 && self.atomic_number < 55);
        NUMBER_TO_SYMBOL[self.atomic_number]
    }

    pub fn coord(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(WEIGHTS[self.atomic_number])
    }

    /// covalent radius in Å
    pub fn covalent_radius(&self) -> f64 {
        COVALENT_RADII[self.atomic_number]
    }
}
