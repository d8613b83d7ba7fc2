use std::{error::Error, fmt::Display, ops::Index};

use serde::{Deserialize, Serialize};

pub use atom::*;
pub use connectivity::Connectivity;
pub use trajectory::Trajectory;
pub use units::*;


pub mod atom;
pub mod connectivity;
mod mol_traits;
pub mod trajectory;
pub mod units;
pub mod weights;

use nalgebra as na;

pub type Vec3 = na::Vector3<f64>;

/// build an [Atoms] in Å from lines of element symbols and coordinates
#[macro_export]
macro_rules! atoms {
    ($($num:ident $x:literal $y:literal $z:literal)+) => {
	$crate::Atoms::new(vec![
	    $($crate::Atom::new_from_label(stringify!($num), $x, $y, $z)
	      .expect("unknown atomic symbol"),)*
	    ], $crate::Unit::Angstrom)
    };
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AtomsError {
    UnknownSymbol(String),
    ParseFloat(String),
    WrongFieldCount(String),
    /// a frame of a trajectory ended before its advertised number of atoms
    TruncatedFrame { frame: usize, want: usize, got: usize },
    ParseCount(String),
    IndexOutOfBounds { index: usize, len: usize },
}

impl Display for AtomsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for AtomsError {}

/// the ordered atomic numbers of a geometry. two geometries with the same
/// signature describe the same system with the same atom ordering
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub struct Signature(pub Vec<usize>);

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<_> =
            self.0.iter().map(|&n| NUMBER_TO_SYMBOL[n]).collect();
        write!(f, "[{}]", labels.join(" "))
    }
}

/// An ordered collection of atoms. The order is significant: atom indices are
/// the 0-based positions in `atoms`, matching the order of the source geometry
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Atoms {
    pub atoms: Vec<Atom>,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connectivity: Option<Connectivity>,
}

impl Atoms {
    pub fn new(atoms: Vec<Atom>, unit: Unit) -> Self {
        Self {
            atoms,
            unit,
            connectivity: None,
        }
    }

    /// build an `Atoms` from a slice of coordinates and a slice of
    /// atomic_numbers
    pub fn from_slices(
        atomic_numbers: &[usize],
        coords: &[f64],
        unit: Unit,
    ) -> Self {
        assert_eq!(3 * atomic_numbers.len(), coords.len());
        let atoms = coords
            .chunks_exact(3)
            .zip(atomic_numbers)
            .map(|(c, &n)| Atom::new(n, c[0], c[1], c[2]))
            .collect();
        Self::new(atoms, unit)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Atom, AtomsError> {
        self.atoms.get(index).ok_or(AtomsError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// the display name of atom `i`: its element symbol followed by its
    /// 1-based index, like `O1`
    pub fn name(&self, i: usize) -> String {
        format!("{}{}", self[i].label(), i + 1)
    }

    pub fn names(&self) -> Vec<String> {
        (0..self.len()).map(|i| self.name(i)).collect()
    }

    /// the 0-based index of the atom with display name `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        (0..self.len()).find(|&i| self.name(i) == name)
    }

    pub fn signature(&self) -> Signature {
        Signature(self.atoms.iter().map(|a| a.atomic_number).collect())
    }

    /// return the atomic numbers of each atoms as a vector
    pub fn atomic_numbers(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.atomic_number).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.atoms.iter().map(Atom::weight).collect()
    }

    /// the position of atom `i` in the units of `self`
    pub fn coord(&self, i: usize) -> Vec3 {
        self[i].coord()
    }

    /// the position of atom `i` converted to `unit`
    pub fn coord_in(&self, i: usize, unit: Unit) -> Vec3 {
        self.unit.factor_to(unit) * self.coord(i)
    }

    /// the distance between atoms `i` and `j` in the units of `self`
    pub fn dist(&self, i: usize, j: usize) -> f64 {
        (self.coord(j) - self.coord(i)).magnitude()
    }

    /// convert the coordinates in `self` to `unit`
    pub fn convert_to(&mut self, unit: Unit) {
        let fac = self.unit.factor_to(unit);
        for atom in self.atoms.iter_mut() {
            atom.x *= fac;
            atom.y *= fac;
            atom.z *= fac;
        }
        self.unit = unit;
    }

    /// convert the coordinates in `self` from Angstroms to Bohr
    pub fn to_bohr(&mut self) {
        self.convert_to(Unit::Bohr)
    }

    /// convert the coordinates in `self` from Bohr to Angstroms
    pub fn to_angstrom(&mut self) {
        self.convert_to(Unit::Angstrom)
    }

    /// translate each of the atoms in `self` by vec
    pub fn translate(&mut self, vec: Vec3) -> &mut Self {
        for atom in self.atoms.iter_mut() {
            *atom += vec;
        }
        self
    }

    /// apply the transformation matrix `mat` to the atoms in `self` and return
    /// the new `Atoms`. connectivity is preserved since rigid transformations
    /// do not change bond lengths
    pub fn transform(&self, mat: na::Matrix3<f64>) -> Self {
        let atoms = self
            .atoms
            .iter()
            .map(|a| {
                let v = mat * a.coord();
                Atom {
                    x: v[0],
                    y: v[1],
                    z: v[2],
                    ..*a
                }
            })
            .collect();
        Self {
            atoms,
            unit: self.unit,
            connectivity: self.connectivity.clone(),
        }
    }

    pub fn connectivity(&self) -> Option<&Connectivity> {
        self.connectivity.as_ref()
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.connectivity = Some(connectivity);
    }

    /// compute the connectivity of `self` from covalent radii using
    /// `tolerance` as described in [Connectivity::from_distances] and attach
    /// it to `self`
    #[must_use]
    pub fn with_connectivity(mut self, tolerance: f64) -> Self {
        let conn = Connectivity::from_distances(&self, tolerance);
        self.connectivity = Some(conn);
        self
    }

    /// the indices of the atoms bonded to atom `i`, or None if no
    /// connectivity has been attached
    pub fn bonded(&self, i: usize) -> Option<&[usize]> {
        self.connectivity.as_ref().map(|c| c.bonded(i))
    }
}

impl Index<usize> for Atoms {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

impl<'a> IntoIterator for &'a Atoms {
    type Item = &'a Atom;

    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
