//! Atomic local frames (ALFs) and the features built on them.
//!
//! An ALF fixes a right-handed frame on one atom from two other atoms of the
//! same geometry: the x-axis atom and the xy-plane atom. From the ALF we build
//! the rotation matrix C taking global displacements into the local frame and
//! the 3N-6 internal-coordinate features used to train atomic models.

use std::{error::Error, fmt::Display};

use atoms::{Atoms, Signature, Unit};
use serde::{Deserialize, Serialize};

pub mod cache;
pub mod cip;
pub mod cmatrix;
pub mod config;
pub mod features;
pub mod sequence;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use cache::{AlfCache, SystemAlf};
pub use cmatrix::c_matrix;
pub use features::{features, features_to_coordinates};
pub use trajectory::{AtomFrame, trajectory_features};

use nalgebra as na;

pub type Vec3 = na::Vector3<f64>;
pub type Mat3 = na::Matrix3<f64>;

/// The atomic local frame of atom `origin`. `xy_plane` is None only for
/// diatomic geometries, where no plane is defined
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub struct Alf {
    pub origin: usize,
    pub x_axis: usize,
    pub xy_plane: Option<usize>,
}

impl Alf {
    pub const fn new(
        origin: usize,
        x_axis: usize,
        xy_plane: Option<usize>,
    ) -> Self {
        Self {
            origin,
            x_axis,
            xy_plane,
        }
    }

    /// report whether atom `i` is one of the atoms defining `self`
    pub fn contains(&self, i: usize) -> bool {
        self.origin == i || self.x_axis == i || self.xy_plane == Some(i)
    }

    /// the defining atoms of `self` in the order origin, x-axis, xy-plane
    pub fn indices(&self) -> Vec<usize> {
        let mut ret = vec![self.origin, self.x_axis];
        ret.extend(self.xy_plane);
        ret
    }

    /// check `self` against a geometry of `n_atoms` atoms: every index must be
    /// in bounds, the indices must be distinct, and `xy_plane` must be absent
    /// exactly when `n_atoms` is 2
    pub fn check(&self, n_atoms: usize) -> Result<(), AlfError> {
        if n_atoms < 2 {
            return Err(AlfError::TooFewAtoms(n_atoms));
        }
        for index in self.indices() {
            if index >= n_atoms {
                return Err(AlfError::IndexOutOfBounds {
                    index,
                    len: n_atoms,
                });
            }
        }
        let invalid = |reason| AlfError::InvalidAlf { alf: *self, reason };
        if self.origin == self.x_axis
            || self.xy_plane == Some(self.origin)
            || self.xy_plane == Some(self.x_axis)
        {
            return Err(invalid("repeated atom"));
        }
        match (n_atoms, self.xy_plane) {
            (2, Some(_)) => Err(invalid("xy-plane atom in a diatomic")),
            (2, None) => Ok(()),
            (_, None) => Err(invalid("missing xy-plane atom")),
            (_, Some(_)) => Ok(()),
        }
    }

    /// [Alf::check] against the size of `atoms`
    pub fn validate(&self, atoms: &Atoms) -> Result<(), AlfError> {
        self.check(atoms.len())
    }
}

impl Display for Alf {
    /// write `self` with 1-based indices, like `ALF(1, 2, 3)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ALF({}, {}", self.origin + 1, self.x_axis + 1)?;
        if let Some(xy) = self.xy_plane {
            write!(f, ", {}", xy + 1)?;
        }
        write!(f, ")")
    }
}

/// The strategy used to pick the atoms of an [Alf]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum AlfMethod {
    /// use neighbors in the atom ordering. only meaningful when every frame
    /// shares the same ordering
    #[default]
    #[serde(alias = "sequence")]
    Sequence,

    /// use Cahn-Ingold-Prelog style mass priorities over the bonding graph.
    /// requires connectivity
    #[serde(alias = "cip", alias = "CIP")]
    Cip,
}

impl AlfMethod {
    pub fn calculate(self, atoms: &Atoms, i: usize) -> Result<Alf, AlfError> {
        let alf = match self {
            AlfMethod::Sequence => sequence::calculate_alf(atoms, i)?,
            AlfMethod::Cip => cip::calculate_alf(atoms, i)?,
        };
        log::debug!("{self} {} for {}", alf, atoms.name(i));
        Ok(alf)
    }
}

impl Display for AlfMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlfMethod::Sequence => write!(f, "sequence"),
            AlfMethod::Cip => write!(f, "cip"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AlfError {
    /// an ALF needs at least two atoms
    TooFewAtoms(usize),
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    InvalidAlf {
        alf: Alf,
        reason: &'static str,
    },
    /// the CIP strategy was requested on a geometry without bonds
    ConnectivityRequired,
    /// no bonded or second-shell neighbor is left to complete the ALF of
    /// `atom`
    NoCandidates {
        atom: String,
    },
    CoincidentAtoms {
        a: String,
        b: String,
    },
    CollinearAlf {
        atom: String,
        alf: Alf,
    },
    SignatureMismatch {
        want: Signature,
        got: Signature,
    },
    FeatureLength {
        want: usize,
        got: usize,
    },
}

impl Display for AlfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlfError::TooFewAtoms(n) => {
                write!(f, "an ALF needs at least 2 atoms, found {n}")
            }
            AlfError::IndexOutOfBounds { index, len } => write!(
                f,
                "atom index {index} out of bounds for {len} atoms"
            ),
            AlfError::InvalidAlf { alf, reason } => {
                write!(f, "invalid {alf}: {reason}")
            }
            AlfError::ConnectivityRequired => write!(
                f,
                "connectivity required for the cip method but none was given"
            ),
            AlfError::NoCandidates { atom } => {
                write!(
                    f,
                    "no candidate atoms left to complete the ALF of {atom}"
                )
            }
            AlfError::CoincidentAtoms { a, b } => {
                write!(f, "atoms {a} and {b} are coincident")
            }
            AlfError::CollinearAlf { atom, alf } => {
                write!(f, "{alf} of {atom} is collinear")
            }
            AlfError::SignatureMismatch { want, got } => write!(
                f,
                "geometry {got} does not match the system signature {want}"
            ),
            AlfError::FeatureLength { want, got } => {
                write!(f, "expected {want} features, got {got}")
            }
        }
    }
}

impl Error for AlfError {}

/// the number of features for a geometry of `n_atoms` atoms: 1 for a
/// diatomic and 3N-6 otherwise
pub const fn n_features(n_atoms: usize) -> usize {
    if n_atoms == 2 {
        1
    } else {
        (3 * n_atoms).saturating_sub(6)
    }
}

/// check that `i` addresses an atom of `atoms` and that there are enough atoms
/// for an ALF
pub(crate) fn check_atom(atoms: &Atoms, i: usize) -> Result<(), AlfError> {
    if atoms.len() < 2 {
        return Err(AlfError::TooFewAtoms(atoms.len()));
    }
    if i >= atoms.len() {
        return Err(AlfError::IndexOutOfBounds {
            index: i,
            len: atoms.len(),
        });
    }
    Ok(())
}

/// compute the ALF of atom `i` in `atoms` with `method`
pub fn compute_alf(
    atoms: &Atoms,
    i: usize,
    method: AlfMethod,
) -> Result<Alf, AlfError> {
    method.calculate(atoms, i)
}

/// build the C matrix of `alf` in `atoms`
pub fn compute_c_matrix(atoms: &Atoms, alf: &Alf) -> Result<Mat3, AlfError> {
    c_matrix(atoms, alf)
}

/// compute the features of `alf` in `atoms` using the C matrix `c`, with
/// distances in `unit`
pub fn compute_features(
    atoms: &Atoms,
    alf: &Alf,
    c: &Mat3,
    unit: Unit,
) -> Result<Vec<f64>, AlfError> {
    features(atoms, alf, c, unit)
}

/// compute the ALF of atom `i`, its C matrix, and its features in one step
pub fn calculate_features(
    atoms: &Atoms,
    i: usize,
    method: AlfMethod,
    unit: Unit,
) -> Result<Vec<f64>, AlfError> {
    let alf = method.calculate(atoms, i)?;
    let c = c_matrix(atoms, &alf)?;
    features(atoms, &alf, &c, unit)
}
