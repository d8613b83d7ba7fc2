//! Rotation of atomic multipole moments between frames.
//!
//! Spherical moments follow the AIMAll convention of real, Racah-normalized
//! regular solid harmonics C_lm. For each rank l the equivalent Cartesian
//! tensor T is traceless and symmetric, and for any unit vector n
//!
//!   T_{a1..al} n_a1 ⋯ n_al = Σ_m q_lm C_lm(n)
//!
//! so rotating T by a matrix C and projecting back gives the moments in the
//! rotated frame. The monopole q00 is frame invariant and is never rotated.

use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{Debug, Display},
};

use serde::{Deserialize, Serialize};

mod consts;
pub mod dipole;
pub mod hexadecapole;
pub mod octupole;
pub mod quadrupole;
pub mod tensor;

#[cfg(test)]
mod tests;

pub use tensor::CartesianTensor;

use nalgebra as na;

pub type Mat3 = na::Matrix3<f64>;

/// the standard names of the spherical multipole components through rank 4
pub const MULTIPOLE_NAMES: [&str; 25] = [
    "q00", "q10", "q11c", "q11s", "q20", "q21c", "q21s", "q22c", "q22s",
    "q30", "q31c", "q31s", "q32c", "q32s", "q33c", "q33s", "q40", "q41c",
    "q41s", "q42c", "q42s", "q43c", "q43s", "q44c", "q44s",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub enum Rank {
    Dipole = 1,
    Quadrupole = 2,
    Octupole = 3,
    Hexadecapole = 4,
}

impl Rank {
    pub const ALL: [Rank; 4] =
        [Rank::Dipole, Rank::Quadrupole, Rank::Octupole, Rank::Hexadecapole];

    /// the angular momentum quantum number l
    pub const fn order(self) -> usize {
        self as usize
    }

    pub fn from_order(l: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.order() == l)
    }

    /// 2l + 1
    pub const fn n_components(self) -> usize {
        2 * self.order() + 1
    }

    /// offset of this rank's first component in [MULTIPOLE_NAMES]
    const fn offset(self) -> usize {
        self.order() * self.order()
    }

    /// the names of the spherical components of `self`, in the order the
    /// per-rank conversions expect them
    pub fn components(self) -> &'static [&'static str] {
        &MULTIPOLE_NAMES[self.offset()..self.offset() + self.n_components()]
    }

    /// convert the spherical components in `q` to the equivalent Cartesian
    /// tensor of rank `self`
    pub fn spherical_to_cartesian(
        self,
        q: &[f64],
    ) -> Result<CartesianTensor, MultipoleError> {
        let wrong = || MultipoleError::WrongLength {
            rank: self,
            got: q.len(),
        };
        Ok(match self {
            Rank::Dipole => dipole::spherical_to_cartesian(
                q.try_into().map_err(|_| wrong())?,
            ),
            Rank::Quadrupole => quadrupole::spherical_to_cartesian(
                q.try_into().map_err(|_| wrong())?,
            ),
            Rank::Octupole => octupole::spherical_to_cartesian(
                q.try_into().map_err(|_| wrong())?,
            ),
            Rank::Hexadecapole => hexadecapole::spherical_to_cartesian(
                q.try_into().map_err(|_| wrong())?,
            ),
        })
    }

    /// project the Cartesian tensor `t` onto the spherical components of
    /// `self`
    pub fn cartesian_to_spherical(
        self,
        t: &CartesianTensor,
    ) -> Result<Vec<f64>, MultipoleError> {
        if t.rank() != self.order() {
            return Err(MultipoleError::WrongRank {
                want: self.order(),
                got: t.rank(),
            });
        }
        Ok(match self {
            Rank::Dipole => dipole::cartesian_to_spherical(t).to_vec(),
            Rank::Quadrupole => quadrupole::cartesian_to_spherical(t).to_vec(),
            Rank::Octupole => octupole::cartesian_to_spherical(t).to_vec(),
            Rank::Hexadecapole => {
                hexadecapole::cartesian_to_spherical(t).to_vec()
            }
        })
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Dipole => "dipole",
                Rank::Quadrupole => "quadrupole",
                Rank::Octupole => "octupole",
                Rank::Hexadecapole => "hexadecapole",
            }
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum MultipoleError {
    /// a component needed for a rotation was not provided
    Missing(String),
    UnknownName(String),
    NonFinite { name: String, value: f64 },
    WrongLength { rank: Rank, got: usize },
    WrongRank { want: usize, got: usize },
}

impl Display for MultipoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipoleError::Missing(name) => {
                write!(f, "multipole component {name} is missing")
            }
            MultipoleError::UnknownName(name) => {
                write!(f, "unknown multipole component {name}")
            }
            MultipoleError::NonFinite { name, value } => {
                write!(f, "multipole component {name} is not finite: {value}")
            }
            MultipoleError::WrongLength { rank, got } => write!(
                f,
                "expected {} {rank} components, got {got}",
                rank.n_components()
            ),
            MultipoleError::WrongRank { want, got } => {
                write!(f, "expected a rank {want} tensor, got rank {got}")
            }
        }
    }
}

impl Error for MultipoleError {}

/// rotate the spherical components `q` of `rank` by `c`: convert to the
/// Cartesian tensor, contract every axis with `c`, and project back
pub fn rotate_rank(
    rank: Rank,
    q: &[f64],
    c: &Mat3,
) -> Result<Vec<f64>, MultipoleError> {
    let t = rank.spherical_to_cartesian(q)?;
    rank.cartesian_to_spherical(&t.rotate(c))
}

/// rotate only the components of `rank` in `record` by `c`, returning a copy
/// of `record` with that rank replaced. every component of `rank` must be
/// present
pub fn rotate_multipoles(
    record: &Multipoles,
    c: &Mat3,
    rank: Rank,
) -> Result<Multipoles, MultipoleError> {
    let q = record.rank_values(rank)?;
    let mut ret = record.clone();
    ret.set_rank(rank, &rotate_rank(rank, &q, c)?)?;
    Ok(ret)
}

/// A record of the spherical multipole moments of one atom, any of which may
/// be absent. Serialized as a map from component name to value
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct Multipoles {
    values: [Option<f64>; 25],
}

fn position(name: &str) -> Result<usize, MultipoleError> {
    MULTIPOLE_NAMES
        .iter()
        .position(|&n| n == name)
        .ok_or_else(|| MultipoleError::UnknownName(name.to_owned()))
}

impl Multipoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, MultipoleError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut ret = Self::new();
        for (name, value) in pairs {
            ret.set(name.as_ref(), value)?;
        }
        Ok(ret)
    }

    /// the value of component `name`, if it is a known name and it has been
    /// set
    pub fn get(&self, name: &str) -> Option<f64> {
        position(name).ok().and_then(|i| self.values[i])
    }

    /// set component `name` to `value`. non-finite values are rejected so
    /// that they never reach a rotation
    pub fn set(
        &mut self,
        name: &str,
        value: f64,
    ) -> Result<(), MultipoleError> {
        let i = position(name)?;
        if !value.is_finite() {
            return Err(MultipoleError::NonFinite {
                name: name.to_owned(),
                value,
            });
        }
        self.values[i] = Some(value);
        Ok(())
    }

    pub fn q00(&self) -> Option<f64> {
        self.values[0]
    }

    /// the components of `rank` in order, failing on the first missing one
    pub fn rank_values(&self, rank: Rank) -> Result<Vec<f64>, MultipoleError> {
        rank.components()
            .iter()
            .map(|&name| {
                self.get(name)
                    .ok_or_else(|| MultipoleError::Missing(name.to_owned()))
            })
            .collect()
    }

    /// overwrite the components of `rank` with `values`
    pub fn set_rank(
        &mut self,
        rank: Rank,
        values: &[f64],
    ) -> Result<(), MultipoleError> {
        if values.len() != rank.n_components() {
            return Err(MultipoleError::WrongLength {
                rank,
                got: values.len(),
            });
        }
        for (name, &v) in rank.components().iter().zip(values) {
            self.set(name, v)?;
        }
        Ok(())
    }

    fn has_any(&self, rank: Rank) -> bool {
        rank.components().iter().any(|n| self.get(n).is_some())
    }

    /// the ranks for which every component is present
    pub fn present_ranks(&self) -> Vec<Rank> {
        Rank::ALL
            .into_iter()
            .filter(|&r| self.rank_values(r).is_ok())
            .collect()
    }

    /// rotate every rank present in `self` by `c`. a rank with only some of its
    /// components set is an error, while a rank with none set is skipped.
    /// q00 is copied unchanged
    pub fn rotate(&self, c: &Mat3) -> Result<Self, MultipoleError> {
        let mut ret = Self::new();
        ret.values[0] = self.values[0];
        for rank in Rank::ALL {
            if !self.has_any(rank) {
                continue;
            }
            let q = self.rank_values(rank)?;
            let rotated = rotate_rank(rank, &q, c)?;
            log::trace!("rotated {rank}: {q:?} -> {rotated:?}");
            ret.set_rank(rank, &rotated)?;
        }
        Ok(ret)
    }

    /// rotate global-frame moments into the local frame whose axes are the rows
    /// of `c`
    pub fn to_local(&self, c: &Mat3) -> Result<Self, MultipoleError> {
        self.rotate(c)
    }

    /// rotate local-frame moments defined by `c` back to the global frame
    pub fn to_global(&self, c: &Mat3) -> Result<Self, MultipoleError> {
        self.rotate(&c.transpose())
    }

    /// iterate over the components that are set, in the order of
    /// [MULTIPOLE_NAMES]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        MULTIPOLE_NAMES
            .iter()
            .zip(&self.values)
            .filter_map(|(&n, v)| v.map(|v| (n, v)))
    }
}

impl TryFrom<BTreeMap<String, f64>> for Multipoles {
    type Error = MultipoleError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<Multipoles> for BTreeMap<String, f64> {
    fn from(m: Multipoles) -> Self {
        m.iter().map(|(n, v)| (n.to_owned(), v)).collect()
    }
}

impl Debug for Multipoles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Display for Multipoles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(8);
        for (name, v) in self.iter() {
            writeln!(f, "{name:>5}{v:w$.p$}", w = p + 8)?;
        }
        Ok(())
    }
}
