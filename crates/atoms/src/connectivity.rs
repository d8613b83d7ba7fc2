use serde::{Deserialize, Serialize};

use crate::{Atoms, AtomsError, Unit};

/// the default scale factor applied to the sum of covalent radii when deciding
/// whether two atoms are bonded
pub const BOND_TOLERANCE: f64 = 1.2;

/// Symmetric bonded-neighbor lists for each atom in a geometry. Neighbor lists
/// are sorted by atom index. Deserialized neighbor lists go through
/// [Connectivity::from_bonds], so out-of-range neighbors are rejected and
/// one-sided bonds are mirrored
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<usize>>")]
pub struct Connectivity(Vec<Vec<usize>>);

impl TryFrom<Vec<Vec<usize>>> for Connectivity {
    type Error = AtomsError;

    fn try_from(neighbors: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        let bonds: Vec<_> = neighbors
            .iter()
            .enumerate()
            .flat_map(|(i, js)| js.iter().map(move |&j| (i, j)))
            .collect();
        Self::from_bonds(neighbors.len(), &bonds)
    }
}

impl Connectivity {
    /// build a `Connectivity` for `n` atoms from explicit pairs of bonded
    /// atoms. duplicate pairs are ignored
    pub fn from_bonds(
        n: usize,
        bonds: &[(usize, usize)],
    ) -> Result<Self, AtomsError> {
        let mut ret = vec![Vec::new(); n];
        for &(i, j) in bonds {
            for index in [i, j] {
                if index >= n {
                    return Err(AtomsError::IndexOutOfBounds { index, len: n });
                }
            }
            if i == j || ret[i].contains(&j) {
                continue;
            }
            ret[i].push(j);
            ret[j].push(i);
        }
        for v in ret.iter_mut() {
            v.sort_unstable();
        }
        Ok(Self(ret))
    }

    /// atoms `i` and `j` are bonded when their separation is less than
    /// `tolerance` times the sum of their covalent radii
    pub fn from_distances(atoms: &Atoms, tolerance: f64) -> Self {
        let n = atoms.len();
        let mut ret = vec![Vec::new(); n];
        for i in 0..n {
            let ri = atoms.coord_in(i, Unit::Angstrom);
            for j in i + 1..n {
                let rj = atoms.coord_in(j, Unit::Angstrom);
                let cutoff = tolerance
                    * (atoms[i].covalent_radius() + atoms[j].covalent_radius());
                if (rj - ri).magnitude() < cutoff {
                    ret[i].push(j);
                    ret[j].push(i);
                }
            }
        }
        log::trace!("connectivity from distances: {ret:?}");
        Self(ret)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// the atoms bonded to atom `i`
    pub fn bonded(&self, i: usize) -> &[usize] {
        &self.0[i]
    }

    pub fn are_bonded(&self, i: usize, j: usize) -> bool {
        self.0[i].binary_search(&j).is_ok()
    }

    /// each bond once as `(i, j)` with `i < j`
    pub fn bonds(&self) -> Vec<(usize, usize)> {
        let mut ret = Vec::new();
        for (i, neighbors) in self.0.iter().enumerate() {
            ret.extend(neighbors.iter().filter(|&&j| j > i).map(|&j| (i, j)));
        }
        ret
    }
}
