//! ALFs from the ordering of atoms in the geometry

use atoms::Atoms;

use crate::{Alf, AlfError, check_atom};

/// pick the ALF of atom `i` from its neighbors in the atom ordering. the
/// first atom uses the next two atoms, the last atom uses the two before it,
/// and every other atom uses the atoms on either side of it. in a diatomic the
/// x-axis is the other atom and there is no xy-plane atom. coordinates are
/// never read, so every frame with the same ordering gets the same ALF
pub fn calculate_alf(atoms: &Atoms, i: usize) -> Result<Alf, AlfError> {
    check_atom(atoms, i)?;
    let n = atoms.len();
    if n == 2 {
        return Ok(Alf::new(i, 1 - i, None));
    }
    Ok(match i {
        0 => Alf::new(0, 1, Some(2)),
        i if i == n - 1 => Alf::new(i, n - 3, Some(n - 2)),
        i => Alf::new(i, i - 1, Some(i + 1)),
    })
}
