//! ALFs from Cahn-Ingold-Prelog style priorities over the bonding graph.
//!
//! The priority of a candidate at shell level L is the total mass of every
//! distinct atom within L bonds of it, itself included. Candidates are
//! compared at level 0 first and the level is raised until one candidate has
//! the unique highest priority. Summed masses cannot separate every pair of
//! branched substituents that full CIP rules would, so when raising the level
//! stops changing the priorities the lowest-indexed of the tied candidates is
//! taken.

use std::collections::BTreeSet;

use atoms::{Atoms, Connectivity};
use log::debug;

use crate::{Alf, AlfError, check_atom};

/// pick the ALF of atom `i` from the highest priority atoms bonded to it,
/// falling back to atoms two bonds away when the bonded atoms are used up.
/// `atoms` must carry a [Connectivity] covering every atom
pub fn calculate_alf(atoms: &Atoms, i: usize) -> Result<Alf, AlfError> {
    check_atom(atoms, i)?;
    let conn = atoms
        .connectivity()
        .filter(|c| c.len() == atoms.len())
        .ok_or(AlfError::ConnectivityRequired)?;
    let n_needed = if atoms.len() > 2 { 2 } else { 1 };
    let mut used = vec![i];
    for _ in 0..n_needed {
        let mut candidates: BTreeSet<usize> = conn
            .bonded(i)
            .iter()
            .copied()
            .filter(|a| !used.contains(a))
            .collect();
        if candidates.is_empty() {
            candidates = conn
                .bonded(i)
                .iter()
                .flat_map(|&b| conn.bonded(b))
                .copied()
                .filter(|a| !used.contains(a))
                .collect();
        }
        let candidates: Vec<usize> = candidates.into_iter().collect();
        let Some(best) = max_priority(atoms, conn, &candidates) else {
            return Err(AlfError::NoCandidates {
                atom: atoms.name(i),
            });
        };
        used.push(best);
    }
    Ok(Alf::new(i, used[1], used.get(2).copied()))
}

/// two priorities closer than this, relative to the larger, are tied
const PRIORITY_TOL: f64 = 1e-9;

fn tied(a: f64, b: f64) -> bool {
    (a - b).abs() <= PRIORITY_TOL * a.abs().max(b.abs())
}

/// the total mass of the distinct atoms within `level` bonds of `atom`. the
/// masses are summed in ascending order so that the same set of atoms always
/// gives the same bits, whatever order the search reached them in
pub fn priority(
    atoms: &Atoms,
    conn: &Connectivity,
    atom: usize,
    level: usize,
) -> f64 {
    let mut seen = vec![false; atoms.len()];
    seen[atom] = true;
    let mut masses = vec![atoms[atom].weight()];
    let mut shell = vec![atom];
    for _ in 0..level {
        let mut next = Vec::new();
        for &a in &shell {
            for &b in conn.bonded(a) {
                if !seen[b] {
                    seen[b] = true;
                    masses.push(atoms[b].weight());
                    next.push(b);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        shell = next;
    }
    masses.sort_by(f64::total_cmp);
    masses.iter().sum()
}

/// the candidate with the highest priority, raising the shell level until the
/// maximum is unique or the priorities stop changing. None if `candidates` is
/// empty
fn max_priority(
    atoms: &Atoms,
    conn: &Connectivity,
    candidates: &[usize],
) -> Option<usize> {
    if candidates.len() <= 1 {
        return candidates.first().copied();
    }
    let mut priorities: Vec<f64> = Vec::new();
    // every level past the graph diameter repeats the previous one, so this
    // always breaks early
    for level in 0..=atoms.len() {
        let next: Vec<f64> = candidates
            .iter()
            .map(|&c| priority(atoms, conn, c, level))
            .collect();
        let converged = next.len() == priorities.len()
            && next.iter().zip(&priorities).all(|(&a, &b)| tied(a, b));
        priorities = next;
        let max = priorities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n_max = priorities.iter().filter(|&&p| tied(p, max)).count();
        if n_max == 1 {
            break;
        }
        if converged {
            let names: Vec<_> = candidates
                .iter()
                .zip(&priorities)
                .filter(|&(_, &p)| tied(p, max))
                .map(|(&c, _)| atoms.name(c))
                .collect();
            debug!(
                "unbroken priority tie between {} at level {level}, taking {}",
                names.join(", "),
                names[0]
            );
            break;
        }
    }
    let max = priorities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    candidates
        .iter()
        .zip(&priorities)
        .find(|&(_, &p)| tied(p, max))
        .map(|(&c, _)| c)
}
