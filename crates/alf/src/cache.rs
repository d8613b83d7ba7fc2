//! reuse of ALFs across frames of the same system

use atoms::{Atoms, Signature};
use log::trace;
use rustc_hash::FxHashMap;

use crate::{Alf, AlfError, AlfMethod};

/// A memo of computed ALFs keyed by the geometry signature, the method, and
/// the atom index. A geometry with a new signature always misses.
///
/// CIP ALFs depend on connectivity as well as ordering, so the cache assumes
/// every geometry with a given signature shares one bonding pattern. Call
/// [AlfCache::invalidate] when that stops holding.
#[derive(Debug, Default)]
pub struct AlfCache {
    map: FxHashMap<(Signature, AlfMethod, usize), Alf>,
    hits: usize,
    misses: usize,
}

impl AlfCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// the ALF of atom `i` in `atoms` from `self`, computing and storing it
    /// with `method` on a miss
    pub fn get_or_compute(
        &mut self,
        atoms: &Atoms,
        i: usize,
        method: AlfMethod,
    ) -> Result<Alf, AlfError> {
        let key = (atoms.signature(), method, i);
        if let Some(&alf) = self.map.get(&key) {
            self.hits += 1;
            trace!("cache hit for {} in {}", atoms.name(i), key.0);
            return Ok(alf);
        }
        self.misses += 1;
        trace!("cache miss for {} in {}", atoms.name(i), key.0);
        let alf = method.calculate(atoms, i)?;
        self.map.insert(key, alf);
        Ok(alf)
    }

    /// the cached ALF, if any, without computing it
    pub fn get(
        &self,
        signature: &Signature,
        method: AlfMethod,
        i: usize,
    ) -> Option<Alf> {
        self.map.get(&(signature.clone(), method, i)).copied()
    }

    /// drop every entry for `signature`
    pub fn invalidate(&mut self, signature: &Signature) {
        self.map.retain(|(sig, _, _), _| sig != signature);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// the number of lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// The ALFs of every atom of one system, tied to the signature of the geometry
/// they were computed from
#[derive(Clone, Debug, PartialEq)]
pub struct SystemAlf {
    signature: Signature,
    method: AlfMethod,
    alfs: Vec<Alf>,
}

impl SystemAlf {
    pub fn new(atoms: &Atoms, method: AlfMethod) -> Result<Self, AlfError> {
        let alfs = (0..atoms.len())
            .map(|i| method.calculate(atoms, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            signature: atoms.signature(),
            method,
            alfs,
        })
    }

    /// the ALFs of `self` for use on `atoms`, provided `atoms` has the same
    /// signature as the geometry `self` was built from
    pub fn for_frame(&self, atoms: &Atoms) -> Result<&[Alf], AlfError> {
        let got = atoms.signature();
        if got != self.signature {
            return Err(AlfError::SignatureMismatch {
                want: self.signature.clone(),
                got,
            });
        }
        Ok(&self.alfs)
    }

    pub fn get(&self, i: usize) -> Option<&Alf> {
        self.alfs.get(i)
    }

    pub fn alfs(&self) -> &[Alf] {
        &self.alfs
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn method(&self) -> AlfMethod {
        self.method
    }
}
