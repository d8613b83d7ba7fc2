//! multi-frame geometries read from XYZ text

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Atom, Atoms, AtomsError, Signature, Unit};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub frames: Vec<Atoms>,
}

impl Trajectory {
    pub fn new(frames: Vec<Atoms>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atoms> {
        self.frames.iter()
    }

    /// the signature of the first frame, if any
    pub fn signature(&self) -> Option<Signature> {
        self.frames.first().map(Atoms::signature)
    }

    /// report whether every frame has the same atom ordering as the first
    pub fn is_consistent(&self) -> bool {
        let Some(sig) = self.signature() else {
            return true;
        };
        self.frames.iter().all(|f| f.signature() == sig)
    }

    pub fn convert_to(&mut self, unit: Unit) {
        for frame in self.frames.iter_mut() {
            frame.convert_to(unit);
        }
    }
}

impl FromStr for Trajectory {
    type Err = AtomsError;

    /// parse standard multi-frame XYZ text: an atom count line, a comment line,
    /// and then one `Sym x y z` line per atom, repeated for each frame.
    /// coordinates are taken to be in Å. blank lines between frames are
    /// skipped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut frames = Vec::new();
        let mut lines = s.lines();
        while let Some(line) = lines.next() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let count: usize = line
                .parse()
                .map_err(|_| AtomsError::ParseCount(line.to_owned()))?;
            // comment
            lines.next();
            let mut atoms = Vec::with_capacity(count);
            for line in lines.by_ref().take(count) {
                atoms.push(line.parse::<Atom>()?);
            }
            if atoms.len() != count {
                return Err(AtomsError::TruncatedFrame {
                    frame: frames.len(),
                    want: count,
                    got: atoms.len(),
                });
            }
            frames.push(Atoms::new(atoms, Unit::Angstrom));
        }
        Ok(Self { frames })
    }
}

impl Display for Trajectory {
    /// write `self` back out in XYZ format, in the units of each frame
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "{}", frame.len())?;
            writeln!(f, "frame {i} ({})", frame.unit)?;
            write!(f, "{frame:.8}")?;
        }
        Ok(())
    }
}
