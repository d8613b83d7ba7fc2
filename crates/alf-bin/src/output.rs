use std::fmt::Display;

use alf::{Alf, AlfMethod, AtomFrame};
use atoms::{Signature, Unit};
use multipole::Multipoles;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct FrameOutput {
    /// rows are the local axes in the global frame
    pub c_matrix: [[f64; 3]; 3],
    pub features: Vec<f64>,
}

impl From<AtomFrame> for FrameOutput {
    fn from(frame: AtomFrame) -> Self {
        let c = frame.c_matrix;
        Self {
            c_matrix: std::array::from_fn(|i| {
                std::array::from_fn(|j| c[(i, j)])
            }),
            features: frame.features,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AtomOutput {
    pub name: String,

    /// 0-based, as in the library
    pub alf: Alf,

    pub frames: Vec<FrameOutput>,

    /// multipole moments in the local frame of the first frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_multipoles: Option<Multipoles>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Output {
    pub signature: Signature,
    pub method: AlfMethod,
    pub unit: Unit,
    pub n_frames: usize,
    pub atoms: Vec<AtomOutput>,
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "system {} with {} frame{}, {} ALFs, features in {}",
            self.signature,
            self.n_frames,
            if self.n_frames == 1 { "" } else { "s" },
            self.method,
            self.unit,
        )?;
        for atom in &self.atoms {
            writeln!(f)?;
            writeln!(f, "{} {}", atom.name, atom.alf)?;
            for (i, frame) in atom.frames.iter().enumerate() {
                write!(f, "{i:5}")?;
                for x in &frame.features {
                    write!(f, "{x:12.6}")?;
                }
                writeln!(f)?;
            }
            if let Some(m) = &atom.local_multipoles {
                writeln!(f, "local multipoles:")?;
                write!(f, "{m:.8}")?;
            }
        }
        Ok(())
    }
}
