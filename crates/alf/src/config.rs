//! Configuration settings for computing ALFs and features

use std::{
    error::Error,
    fmt::{Debug, Display},
    fs::read_to_string,
    path::Path,
};

use atoms::{Unit, connectivity::BOND_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::{AlfError, AlfMethod};


#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// The path to an XYZ file holding one or more frames of the system, in
    /// Å.
    geometry: String,

    /// The strategy for picking ALFs. Currently-supported values are
    /// "sequence", which uses the atom ordering, and "cip", which uses
    /// priorities over the bonding graph. Defaults to "sequence".
    method: Option<AlfMethod>,

    /// The distance unit of the features, either "bohr" or "angstrom".
    /// Defaults to "bohr".
    unit: Option<Unit>,

    /// The 1-based indices of the atoms to compute features for. Defaults to
    /// every atom.
    atoms: Option<Vec<usize>>,

    /// The factor applied to the sum of two covalent radii when deciding
    /// whether atoms are bonded. Only used by the "cip" method.
    bond_tolerance: Option<f64>,

    /// An optional path to a JSON file mapping atom names like "O1" to their
    /// global multipole moments, which will be rotated into each atom's local
    /// frame.
    multipoles: Option<String>,

    /// The number of threads to use for the trajectory. 0, the default, uses
    /// every CPU.
    threads: Option<usize>,
}

/// Construct a full `Config` using [Config::load] on a TOML file or use
/// [Config::new] and the Builder pattern
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(from = "RawConfig")]
pub struct Config {
    /// path to the XYZ geometry
    pub geometry: String,

    pub method: AlfMethod,

    /// unit for the distance features
    pub unit: Unit,

    /// 1-based atom indices, or None for every atom
    pub atoms: Option<Vec<usize>>,

    pub bond_tolerance: f64,

    /// path to the global multipole moments in JSON
    pub multipoles: Option<String>,

    pub threads: usize,
}

impl From<RawConfig> for Config {
    fn from(rc: RawConfig) -> Self {
        Self {
            geometry: rc.geometry,
            method: rc.method.unwrap_or_default(),
            unit: rc.unit.unwrap_or_default(),
            atoms: rc.atoms,
            bond_tolerance: rc.bond_tolerance.unwrap_or(BOND_TOLERANCE),
            multipoles: rc.multipoles,
            threads: rc.threads.unwrap_or(0),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Toml(e) => {
                write!(f, "failed to deserialize config: {e}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl Config {
    /// Construct a [Config] for `geometry` with default values for `method`
    /// (sequence), `unit` (bohr), `atoms` (all), `bond_tolerance`
    /// ([BOND_TOLERANCE]), `multipoles` (none), and `threads` (0; every CPU)
    pub fn new(geometry: impl Into<String>) -> Self {
        Self {
            geometry: geometry.into(),
            method: AlfMethod::default(),
            unit: Unit::default(),
            atoms: None,
            bond_tolerance: BOND_TOLERANCE,
            multipoles: None,
            threads: 0,
        }
    }

    pub fn method(mut self, method: AlfMethod) -> Self {
        self.method = method;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn atoms(mut self, atoms: Vec<usize>) -> Self {
        self.atoms = Some(atoms);
        self
    }

    /// load a [Config] from the TOML file specified by `filename`
    pub fn load<P>(filename: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path> + Debug,
    {
        let contents = read_to_string(&filename)?;
        let ret = toml::from_str(&contents)?;
        log::debug!("loaded config from {filename:?}");
        Ok(ret)
    }

    /// the 0-based indices of the selected atoms in a geometry of `n_atoms`
    /// atoms. an entry outside 1..=n_atoms is reported with the 1-based index
    /// written in the config
    pub fn selected_atoms(
        &self,
        n_atoms: usize,
    ) -> Result<Vec<usize>, AlfError> {
        let Some(atoms) = &self.atoms else {
            return Ok((0..n_atoms).collect());
        };
        atoms
            .iter()
            .map(|&a| {
                if a == 0 || a > n_atoms {
                    Err(AlfError::IndexOutOfBounds {
                        index: a,
                        len: n_atoms,
                    })
                } else {
                    Ok(a - 1)
                }
            })
            .collect()
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            geometry,
            method,
            unit,
            atoms,
            bond_tolerance,
            multipoles,
            threads,
        } = self;
        writeln!(f, "Configuration Options:")?;
        writeln!(f, "geometry = {geometry}")?;
        writeln!(f, "method = {method}")?;
        writeln!(f, "unit = {unit}")?;
        match atoms {
            Some(atoms) => writeln!(f, "atoms = {atoms:?}")?,
            None => writeln!(f, "atoms = all")?,
        }
        writeln!(f, "bond_tolerance = {bond_tolerance}")?;
        if let Some(m) = multipoles {
            writeln!(f, "multipoles = {m}")?;
        }
        writeln!(f, "threads = {threads}")
    }
}
