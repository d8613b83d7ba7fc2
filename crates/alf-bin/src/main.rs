use std::{collections::BTreeMap, fs::read_to_string, sync::Mutex};

use alf::{
    AlfCache, AlfMethod, config::Config, trajectory::max_threads,
    trajectory_features,
};
use anyhow::{Context, bail};
use atoms::Trajectory;
use clap::Parser;
use multipole::Multipoles;

mod output;

use output::{AtomOutput, Output};

/// atomic local frames, features, and local multipole moments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input file
    #[arg(value_parser, default_value_t = String::from("alf.toml"))]
    infile: String,

    /// Writes the output in JSON format for use by other programs
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

fn load_trajectory(config: &Config) -> anyhow::Result<Trajectory> {
    let contents = read_to_string(&config.geometry)
        .with_context(|| format!("failed to read {}", config.geometry))?;
    let mut trajectory: Trajectory = contents
        .parse()
        .with_context(|| format!("failed to parse {}", config.geometry))?;
    if trajectory.is_empty() {
        bail!("no frames in {}", config.geometry);
    }
    if !trajectory.is_consistent() {
        bail!("frames in {} do not share one atom ordering", config.geometry);
    }
    if config.method == AlfMethod::Cip {
        trajectory.frames = trajectory
            .frames
            .into_iter()
            .map(|f| f.with_connectivity(config.bond_tolerance))
            .collect();
    }
    Ok(trajectory)
}

fn load_multipoles(
    path: &str,
) -> anyhow::Result<BTreeMap<String, Multipoles>> {
    let contents = read_to_string(path)
        .with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse multipoles from {path}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load(&args.infile)
        .with_context(|| format!("failed to load {}", args.infile))?;
    log::info!("{config}");
    max_threads(config.threads);

    let trajectory = load_trajectory(&config)?;
    let multipoles = config
        .multipoles
        .as_deref()
        .map(load_multipoles)
        .transpose()?;

    let first = &trajectory.frames[0];
    let selected = config.selected_atoms(first.len())?;
    let cache = Mutex::new(AlfCache::new());
    let mut atoms = Vec::with_capacity(selected.len());
    for atom in selected {
        let name = first.name(atom);
        let frames = trajectory_features(
            &trajectory,
            atom,
            config.method,
            config.unit,
            &cache,
        )
        .with_context(|| format!("failed to compute features for {name}"))?;
        let local_multipoles = match multipoles.as_ref().map(|m| m.get(&name))
        {
            Some(Some(global)) => Some(
                global
                    .to_local(&frames[0].c_matrix)
                    .with_context(|| format!("failed to rotate {name}"))?,
            ),
            Some(None) => {
                log::warn!("no multipoles given for {name}");
                None
            }
            None => None,
        };
        atoms.push(AtomOutput {
            name,
            alf: frames[0].alf,
            frames: frames.into_iter().map(Into::into).collect(),
            local_multipoles,
        });
    }

    let output = Output {
        signature: first.signature(),
        method: config.method,
        unit: config.unit,
        n_frames: trajectory.len(),
        atoms,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{output}");
    }
    Ok(())
}
