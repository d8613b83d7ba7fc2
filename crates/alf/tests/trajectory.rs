use std::sync::Mutex;

use alf::{
    Alf, AlfCache, AlfMethod, SystemAlf, config::Config,
    features_to_coordinates, trajectory_features,
};
use approx::assert_abs_diff_eq;
use atoms::{Trajectory, Unit};

fn load(config: &Config) -> Trajectory {
    let contents = std::fs::read_to_string(&config.geometry).unwrap();
    contents.parse().unwrap()
}

#[test]
fn from_config() {
    let config = Config::load("testfiles/test.toml").unwrap();
    let mut trajectory = load(&config);
    assert_eq!(trajectory.len(), 1);
    let frame = trajectory.frames.pop().unwrap();
    let frame = frame.with_connectivity(config.bond_tolerance);
    let selected = config.selected_atoms(frame.len()).unwrap();
    assert_eq!(selected, vec![0, 3]);

    let system = SystemAlf::new(&frame, config.method).unwrap();
    let alfs = system.for_frame(&frame).unwrap();
    assert_eq!(alfs[0], Alf::new(0, 1, Some(2)));
    assert_eq!(alfs[3], Alf::new(3, 4, Some(5)));

    let trajectory = Trajectory::new(vec![frame.clone(), frame]);
    let cache = Mutex::new(AlfCache::new());
    for atom in selected {
        let got = trajectory_features(
            &trajectory,
            atom,
            config.method,
            config.unit,
            &cache,
        )
        .unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], got[1]);
        assert_eq!(got[0].features.len(), 12);
        // r_x of O4 is its bond to H5 in Å
        if atom == 3 {
            assert_abs_diff_eq!(got[0].features[0], 0.959, epsilon = 1e-3);
        }
    }
}

#[test]
fn multi_frame_xyz() {
    let xyz = "3
first
O 0.0 0.0 0.0
H 0.757 0.586 0.0
H -0.757 0.586 0.0
3
second, stretched
O 0.0 0.0 0.0
H 0.8 0.6 0.0
H -0.757 0.586 0.0
";
    let trajectory: Trajectory = xyz.parse().unwrap();
    assert!(trajectory.is_consistent());
    let cache = Mutex::new(AlfCache::new());
    let got = trajectory_features(
        &trajectory,
        0,
        AlfMethod::Sequence,
        Unit::Angstrom,
        &cache,
    )
    .unwrap();
    assert_abs_diff_eq!(got[0].features[0], 0.957, epsilon = 1e-3);
    assert_abs_diff_eq!(got[1].features[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(got[0].features[1], got[1].features[1]);

    let local =
        features_to_coordinates(&got[1].features, &got[1].alf, 3).unwrap();
    assert_abs_diff_eq!(local[1].x, 1.0, epsilon = 1e-12);
}
