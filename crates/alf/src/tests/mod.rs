use approx::assert_abs_diff_eq;
use atoms::{Atom, Atoms, Connectivity, Trajectory, Unit, atoms};
use rand::{Rng, SeedableRng, rngs::StdRng};
use test_case::test_case;

use crate::*;


/// the water dimer from testfiles/water_dimer.xyz, in Å
pub(crate) fn water_dimer() -> Atoms {
    atoms![
        O     -1.551007   -0.114520    0.000000
        H     -1.934259    0.762503    0.000000
        H     -0.599677    0.040712    0.000000
        O      1.350625    0.111469    0.000000
        H      1.680398   -0.373741   -0.758561
        H      1.680398   -0.373741    0.758561
    ]
}

pub(crate) fn water() -> Atoms {
    atoms![
        O 0.0 0.0 0.0
        H 0.757 0.586 0.0
        H -0.757 0.586 0.0
    ]
}

/// `n` carbons at random positions, for tests that only need
/// the atom count or non-degenerate coordinates
pub(crate) fn random_atoms(rng: &mut StdRng, n: usize) -> Atoms {
    let atoms = (0..n)
        .map(|_| {
            let [x, y, z] = [0; 3].map(|_| rng.gen_range(-3.0..3.0));
            Atom::new(6, x, y, z)
        })
        .collect();
    Atoms::new(atoms, Unit::Bohr)
}

pub(crate) fn random_rotation(rng: &mut StdRng) -> Mat3 {
    let [a, b, c] = [0; 3].map(|_| rng.gen_range(-3.0..3.0));
    *na::Rotation3::from_euler_angles(a, b, c).matrix()
}

#[test]
fn sequence_water_dimer() {
    let atoms = water_dimer();
    let got: Vec<_> = (0..atoms.len())
        .map(|i| AlfMethod::Sequence.calculate(&atoms, i).unwrap())
        .collect();
    let want = vec![
        Alf::new(0, 1, Some(2)),
        Alf::new(1, 0, Some(2)),
        Alf::new(2, 1, Some(3)),
        Alf::new(3, 2, Some(4)),
        Alf::new(4, 3, Some(5)),
        Alf::new(5, 3, Some(4)),
    ];
    assert_eq!(got, want);
}

#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(12)]
fn sequence_coverage(n: usize) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    let atoms = random_atoms(&mut rng, n);
    for i in 0..n {
        let alf = sequence::calculate_alf(&atoms, i).unwrap();
        assert_eq!(alf.origin, i);
        alf.validate(&atoms).unwrap();
        let want = match i {
            0 => (1, 2),
            i if i == n - 1 => (n - 3, n - 2),
            i => (i - 1, i + 1),
        };
        assert_eq!((alf.x_axis, alf.xy_plane), (want.0, Some(want.1)));
    }
}

#[test]
fn sequence_ignores_coordinates() {
    let atoms = water_dimer();
    let moved = atoms.transform(na::matrix![
        0.0, 1.0, 0.0;
        -1.0, 0.0, 0.0;
        0.0, 0.0, 1.0;
    ]);
    for i in 0..atoms.len() {
        assert_eq!(
            compute_alf(&atoms, i, AlfMethod::Sequence),
            compute_alf(&moved, i, AlfMethod::Sequence)
        );
    }
}

#[test_case(AlfMethod::Sequence)]
#[test_case(AlfMethod::Cip)]
fn diatomic(method: AlfMethod) {
    let atoms = atoms![
        H 0.0 0.0 0.0
        F 0.0 0.0 0.917
    ]
    .with_connectivity(1.2);
    assert_eq!(method.calculate(&atoms, 0), Ok(Alf::new(0, 1, None)));
    assert_eq!(method.calculate(&atoms, 1), Ok(Alf::new(1, 0, None)));
}

#[test]
fn too_few_atoms() {
    let atoms = atoms![H 0.0 0.0 0.0];
    assert_eq!(
        AlfMethod::Sequence.calculate(&atoms, 0),
        Err(AlfError::TooFewAtoms(1))
    );
    let atoms = water();
    assert_eq!(
        AlfMethod::Sequence.calculate(&atoms, 3),
        Err(AlfError::IndexOutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn validate() {
    let atoms = water();
    assert!(Alf::new(0, 1, Some(2)).validate(&atoms).is_ok());
    assert_eq!(
        Alf::new(0, 1, Some(3)).validate(&atoms),
        Err(AlfError::IndexOutOfBounds { index: 3, len: 3 })
    );
    let alf = Alf::new(0, 1, Some(1));
    assert_eq!(
        alf.validate(&atoms),
        Err(AlfError::InvalidAlf {
            alf,
            reason: "repeated atom"
        })
    );
    let alf = Alf::new(0, 1, None);
    assert_eq!(
        alf.validate(&atoms),
        Err(AlfError::InvalidAlf {
            alf,
            reason: "missing xy-plane atom"
        })
    );
    assert_eq!(
        Alf::new(0, 1, Some(2)).check(2),
        Err(AlfError::IndexOutOfBounds { index: 2, len: 2 })
    );
}

#[test]
fn display() {
    let atoms = water_dimer();
    let got: Vec<_> = (0..atoms.len())
        .map(|i| AlfMethod::Sequence.calculate(&atoms, i).unwrap().to_string())
        .collect();
    insta::assert_snapshot!(got.join("\n"), @r"
    ALF(1, 2, 3)
    ALF(2, 1, 3)
    ALF(3, 2, 4)
    ALF(4, 3, 5)
    ALF(5, 4, 6)
    ALF(6, 4, 5)
    ");
    assert_eq!(Alf::new(1, 0, None).to_string(), "ALF(2, 1)");
}

#[test]
fn errors_display() {
    assert_eq!(
        AlfError::ConnectivityRequired.to_string(),
        "connectivity required for the cip method but none was given"
    );
    assert_eq!(
        AlfError::CollinearAlf {
            atom: "C1".to_owned(),
            alf: Alf::new(0, 1, Some(2))
        }
        .to_string(),
        "ALF(1, 2, 3) of C1 is collinear"
    );
}

#[test]
fn n_features_by_size() {
    assert_eq!(n_features(2), 1);
    assert_eq!(n_features(3), 3);
    assert_eq!(n_features(6), 12);
}

#[test]
fn calculate_features_matches_steps() {
    let atoms = water_dimer();
    for i in 0..atoms.len() {
        let alf = compute_alf(&atoms, i, AlfMethod::Sequence).unwrap();
        let c = compute_c_matrix(&atoms, &alf).unwrap();
        let want = compute_features(&atoms, &alf, &c, Unit::Bohr).unwrap();
        let got =
            calculate_features(&atoms, i, AlfMethod::Sequence, Unit::Bohr)
                .unwrap();
        assert_eq!(got, want);
    }
}

#[test]
fn trajectory_in_parallel() {
    let mut rng = StdRng::seed_from_u64(42);
    let base = water_dimer();
    let frames: Vec<_> = (0..8)
        .map(|_| {
            let mut frame = base.transform(random_rotation(&mut rng));
            frame.translate(Vec3::new(1.0, -2.0, 0.5));
            frame
        })
        .collect();
    let trajectory = Trajectory::new(frames);
    let cache = std::sync::Mutex::new(AlfCache::new());
    let got = trajectory_features(
        &trajectory,
        3,
        AlfMethod::Sequence,
        Unit::Bohr,
        &cache,
    )
    .unwrap();
    assert_eq!(got.len(), 8);
    let want =
        calculate_features(&base, 3, AlfMethod::Sequence, Unit::Bohr).unwrap();
    for frame in &got {
        assert_eq!(frame.alf, Alf::new(3, 2, Some(4)));
        assert_abs_diff_eq!(
            frame.features.as_slice(),
            want.as_slice(),
            epsilon = 1e-10
        );
    }
    let cache = cache.into_inner().unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 7);
}

#[test]
fn trajectory_rejects_bad_frame() {
    let good = water();
    let bad = atoms![
        O 0.0 0.0 0.0
        H 0.0 0.0 0.0
        H -0.757 0.586 0.0
    ];
    let trajectory = Trajectory::new(vec![good.clone(), bad, good]);
    let cache = std::sync::Mutex::new(AlfCache::new());
    let got = trajectory_features(
        &trajectory,
        0,
        AlfMethod::Sequence,
        Unit::Bohr,
        &cache,
    );
    assert_eq!(
        got,
        Err(AlfError::CoincidentAtoms {
            a: "O1".to_owned(),
            b: "H2".to_owned()
        })
    );
}

#[test]
fn cip_needs_connectivity() {
    let atoms = water();
    assert_eq!(
        AlfMethod::Cip.calculate(&atoms, 0),
        Err(AlfError::ConnectivityRequired)
    );
    let conn = Connectivity::from_bonds(3, &[(0, 1), (0, 2)]).unwrap();
    let mut atoms = atoms;
    atoms.set_connectivity(conn);
    assert_eq!(
        AlfMethod::Cip.calculate(&atoms, 0),
        Ok(Alf::new(0, 1, Some(2)))
    );
}
