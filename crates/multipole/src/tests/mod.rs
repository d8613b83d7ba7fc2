use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use test_case::test_case;

use crate::*;

fn random_values(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(-2.0..2.0)).collect()
}

/// a proper rotation from random Euler angles
fn random_rotation(rng: &mut StdRng) -> Mat3 {
    let [a, b, c] = [0; 3].map(|_| rng.gen_range(-3.0..3.0));
    *na::Rotation3::from_euler_angles(a, b, c).matrix()
}

fn full_record(rng: &mut StdRng) -> Multipoles {
    let mut ret = Multipoles::new();
    ret.set("q00", -0.8).unwrap();
    for rank in Rank::ALL {
        ret.set_rank(rank, &random_values(rng, rank.n_components()))
            .unwrap();
    }
    ret
}

#[test]
fn names() {
    assert_eq!(MULTIPOLE_NAMES.len(), 25);
    let mut sorted = MULTIPOLE_NAMES.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 25);
    assert!(MULTIPOLE_NAMES.iter().all(|n| n.len() <= 4));
    assert_eq!(Rank::Dipole.components(), &["q10", "q11c", "q11s"]);
    assert_eq!(
        Rank::Octupole.components(),
        &["q30", "q31c", "q31s", "q32c", "q32s", "q33c", "q33s"]
    );
    assert_eq!(Rank::Hexadecapole.components().last(), Some(&"q44s"));
    assert_eq!(Rank::from_order(3), Some(Rank::Octupole));
    assert_eq!(Rank::from_order(5), None);
}

#[test_case(Rank::Dipole)]
#[test_case(Rank::Quadrupole)]
#[test_case(Rank::Octupole)]
#[test_case(Rank::Hexadecapole)]
fn spherical_round_trip(rank: Rank) {
    let mut rng = StdRng::seed_from_u64(rank.order() as u64);
    for _ in 0..20 {
        let q = random_values(&mut rng, rank.n_components());
        let t = rank.spherical_to_cartesian(&q).unwrap();
        assert_eq!(t.rank(), rank.order());
        assert!(t.is_symmetric(1e-14));
        assert!(t.is_traceless(1e-12));
        let got = rank.cartesian_to_spherical(&t).unwrap();
        assert_abs_diff_eq!(got.as_slice(), q.as_slice(), epsilon = 1e-12);
    }
}

#[test_case(Rank::Dipole)]
#[test_case(Rank::Quadrupole)]
#[test_case(Rank::Octupole)]
#[test_case(Rank::Hexadecapole)]
fn identity_rotation(rank: Rank) {
    let mut rng = StdRng::seed_from_u64(10 + rank.order() as u64);
    let q = random_values(&mut rng, rank.n_components());
    let t = rank.spherical_to_cartesian(&q).unwrap();
    assert_abs_diff_eq!(
        t.rotate(&Mat3::identity()).as_array(),
        t.as_array(),
        epsilon = 1e-15
    );
    let got = rotate_rank(rank, &q, &Mat3::identity()).unwrap();
    assert_abs_diff_eq!(got.as_slice(), q.as_slice(), epsilon = 1e-12);
}

#[test_case(Rank::Dipole)]
#[test_case(Rank::Quadrupole)]
#[test_case(Rank::Octupole)]
#[test_case(Rank::Hexadecapole)]
fn rotation_invariants(rank: Rank) {
    let mut rng = StdRng::seed_from_u64(20 + rank.order() as u64);
    for _ in 0..10 {
        let q = random_values(&mut rng, rank.n_components());
        let c = random_rotation(&mut rng);
        let t = rank.spherical_to_cartesian(&q).unwrap();
        let rotated = t.rotate(&c);
        assert_abs_diff_eq!(
            rotated.sum_of_squares(),
            t.sum_of_squares(),
            epsilon = 1e-10
        );
        assert!(rotated.is_symmetric(1e-12));
        assert!(rotated.is_traceless(1e-10));

        // Racah normalization makes the spherical norm invariant too
        let got = rotate_rank(rank, &q, &c).unwrap();
        let norm = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>();
        assert_abs_diff_eq!(norm(&got), norm(&q), epsilon = 1e-10);
    }
}

#[test_case(Rank::Dipole)]
#[test_case(Rank::Quadrupole)]
#[test_case(Rank::Octupole)]
#[test_case(Rank::Hexadecapole)]
fn rotation_composes(rank: Rank) {
    let mut rng = StdRng::seed_from_u64(30 + rank.order() as u64);
    let q = random_values(&mut rng, rank.n_components());
    let a = random_rotation(&mut rng);
    let b = random_rotation(&mut rng);
    let two_steps = rotate_rank(rank, &rotate_rank(rank, &q, &a).unwrap(), &b)
        .unwrap();
    let one_step = rotate_rank(rank, &q, &(b * a)).unwrap();
    assert_abs_diff_eq!(
        two_steps.as_slice(),
        one_step.as_slice(),
        epsilon = 1e-10
    );
}

#[test]
fn dipole_quarter_turn() {
    // local x is global y, local y is global -x
    let c = na::matrix![
        0.0, 1.0, 0.0;
        -1.0, 0.0, 0.0;
        0.0, 0.0, 1.0;
    ];
    // q10 = z, q11c = x, q11s = y
    let got = rotate_rank(Rank::Dipole, &[3.0, 1.0, 2.0], &c).unwrap();
    assert_abs_diff_eq!(got.as_slice(), [3.0, 2.0, -1.0].as_slice());
}

#[test]
fn quadrupole_z_to_x() {
    let c = na::matrix![
        0.0, 0.0, 1.0;
        0.0, 1.0, 0.0;
        -1.0, 0.0, 0.0;
    ];
    let got = rotate_rank(Rank::Quadrupole, &[1.0, 0.0, 0.0, 0.0, 0.0], &c)
        .unwrap();
    let want = [-0.5, 0.0, 0.0, 3f64.sqrt() / 2.0, 0.0];
    assert_abs_diff_eq!(got.as_slice(), want.as_slice(), epsilon = 1e-14);
}

#[test]
fn local_global_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    let m = full_record(&mut rng);
    let c = random_rotation(&mut rng);
    let local = m.to_local(&c).unwrap();
    assert_eq!(local.q00(), Some(-0.8));
    let back = local.to_global(&c).unwrap();
    for (name, want) in m.iter() {
        assert_abs_diff_eq!(back.get(name).unwrap(), want, epsilon = 1e-10);
    }
}

#[test]
fn rotate_skips_absent_ranks() {
    let mut m = Multipoles::new();
    m.set_rank(Rank::Dipole, &[0.1, 0.2, 0.3]).unwrap();
    let got = m.rotate(&Mat3::identity()).unwrap();
    assert_eq!(got.present_ranks(), vec![Rank::Dipole]);
    assert_eq!(got.q00(), None);
    assert_eq!(got.get("q20"), None);
}

#[test]
fn rotate_one_rank() {
    let mut rng = StdRng::seed_from_u64(7);
    let m = full_record(&mut rng);
    let c = random_rotation(&mut rng);
    let got = rotate_multipoles(&m, &c, Rank::Octupole).unwrap();
    let all = m.rotate(&c).unwrap();
    assert_eq!(got.rank_values(Rank::Dipole), m.rank_values(Rank::Dipole));
    assert_eq!(
        got.rank_values(Rank::Hexadecapole),
        m.rank_values(Rank::Hexadecapole)
    );
    assert_abs_diff_eq!(
        got.rank_values(Rank::Octupole).unwrap().as_slice(),
        all.rank_values(Rank::Octupole).unwrap().as_slice(),
        epsilon = 1e-12
    );

    let empty = Multipoles::new();
    assert_eq!(
        rotate_multipoles(&empty, &c, Rank::Dipole),
        Err(MultipoleError::Missing("q10".to_owned()))
    );
}

#[test]
fn partial_rank_fails() {
    let mut m = Multipoles::new();
    m.set_rank(Rank::Dipole, &[0.1, 0.2, 0.3]).unwrap();
    m.set("q20", 1.0).unwrap();
    m.set("q21c", 1.0).unwrap();
    assert_eq!(
        m.rotate(&Mat3::identity()),
        Err(MultipoleError::Missing("q21s".to_owned()))
    );
    assert_eq!(
        m.rank_values(Rank::Octupole),
        Err(MultipoleError::Missing("q30".to_owned()))
    );
}

#[test]
fn bad_inputs() {
    let mut m = Multipoles::new();
    assert_eq!(
        m.set("q21sq30", 1.0),
        Err(MultipoleError::UnknownName("q21sq30".to_owned()))
    );
    assert!(matches!(
        m.set("q10", f64::NAN),
        Err(MultipoleError::NonFinite { .. })
    ));
    assert_eq!(m.get("q10"), None);
    assert_eq!(
        m.set_rank(Rank::Quadrupole, &[1.0, 2.0]),
        Err(MultipoleError::WrongLength {
            rank: Rank::Quadrupole,
            got: 2
        })
    );
    assert!(Rank::Octupole.spherical_to_cartesian(&[0.0; 5]).is_err());
    let t = Rank::Dipole.spherical_to_cartesian(&[0.0; 3]).unwrap();
    assert_eq!(
        Rank::Quadrupole.cartesian_to_spherical(&t),
        Err(MultipoleError::WrongRank { want: 2, got: 1 })
    );
}

#[test]
fn json() {
    let input = r#"{"q00": -0.5, "q10": 0.1, "q11c": 0.2, "q11s": 0.3}"#;
    let got: Multipoles = serde_json::from_str(input).unwrap();
    assert_eq!(got.present_ranks(), vec![Rank::Dipole]);
    assert_eq!(got.get("q11s"), Some(0.3));

    let map: BTreeMap<String, f64> =
        serde_json::from_str(&serde_json::to_string(&got).unwrap()).unwrap();
    assert_eq!(map.len(), 4);

    let bad = serde_json::from_str::<Multipoles>(r#"{"q55": 1.0}"#);
    assert!(bad.is_err());
}

#[test]
fn display() {
    let m = Multipoles::from_pairs([("q00", -0.5), ("q10", 0.25)]).unwrap();
    assert_eq!(format!("{m:.3}"), "  q00     -0.500\n  q10      0.250\n");
}
