use atoms::{Atoms, Unit};

use crate::{
    Alf, AlfError, Mat3, Vec3, cmatrix::COINCIDENT_TOL, n_features,
};

/// compute the features of the atom at the origin of `alf`, with distances in
/// `unit` and angles in radians.
///
/// A diatomic has the single feature `[r]`. Otherwise the first three features
/// are the distance to the x-axis atom, the distance to the xy-plane atom, and
/// the angle between them at the origin. Every other atom then contributes
/// `[r, θ, φ]`, in the order of `atoms`: its distance from the origin and the
/// polar and azimuthal angles of its displacement in the local frame given by
/// `c`. θ lies in [0, π] and φ in (-π, π].
pub fn features(
    atoms: &Atoms,
    alf: &Alf,
    c: &Mat3,
    unit: Unit,
) -> Result<Vec<f64>, AlfError> {
    alf.validate(atoms)?;
    let origin = atoms.coord_in(alf.origin, unit);
    let displacement = |i| {
        let v = atoms.coord_in(i, unit) - origin;
        let r = v.norm();
        if r < COINCIDENT_TOL {
            Err(AlfError::CoincidentAtoms {
                a: atoms.name(alf.origin),
                b: atoms.name(i),
            })
        } else {
            Ok((v, r))
        }
    };

    let (x_vec, r_x) = displacement(alf.x_axis)?;
    let Some(xy) = alf.xy_plane else {
        return Ok(vec![r_x]);
    };
    let (xy_vec, r_xy) = displacement(xy)?;

    let mut ret = Vec::with_capacity(n_features(atoms.len()));
    let angle = (x_vec.dot(&xy_vec) / (r_x * r_xy)).clamp(-1.0, 1.0).acos();
    ret.extend([r_x, r_xy, angle]);

    for i in (0..atoms.len()).filter(|&i| !alf.contains(i)) {
        let (v, r) = displacement(i)?;
        let zeta = c * v;
        let theta = (zeta.z / r).clamp(-1.0, 1.0).acos();
        let phi = zeta.y.atan2(zeta.x);
        ret.extend([r, theta, phi]);
    }
    Ok(ret)
}

/// invert [features]: place every atom of a geometry with `n_atoms` atoms in
/// the local frame of `alf`. the origin lands at zero, the x-axis atom on +x,
/// and the xy-plane atom in the xy-plane with non-negative y. positions are in
/// the units the features were computed in
pub fn features_to_coordinates(
    features: &[f64],
    alf: &Alf,
    n_atoms: usize,
) -> Result<Vec<Vec3>, AlfError> {
    alf.check(n_atoms)?;
    let want = n_features(n_atoms);
    if features.len() != want {
        return Err(AlfError::FeatureLength {
            want,
            got: features.len(),
        });
    }
    let mut ret = vec![Vec3::zeros(); n_atoms];
    ret[alf.x_axis] = Vec3::new(features[0], 0.0, 0.0);
    let Some(xy) = alf.xy_plane else {
        return Ok(ret);
    };
    let (r_xy, angle) = (features[1], features[2]);
    ret[xy] = Vec3::new(r_xy * angle.cos(), r_xy * angle.sin(), 0.0);

    let others = (0..n_atoms).filter(|&i| !alf.contains(i));
    for (i, f) in others.zip(features[3..].chunks_exact(3)) {
        let (r, theta, phi) = (f[0], f[1], f[2]);
        ret[i] = Vec3::new(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        );
    }
    Ok(ret)
}
