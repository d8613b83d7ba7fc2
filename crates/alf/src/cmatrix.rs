//! the rotation matrix from the global frame into an atomic local frame

use atoms::Atoms;

use crate::{Alf, AlfError, Mat3, Vec3};

/// displacements shorter than this, in the units of the geometry, are
/// treated as coincident atoms
pub const COINCIDENT_TOL: f64 = 1e-10;

/// the sine of the smallest angle allowed between the x-axis and xy-plane
/// displacements
pub const COLLINEAR_TOL: f64 = 1e-8;

/// build the C matrix for `alf` in `atoms`. its rows are the local x, y, and z
/// axes expressed in the global frame, so `C * v` takes a global displacement
/// `v` into the local frame.
///
/// x points from the origin to the x-axis atom. y is the component of the
/// displacement to the xy-plane atom orthogonal to x, so the xy-plane atom has
/// a positive local y. z is x × y, making C a proper rotation.
///
/// A diatomic has no xy-plane atom. There y is taken from the global axis
/// least aligned with the bond, with the earliest of x, y, and z winning ties,
/// after projecting out its component along x.
pub fn c_matrix(atoms: &Atoms, alf: &Alf) -> Result<Mat3, AlfError> {
    alf.validate(atoms)?;
    let origin = atoms.coord(alf.origin);
    let x_vec = atoms.coord(alf.x_axis) - origin;
    let x_norm = x_vec.norm();
    if x_norm < COINCIDENT_TOL {
        return Err(AlfError::CoincidentAtoms {
            a: atoms.name(alf.origin),
            b: atoms.name(alf.x_axis),
        });
    }
    let c1 = x_vec / x_norm;

    let c2 = match alf.xy_plane {
        Some(xy) => {
            let xy_vec = atoms.coord(xy) - origin;
            let xy_norm = xy_vec.norm();
            if xy_norm < COINCIDENT_TOL {
                return Err(AlfError::CoincidentAtoms {
                    a: atoms.name(alf.origin),
                    b: atoms.name(xy),
                });
            }
            if x_vec.cross(&xy_vec).norm() < COLLINEAR_TOL * x_norm * xy_norm {
                return Err(AlfError::CollinearAlf {
                    atom: atoms.name(alf.origin),
                    alf: *alf,
                });
            }
            let sigma = -x_vec.dot(&xy_vec) / x_vec.dot(&x_vec);
            (sigma * x_vec + xy_vec).normalize()
        }
        None => diatomic_y(&c1),
    };
    let c3 = c1.cross(&c2);

    Ok(Mat3::from_rows(&[c1.transpose(), c2.transpose(), c3.transpose()]))
}

fn diatomic_y(c1: &Vec3) -> Vec3 {
    let mut axis = 0;
    for i in 1..3 {
        if c1[i].abs() < c1[axis].abs() {
            axis = i;
        }
    }
    let e = Vec3::ith(axis, 1.0);
    (e - e.dot(c1) * *c1).normalize()
}
