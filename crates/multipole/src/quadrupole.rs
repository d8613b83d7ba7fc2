//! rank 2. the Cartesian tensor is traceless with Q_zz = q20

use crate::{
    consts::{RT1_3, RT3_4, RT4_3},
    tensor::CartesianTensor,
};

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

/// q20, q21c, q21s, q22c, q22s
pub fn spherical_to_cartesian(q: &[f64; 5]) -> CartesianTensor {
    let [q20, q21c, q21s, q22c, q22s] = *q;
    let xx = RT3_4 * q22c - 0.5 * q20;
    let xy = RT3_4 * q22s;
    let xz = RT3_4 * q21c;
    let yy = -RT3_4 * q22c - 0.5 * q20;
    let yz = RT3_4 * q21s;
    let zz = q20;
    CartesianTensor::from_independent(2, &[xx, xy, xz, yy, yz, zz])
}

pub fn cartesian_to_spherical(t: &CartesianTensor) -> [f64; 5] {
    debug_assert_eq!(t.rank(), 2);
    let q = |i, j| t.get(&[i, j]);
    [
        q(Z, Z),
        RT4_3 * q(X, Z),
        RT4_3 * q(Y, Z),
        RT1_3 * (q(X, X) - q(Y, Y)),
        RT4_3 * q(X, Y),
    ]
}
