//! rank 3

use crate::{
    consts::{
        RT1_10, RT1_24, RT2_3, RT3_2, RT3_5, RT3_8, RT5_8, RT5_12, RT12_5,
    },
    tensor::CartesianTensor,
};

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

/// q30, q31c, q31s, q32c, q32s, q33c, q33s
pub fn spherical_to_cartesian(q: &[f64; 7]) -> CartesianTensor {
    let [q30, q31c, q31s, q32c, q32s, q33c, q33s] = *q;
    let xxx = RT5_8 * q33c - RT3_8 * q31c;
    let xxy = RT5_8 * q33s - RT1_24 * q31s;
    let xxz = RT5_12 * q32c - 0.5 * q30;
    let xyy = -RT5_8 * q33c - RT1_24 * q31c;
    let xyz = RT5_12 * q32s;
    let xzz = RT2_3 * q31c;
    let yyy = -RT5_8 * q33s - RT3_8 * q31s;
    let yyz = -RT5_12 * q32c - 0.5 * q30;
    let yzz = RT2_3 * q31s;
    let zzz = q30;
    CartesianTensor::from_independent(
        3,
        &[xxx, xxy, xxz, xyy, xyz, xzz, yyy, yyz, yzz, zzz],
    )
}

pub fn cartesian_to_spherical(t: &CartesianTensor) -> [f64; 7] {
    debug_assert_eq!(t.rank(), 3);
    let o = |i, j, k| t.get(&[i, j, k]);
    [
        o(Z, Z, Z),
        RT3_2 * o(X, Z, Z),
        RT3_2 * o(Y, Z, Z),
        RT3_5 * (o(X, X, Z) - o(Y, Y, Z)),
        RT12_5 * o(X, Y, Z),
        RT1_10 * (o(X, X, X) - 3.0 * o(X, Y, Y)),
        RT1_10 * (3.0 * o(X, X, Y) - o(Y, Y, Y)),
    ]
}
