//! rank 4

use crate::{
    consts::{
        RT1_35, RT4_5, RT5_8, RT5_16, RT5_64, RT5_128, RT8_5, RT8_35,
        RT16_5, RT16_35, RT35_64, RT35_128, RT45_128,
    },
    tensor::CartesianTensor,
};

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

/// q40, q41c, q41s, q42c, q42s, q43c, q43s, q44c, q44s
pub fn spherical_to_cartesian(q: &[f64; 9]) -> CartesianTensor {
    let [q40, q41c, q41s, q42c, q42s, q43c, q43s, q44c, q44s] = *q;
    let xxxx = 0.375 * q40 - RT5_16 * q42c + RT35_64 * q44c;
    let xxxy = -RT5_64 * q42s + RT35_64 * q44s;
    let xxxz = -RT45_128 * q41c + RT35_128 * q43c;
    let xxyy = 0.125 * q40 - RT35_64 * q44c;
    let xxyz = -RT5_128 * q41s + RT35_128 * q43s;
    let xxzz = -0.5 * q40 + RT5_16 * q42c;
    let xyyy = -RT5_64 * q42s - RT35_64 * q44s;
    let xyyz = -RT5_128 * q41c - RT35_128 * q43c;
    let xyzz = RT5_16 * q42s;
    let xzzz = RT5_8 * q41c;
    let yyyy = 0.375 * q40 + RT5_16 * q42c + RT35_64 * q44c;
    let yyyz = -RT45_128 * q41s - RT35_128 * q43s;
    let yyzz = -0.5 * q40 - RT5_16 * q42c;
    let yzzz = RT5_8 * q41s;
    let zzzz = q40;
    CartesianTensor::from_independent(
        4,
        &[
            xxxx, xxxy, xxxz, xxyy, xxyz, xxzz, xyyy, xyyz, xyzz, xzzz, yyyy,
            yyyz, yyzz, yzzz, zzzz,
        ],
    )
}

pub fn cartesian_to_spherical(t: &CartesianTensor) -> [f64; 9] {
    debug_assert_eq!(t.rank(), 4);
    let h = |i, j, k, l| t.get(&[i, j, k, l]);
    [
        h(Z, Z, Z, Z),
        RT8_5 * h(X, Z, Z, Z),
        RT8_5 * h(Y, Z, Z, Z),
        RT4_5 * (h(X, X, Z, Z) - h(Y, Y, Z, Z)),
        RT16_5 * h(X, Y, Z, Z),
        RT8_35 * (h(X, X, X, Z) - 3.0 * h(X, Y, Y, Z)),
        RT8_35 * (3.0 * h(X, X, Y, Z) - h(Y, Y, Y, Z)),
        RT1_35 * (h(X, X, X, X) - 6.0 * h(X, X, Y, Y) + h(Y, Y, Y, Y)),
        RT16_35 * (h(X, X, X, Y) - h(X, Y, Y, Y)),
    ]
}
