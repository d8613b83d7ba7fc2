//! rank 1. the spherical components are a relabeling of the Cartesian vector

use crate::tensor::CartesianTensor;

/// q10, q11c, q11s
pub fn spherical_to_cartesian(q: &[f64; 3]) -> CartesianTensor {
    let [q10, q11c, q11s] = *q;
    CartesianTensor::from_independent(1, &[q11c, q11s, q10])
}

pub fn cartesian_to_spherical(t: &CartesianTensor) -> [f64; 3] {
    debug_assert_eq!(t.rank(), 1);
    let [x, y, z] = [t.get(&[0]), t.get(&[1]), t.get(&[2])];
    [z, x, y]
}
