use std::fmt::Display;

use ndarray::{ArrayD, Dimension, IxDyn};

use crate::Mat3;

/// A fully symmetric Cartesian tensor of rank R, stored densely as a 3^R
/// array. Every permutation of an index tuple addresses the same value
#[derive(Clone, Debug, PartialEq)]
pub struct CartesianTensor(ArrayD<f64>);

/// the number of independent components of a symmetric rank `rank` tensor
pub const fn n_independent(rank: usize) -> usize {
    (rank + 1) * (rank + 2) / 2
}

/// the sorted index tuples addressing the independent components of a
/// symmetric tensor of rank `rank`, in lexicographic order. for rank 2 this is
/// xx, xy, xz, yy, yz, zz
pub fn independent_indices(rank: usize) -> Vec<Vec<usize>> {
    fn helper(
        start: usize,
        left: usize,
        cur: &mut Vec<usize>,
        ret: &mut Vec<Vec<usize>>,
    ) {
        if left == 0 {
            ret.push(cur.clone());
            return;
        }
        for i in start..3 {
            cur.push(i);
            helper(i, left - 1, cur, ret);
            cur.pop();
        }
    }
    let mut ret = Vec::with_capacity(n_independent(rank));
    helper(0, rank, &mut Vec::with_capacity(rank), &mut ret);
    ret
}

/// the position of the sorted index tuple `sorted` in
/// [independent_indices]. the tuple is ranked by counting the combinations
/// that precede it
fn packed_position(sorted: &[usize]) -> usize {
    // number of nondecreasing tuples of length `len` over the values lo..3
    fn count(lo: usize, len: usize) -> usize {
        let k = 3 - lo;
        if k == 0 {
            return usize::from(len == 0);
        }
        // C(len + k - 1, k - 1)
        let mut num = 1;
        let mut den = 1;
        for i in 0..k - 1 {
            num *= len + k - 1 - i;
            den *= i + 1;
        }
        num / den
    }
    let mut pos = 0;
    let mut lo = 0;
    for (depth, &v) in sorted.iter().enumerate() {
        let left = sorted.len() - depth - 1;
        for smaller in lo..v {
            pos += count(smaller, left);
        }
        lo = v;
    }
    pos
}

impl CartesianTensor {
    pub fn zeros(rank: usize) -> Self {
        Self(ArrayD::zeros(IxDyn(&vec![3; rank])))
    }

    /// unpack the independent components in `values`, ordered as in
    /// [independent_indices], into a dense symmetric tensor. panics if the
    /// length of `values` is not [n_independent] for `rank`
    pub fn from_independent(rank: usize, values: &[f64]) -> Self {
        assert_eq!(
            values.len(),
            n_independent(rank),
            "wrong number of independent components for rank {rank}"
        );
        let mut ret = Self::zeros(rank);
        let mut sorted = Vec::with_capacity(rank);
        for (idx, v) in ret.0.indexed_iter_mut() {
            sorted.clear();
            sorted.extend_from_slice(idx.slice());
            sorted.sort_unstable();
            *v = values[packed_position(&sorted)];
        }
        ret
    }

    /// pack `self` into its independent components, the inverse of
    /// [CartesianTensor::from_independent]
    pub fn independent(&self) -> Vec<f64> {
        independent_indices(self.rank())
            .iter()
            .map(|idx| self.get(idx))
            .collect()
    }

    pub fn rank(&self) -> usize {
        self.0.ndim()
    }

    pub fn get(&self, index: &[usize]) -> f64 {
        self.0[index]
    }

    pub fn as_array(&self) -> &ArrayD<f64> {
        &self.0
    }

    /// contract every axis of `self` with `c`:
    ///
    ///   T'_{i1..iR} = Σ C[i1, a1] ⋯ C[iR, aR] T[a1..aR]
    ///
    /// one axis at a time. the same matrix is applied along every axis, so a
    /// symmetric input yields a symmetric output
    pub fn rotate(&self, c: &Mat3) -> Self {
        let mut t = self.0.clone();
        for axis in 0..self.rank() {
            let mut out = ArrayD::zeros(t.raw_dim());
            let mut src = Vec::with_capacity(self.rank());
            for (idx, v) in out.indexed_iter_mut() {
                src.clear();
                src.extend_from_slice(idx.slice());
                let i = src[axis];
                let mut sum = 0.0;
                for a in 0..3 {
                    src[axis] = a;
                    sum += c[(i, a)] * t[src.as_slice()];
                }
                *v = sum;
            }
            t = out;
        }
        Self(t)
    }

    /// the sum of the squares of every dense component. this is invariant
    /// under orthogonal transformations
    pub fn sum_of_squares(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum()
    }

    /// report whether every permutation of every index addresses the same
    /// value to within `eps`
    pub fn is_symmetric(&self, eps: f64) -> bool {
        let mut sorted = Vec::with_capacity(self.rank());
        self.0.indexed_iter().all(|(idx, v)| {
            sorted.clear();
            sorted.extend_from_slice(idx.slice());
            sorted.sort_unstable();
            (v - self.0[sorted.as_slice()]).abs() < eps
        })
    }

    /// report whether contracting the first two indices gives zero to within
    /// `eps`. tensors of rank below 2 are trivially traceless
    pub fn is_traceless(&self, eps: f64) -> bool {
        let rank = self.rank();
        if rank < 2 {
            return true;
        }
        let rest = ArrayD::<f64>::zeros(IxDyn(&vec![3; rank - 2]));
        let mut src = Vec::with_capacity(rank);
        rest.indexed_iter().all(|(idx, _)| {
            let mut tr = 0.0;
            for k in 0..3 {
                src.clear();
                src.extend([k, k]);
                src.extend_from_slice(idx.slice());
                tr += self.0[src.as_slice()];
            }
            tr.abs() < eps
        })
    }
}

impl Display for CartesianTensor {
    /// write the independent components labeled by their axes, like
    /// `xx = 1.0`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const AXES: [char; 3] = ['x', 'y', 'z'];
        let precision = f.precision().unwrap_or(8);
        for idx in independent_indices(self.rank()) {
            let label: String = idx.iter().map(|&i| AXES[i]).collect();
            writeln!(f, "{label:>4} = {:.p$}", self.get(&idx), p = precision)?;
        }
        Ok(())
    }
}
