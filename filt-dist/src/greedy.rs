use itertools::Itertools;
use log::info;
use ndarray::Array2;

use crate::DnsDistMat;

/// Result of a furthest-point (greedy) subsampling of a point set.
/// `idx_perm[k]` is the k-th chosen point, `lambdas[k]` the covering radius
/// after choosing it, and `dperm2all` the distances from chosen points to
/// all points.
#[derive(Clone, Debug)]
pub struct GreedyPerm {
    pub idx_perm: Vec<usize>,
    pub lambdas: Vec<f64>,
    pub dperm2all: Array2<f64>
}

impl GreedyPerm {
    /// Covering radius of the chosen points over the full set.
    pub fn r_cover(&self) -> f64 {
        self.lambdas.last().copied().unwrap_or(0.0)
    }

    /// The distance matrix restricted to the chosen points.
    pub fn sub_matrix(&self) -> DnsDistMat {
        DnsDistMat::from_fn(self.idx_perm.len(), |i, j| {
            self.dperm2all[[i, self.idx_perm[j]]]
        })
    }
}

/// Furthest-point sampling of `n_perm` points, starting from point 0.
pub fn greedy_perm(dm: &DnsDistMat, n_perm: usize) -> GreedyPerm {
    let n = dm.size();
    assert!(n_perm >= 1 && n_perm <= n);

    info!("greedy permutation: {n_perm} of {n} points");

    let row = |i: usize| (0..n).map(|j| dm.dist(i, j)).collect_vec();

    let mut idx_perm = vec![0; n_perm];
    let mut lambdas = vec![0.0; n_perm];

    let mut ds = row(0);
    let mut rows = vec![ds.clone()];

    for k in 1..n_perm {
        let idx = arg_max(&ds);
        idx_perm[k] = idx;
        lambdas[k - 1] = ds[idx];

        let r = row(idx);
        for j in 0..n {
            ds[j] = f64::min(ds[j], r[j]);
        }
        rows.push(r);
    }
    lambdas[n_perm - 1] = ds.iter().copied().fold(0.0, f64::max);

    let dperm2all = Array2::from_shape_fn((n_perm, n), |(i, j)| rows[i][j]);

    GreedyPerm { idx_perm, lambdas, dperm2all }
}

// first position of the maximum on ties
fn arg_max(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] {
            best = i;
        }
    }
    best
}
