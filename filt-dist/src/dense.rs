use itertools::Itertools;
use log::trace;
use ndarray::Array2;

use crate::{DistError, DistOracle, Metric};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

const SYM_TOL: f64 = 1e-12;

/// A dense symmetric distance matrix. The diagonal is kept explicitly:
/// nonzero diagonal entries are vertex birth times.
#[derive(Clone, Debug, PartialEq)]
pub struct DnsDistMat {
    mat: Array2<f64>
}

impl DnsDistMat {
    pub fn from_points(points: &Array2<f64>, metric: Metric) -> Self {
        let n = points.nrows();
        trace!("distance matrix: {n} points, metric = {metric}");

        let row = |i: usize| (0..n).map(|j|
            if i == j { 0.0 } else { metric.eval(points.row(i), points.row(j)) }
        ).collect_vec();

        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                let rows = if filt::is_multithread_enabled() {
                    (0..n).into_par_iter().map(row).collect::<Vec<_>>()
                } else {
                    (0..n).map(row).collect_vec()
                };
            } else {
                let rows = (0..n).map(row).collect_vec();
            }
        }

        let mat = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Self { mat }
    }

    pub fn from_fn<F>(n: usize, f: F) -> Self
    where F: Fn(usize, usize) -> f64 {
        let mat = Array2::from_shape_fn((n, n), |(i, j)| f(i, j));
        Self { mat }
    }

    pub fn try_from_array(mat: Array2<f64>) -> Result<Self, DistError> {
        let (m, n) = (mat.nrows(), mat.ncols());
        if m != n {
            return Err(DistError::NotSquare(m, n))
        }
        for i in 0..n {
            for j in i..n {
                if (mat[[i, j]] - mat[[j, i]]).abs() > SYM_TOL {
                    return Err(DistError::NotSymmetric(i, j))
                }
                if mat[[i, j]] < 0.0 {
                    return Err(DistError::Negative(i, j))
                }
            }
        }
        Ok(Self { mat })
    }

    pub fn size(&self) -> usize {
        self.mat.nrows()
    }

    pub fn dist(&self, i: usize, j: usize) -> f64 {
        self.mat[[i, j]]
    }

    pub fn inner(&self) -> &Array2<f64> {
        &self.mat
    }
}

impl DistOracle for DnsDistMat {
    fn size(&self) -> usize {
        self.mat.nrows()
    }

    fn vertex_birth(&self, i: usize) -> f64 {
        self.mat[[i, i]]
    }

    fn edge(&self, i: usize, j: usize) -> Option<f64> {
        Some(self.mat[[i, j]])
    }

    fn neighbors(&self, i: usize) -> Vec<(usize, f64)> {
        let n = self.size();
        (0..n).filter(|&j| j != i).map(|j| (j, self.mat[[i, j]])).collect()
    }
}
