use derive_more::Display;
use log::info;
use ndarray::Array2;

use filt::{is_prime, Coeff, PrimeField};
use filt_dist::{greedy_perm, DnsDistMat, Metric, SpsDistMat};

use crate::complex::RipsComplex;
use crate::diagram::PersistenceDiagram;
use crate::reduce::persistence;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum RipsError {
    #[display("coefficient {_0} is not prime")]
    NotPrime(Coeff),

    #[display("greedy subsampling is not supported for sparse input")]
    SparsePerm,

    #[display("cannot subsample {_0} of {_1} points")]
    BadPerm(usize, usize),
}

impl std::error::Error for RipsError {}

pub enum RipsInput {
    Points(Array2<f64>, Metric),
    Dense(DnsDistMat),
    Sparse(SpsDistMat)
}

#[derive(Clone, Debug, PartialEq)]
pub struct RipsParams {
    pub max_dim: usize,
    pub thresh: f64,
    pub coeff: Coeff,
    pub n_perm: Option<usize>
}

impl Default for RipsParams {
    fn default() -> Self {
        Self {
            max_dim: 1,
            thresh: f64::INFINITY,
            coeff: 2,
            n_perm: None
        }
    }
}

impl RipsParams {
    pub fn max_dim(mut self, max_dim: usize) -> Self {
        self.max_dim = max_dim;
        self
    }

    pub fn thresh(mut self, thresh: f64) -> Self {
        self.thresh = thresh;
        self
    }

    pub fn coeff(mut self, coeff: Coeff) -> Self {
        self.coeff = coeff;
        self
    }

    pub fn n_perm(mut self, n_perm: Option<usize>) -> Self {
        self.n_perm = n_perm;
        self
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RipsResult {
    pub diagram: PersistenceDiagram,
    pub num_edges: usize,
    pub idx_perm: Vec<usize>,
    pub r_cover: f64
}

/// Computes the persistence diagram of the Vietoris-Rips filtration of
/// the input, in dimensions 0..=max_dim.
pub fn rips(input: RipsInput, params: &RipsParams) -> Result<RipsResult, RipsError> {
    if !is_prime(params.coeff) {
        return Err(RipsError::NotPrime(params.coeff))
    }
    let field = PrimeField::new(params.coeff);

    info!("rips: max_dim = {}, thresh = {}, coeff = {}.", params.max_dim, params.thresh, params.coeff);

    match input {
        RipsInput::Points(points, metric) => {
            let dm = DnsDistMat::from_points(&points, metric);
            run_dense(dm, params, &field)
        },
        RipsInput::Dense(dm) => {
            run_dense(dm, params, &field)
        },
        RipsInput::Sparse(sm) => {
            if params.n_perm.is_some() {
                return Err(RipsError::SparsePerm)
            }
            let n = sm.size();
            let (diagram, num_edges) = run(&sm, params, &field);
            Ok(RipsResult {
                diagram, num_edges,
                idx_perm: (0..n).collect(),
                r_cover: 0.0
            })
        }
    }
}

fn run_dense(dm: DnsDistMat, params: &RipsParams, field: &PrimeField) -> Result<RipsResult, RipsError> {
    let n = dm.size();

    if let Some(k) = params.n_perm {
        if k < 1 || k > n {
            return Err(RipsError::BadPerm(k, n))
        }
        let gp = greedy_perm(&dm, k);
        let sub = gp.sub_matrix();
        let r_cover = gp.r_cover();
        let (diagram, num_edges) = run(&sub, params, field);
        Ok(RipsResult {
            diagram, num_edges,
            idx_perm: gp.idx_perm,
            r_cover
        })
    } else {
        let (diagram, num_edges) = run(&dm, params, field);
        Ok(RipsResult {
            diagram, num_edges,
            idx_perm: (0..n).collect(),
            r_cover: 0.0
        })
    }
}

fn run<D>(dist: &D, params: &RipsParams, field: &PrimeField) -> (PersistenceDiagram, usize)
where D: filt_dist::DistOracle {
    let cpx = RipsComplex::new(dist, params.max_dim, params.thresh);
    persistence(&cpx, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn square() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]
    }

    #[test]
    fn points_input() {
        let input = RipsInput::Points(square(), Metric::Euclidean);
        let res = rips(input, &RipsParams::default()).unwrap();

        assert_eq!(res.num_edges, 6);
        assert_eq!(res.idx_perm, vec![0, 1, 2, 3]);
        assert_eq!(res.r_cover, 0.0);

        let h1 = res.diagram.intervals(1);
        assert_eq!(h1.len(), 1);
        assert!((h1[0].death - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_input() {
        let input = RipsInput::Points(Array2::zeros((0, 2)), Metric::Euclidean);
        let res = rips(input, &RipsParams::default()).unwrap();

        assert_eq!(res.num_edges, 0);
        assert!(res.idx_perm.is_empty());
        assert!(res.diagram.intervals(0).is_empty());
        assert!(res.diagram.intervals(1).is_empty());
    }

    #[test]
    fn single_point() {
        let input = RipsInput::Points(array![[1.0, 2.0]], Metric::Euclidean);
        let res = rips(input, &RipsParams::default()).unwrap();

        let h0 = res.diagram.intervals(0);
        assert_eq!(h0.len(), 1);
        assert!(h0[0].is_essential());
        assert_eq!(h0[0].birth, 0.0);
    }

    #[test]
    fn bad_coeff() {
        let input = RipsInput::Points(square(), Metric::Euclidean);
        let err = rips(input, &RipsParams::default().coeff(4)).unwrap_err();
        assert_eq!(err, RipsError::NotPrime(4));
    }

    #[test]
    fn sparse_perm_rejected() {
        let sm = SpsDistMat::from_triplets(2, &[0], &[1], &[1.0]).unwrap();
        let err = rips(RipsInput::Sparse(sm), &RipsParams::default().n_perm(Some(1))).unwrap_err();
        assert_eq!(err, RipsError::SparsePerm);
    }

    #[test]
    fn bad_perm_rejected() {
        let input = RipsInput::Points(square(), Metric::Euclidean);
        let err = rips(input, &RipsParams::default().n_perm(Some(9))).unwrap_err();
        assert_eq!(err, RipsError::BadPerm(9, 4));
    }

    #[test]
    fn greedy_duplicates() {
        // duplicated corners of a square: subsampling to 4 drops the copies
        let pts = array![
            [0.0, 0.0], [0.0, 0.0],
            [1.0, 0.0], [1.0, 0.0],
            [1.0, 1.0], [1.0, 1.0],
            [0.0, 1.0], [0.0, 1.0],
        ];
        let full = rips(
            RipsInput::Points(square(), Metric::Euclidean),
            &RipsParams::default()
        ).unwrap();
        let sub = rips(
            RipsInput::Points(pts, Metric::Euclidean),
            &RipsParams::default().n_perm(Some(4))
        ).unwrap();

        assert_eq!(sub.r_cover, 0.0);
        assert_eq!(sub.idx_perm.len(), 4);
        assert_eq!(sub.diagram.intervals(1), full.diagram.intervals(1));
    }

    #[test]
    fn coeff_three() {
        let input = RipsInput::Points(square(), Metric::Euclidean);
        let res = rips(input, &RipsParams::default().coeff(3)).unwrap();

        let h1 = res.diagram.intervals(1);
        assert_eq!(h1.len(), 1);
    }

    #[test]
    fn thresh_cuts_edges() {
        let input = RipsInput::Points(square(), Metric::Euclidean);
        let res = rips(input, &RipsParams::default().thresh(1.0)).unwrap();

        // the two diagonals are dropped
        assert_eq!(res.num_edges, 4);
        assert!(res.diagram.intervals(1)[0].is_essential());
    }
}
