use itertools::Itertools;
use log::trace;

use filt::BinomialTable;
use filt_dist::DistOracle;

use crate::{simplex_index, simplex_vertices, DiamSimplex, SxIndex};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// The Vietoris-Rips filtration over a distance oracle: the clique complex
/// of the edges of length <= thresh, each simplex weighted by its diameter
/// (the max over its pairwise distances and vertex births).
pub struct RipsComplex<'a, D>
where D: DistOracle {
    dist: &'a D,
    max_dim: usize,
    thresh: f64,
    binom: BinomialTable,
    nbrs: Vec<Vec<(usize, f64)>>
}

impl<'a, D> RipsComplex<'a, D>
where D: DistOracle {
    pub fn new(dist: &'a D, max_dim: usize, thresh: f64) -> Self {
        let n = dist.size();
        let binom = BinomialTable::new(usize::max(n, 2), max_dim + 2);
        let nbrs = (0..n).map(|i| dist.neighbors(i)).collect();
        Self { dist, max_dim, thresh, binom, nbrs }
    }

    pub fn size(&self) -> usize {
        self.dist.size()
    }

    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    pub fn thresh(&self) -> f64 {
        self.thresh
    }

    pub fn dist(&self) -> &D {
        self.dist
    }

    pub fn binom(&self) -> &BinomialTable {
        &self.binom
    }

    pub fn vertices(&self) -> Vec<DiamSimplex> {
        let mut vs = (0..self.size()).filter_map(|i| {
            let b = self.dist.vertex_birth(i);
            (b <= self.thresh).then(|| DiamSimplex::new(b, i as SxIndex))
        }).collect_vec();
        vs.sort_unstable();
        vs
    }

    pub fn edges(&self) -> Vec<DiamSimplex> {
        let mut out = vec![];
        for i in 0..self.size() {
            let b_i = self.dist.vertex_birth(i);
            for &(j, d) in &self.nbrs[i] {
                if j <= i {
                    continue
                }
                let diam = f64::max(d, f64::max(b_i, self.dist.vertex_birth(j)));
                if diam <= self.thresh {
                    out.push(DiamSimplex::new(diam, simplex_index(&[i, j], &self.binom)));
                }
            }
        }
        out.sort_unstable();
        out
    }

    /// All dim-simplices of the filtration, in filtration order.
    pub fn simplices(&self, dim: usize) -> Vec<DiamSimplex> {
        assert!(dim <= self.max_dim + 1);

        if dim == 0 {
            return self.vertices()
        }
        if dim == 1 {
            return self.edges()
        }

        let n = self.size();

        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                let found = if filt::is_multithread_enabled() {
                    (0..n).into_par_iter().map(|v0|
                        self.cliques_from(v0, dim)
                    ).collect::<Vec<_>>()
                } else {
                    (0..n).map(|v0| self.cliques_from(v0, dim)).collect_vec()
                };
            } else {
                let found = (0..n).map(|v0| self.cliques_from(v0, dim)).collect_vec();
            }
        }

        let mut out = found.concat();
        out.sort_unstable();

        trace!("dim {dim}: {} simplices", out.len());
        out
    }

    /// Boundary of the given dim-simplex: (face index, sign) pairs.
    pub fn boundary(&self, index: SxIndex, dim: usize) -> Vec<(SxIndex, i64)> {
        let verts = simplex_vertices(index, dim, self.size(), &self.binom);
        (0..=dim).map(|i| {
            let mut face = verts.clone();
            face.remove(i);
            let sign = if i % 2 == 0 { 1 } else { -1 };
            (simplex_index(&face, &self.binom), sign)
        }).collect()
    }

    fn cliques_from(&self, v0: usize, dim: usize) -> Vec<DiamSimplex> {
        let mut out = vec![];
        let b0 = self.dist.vertex_birth(v0);

        if b0 <= self.thresh {
            let mut verts = vec![v0];
            self.extend_clique(&mut verts, b0, dim, &mut out);
        }
        out
    }

    // extend only past the largest vertex, so each clique is found once
    fn extend_clique(&self, verts: &mut Vec<usize>, diam: f64, dim: usize, out: &mut Vec<DiamSimplex>) {
        if verts.len() == dim + 1 {
            out.push(DiamSimplex::new(diam, simplex_index(verts, &self.binom)));
            return
        }

        let last = verts[verts.len() - 1];
        for k in 0..self.nbrs[last].len() {
            let j = self.nbrs[last][k].0;
            if j <= last {
                continue
            }
            let Some(d) = self.diam_with(verts, diam, j) else {
                continue
            };
            verts.push(j);
            self.extend_clique(verts, d, dim, out);
            verts.pop();
        }
    }

    // diameter of verts + {j}, None if an edge is absent or thresh is exceeded
    fn diam_with(&self, verts: &[usize], diam: f64, j: usize) -> Option<f64> {
        let mut d = f64::max(diam, self.dist.vertex_birth(j));
        for &v in verts {
            let e = self.dist.edge(v, j)?;
            d = f64::max(d, e);
        }
        (d <= self.thresh).then_some(d)
    }
}
