use std::cmp::Ordering;
use filt::BinomialTable;

pub type SxIndex = u64;

/// Combinatorial number system coding: a d-simplex with vertices
/// v_0 < … < v_d gets index Σ C(v_i, i + 1). Within one dimension the
/// coding is a bijection onto 0..C(n, d + 1).
pub fn simplex_index(verts: &[usize], binom: &BinomialTable) -> SxIndex {
    verts.iter().enumerate().map(|(i, &v)| binom.get(v, i + 1)).sum()
}

pub fn simplex_vertices(index: SxIndex, dim: usize, n: usize, binom: &BinomialTable) -> Vec<usize> {
    let mut verts = vec![0; dim + 1];
    let mut idx = index;
    let mut top = n;

    for k in (1..=dim + 1).rev() {
        let v = max_vertex(idx, k, top, binom);
        verts[k - 1] = v;
        idx -= binom.get(v, k);
        top = v;
    }

    debug_assert!(idx == 0);
    verts
}

pub fn edge_vertices(index: SxIndex, n: usize, binom: &BinomialTable) -> (usize, usize) {
    let vs = simplex_vertices(index, 1, n, binom);
    (vs[0], vs[1])
}

// largest v < top with C(v, k) <= idx, by binary search
fn max_vertex(idx: SxIndex, k: usize, top: usize, binom: &BinomialTable) -> usize {
    let (mut lo, mut hi) = (k - 1, top);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if binom.get(mid, k) <= idx {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// A simplex in the filtration, identified by its combinatorial index
/// within its dimension. Ordered by (diameter, index), which is the
/// order simplices enter the filtration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiamSimplex {
    pub diameter: f64,
    pub index: SxIndex
}

impl DiamSimplex {
    pub fn new(diameter: f64, index: SxIndex) -> Self {
        Self { diameter, index }
    }
}

impl Eq for DiamSimplex {}

impl Ord for DiamSimplex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.diameter.total_cmp(&other.diameter).then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for DiamSimplex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
