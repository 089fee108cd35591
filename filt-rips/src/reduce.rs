use ahash::AHashMap;
use itertools::Itertools;
use log::info;

use filt::{Coeff, PrimeField, UnionFind};
use filt_dist::DistOracle;

use crate::complex::RipsComplex;
use crate::diagram::{PersistenceDiagram, PersistenceInterval};
use crate::simplex::{edge_vertices, DiamSimplex, SxIndex};

/// Computes the persistence diagram of the filtration by column reduction
/// of its boundary matrices over Z/p. Returns the diagram together with
/// the number of edges below the threshold.
pub fn persistence<D>(cpx: &RipsComplex<D>, field: &PrimeField) -> (PersistenceDiagram, usize)
where D: DistOracle {
    let max_dim = cpx.max_dim();
    let edges = cpx.edges();
    let num_edges = edges.len();

    info!("reduce: n = {}, max_dim = {max_dim}, edges = {num_edges}.", cpx.size());

    let (ints, creators) = zero_dim(cpx, &edges);

    let mut dgms = vec![ints];
    let mut rows = edges;
    let mut creators = creators;

    for d in 1..=max_dim {
        let cols = cpx.simplices(d + 1);
        let (ints, col_creators) = reduce_dim(cpx, field, d, &rows, &creators, &cols);

        dgms.push(ints);
        rows = cols;
        creators = col_creators;
    }

    (PersistenceDiagram::new(dgms), num_edges)
}

// H0 by Kruskal over the sorted edges, following the elder rule.
// Also flags the edges that close a cycle, the potential creators in dim 1.
fn zero_dim<D>(cpx: &RipsComplex<D>, edges: &[DiamSimplex]) -> (Vec<PersistenceInterval>, Vec<bool>)
where D: DistOracle {
    let n = cpx.size();
    let births = (0..n).map(|i| cpx.dist().vertex_birth(i)).collect_vec();
    let mut uf = UnionFind::with_births(births);

    let mut ints = vec![];
    let mut creators = vec![false; edges.len()];

    for (k, e) in edges.iter().enumerate() {
        let (i, j) = edge_vertices(e.index, n, cpx.binom());

        if let Some((birth, _)) = uf.union(i, j) {
            if e.diameter > birth {
                ints.push(PersistenceInterval::new(birth, e.diameter, 0));
            }
        } else {
            creators[k] = true;
        }
    }

    // vertices born after thresh never enter the filtration
    for r in uf.roots() {
        let b = uf.birth(r);
        if b <= cpx.thresh() {
            ints.push(PersistenceInterval::essential(b, 0));
        }
    }

    (ints, creators)
}

// Reduces the boundary matrix from (dim+1)-simplices to dim-simplices.
// A column whose pivot lands on row r kills the class created by rows[r];
// a column that reduces to zero creates a class in dim+1.
fn reduce_dim<D>(
    cpx: &RipsComplex<D>,
    field: &PrimeField,
    dim: usize,
    rows: &[DiamSimplex],
    row_creators: &[bool],
    cols: &[DiamSimplex]
) -> (Vec<PersistenceInterval>, Vec<bool>)
where D: DistOracle {
    let row_pos: AHashMap<SxIndex, usize> =
        rows.iter().enumerate().map(|(k, s)| (s.index, k)).collect();

    let mut reduced: Vec<Vec<(usize, Coeff)>> = Vec::with_capacity(cols.len());
    let mut pivot_col: Vec<Option<(usize, Coeff)>> = vec![None; rows.len()];
    let mut killed = vec![false; rows.len()];

    let mut ints = vec![];
    let mut col_creators = vec![false; cols.len()];

    for (j, c) in cols.iter().enumerate() {
        let mut col = cpx.boundary(c.index, dim + 1).into_iter().filter_map(|(idx, sign)|
            row_pos.get(&idx).map(|&r| (r, field.normalize(sign)))
        ).collect_vec();
        col.sort_unstable_by_key(|&(r, _)| r);

        while let Some(&(r, a)) = col.last() {
            let Some((k, b)) = pivot_col[r] else { break };
            let f = field.neg(field.div(a, b));
            col = add_mul(&col, &reduced[k], f, field);
        }

        if let Some(&(r, a)) = col.last() {
            let birth = rows[r].diameter;
            if c.diameter > birth {
                ints.push(PersistenceInterval::new(birth, c.diameter, dim));
            }
            killed[r] = true;
            pivot_col[r] = Some((j, a));
        } else {
            col_creators[j] = true;
        }

        reduced.push(col);
    }

    for (r, s) in rows.iter().enumerate() {
        if row_creators[r] && !killed[r] {
            ints.push(PersistenceInterval::essential(s.diameter, dim));
        }
    }

    (ints, col_creators)
}

// col + f * other, both sorted by row.
fn add_mul(
    col: &[(usize, Coeff)],
    other: &[(usize, Coeff)],
    f: Coeff,
    field: &PrimeField
) -> Vec<(usize, Coeff)> {
    let mut out = Vec::with_capacity(col.len() + other.len());
    let (mut i, mut j) = (0, 0);

    while i < col.len() && j < other.len() {
        use std::cmp::Ordering::*;
        match usize::cmp(&col[i].0, &other[j].0) {
            Less => {
                out.push(col[i]);
                i += 1;
            },
            Greater => {
                let v = field.mul(f, other[j].1);
                if v != 0 {
                    out.push((other[j].0, v));
                }
                j += 1;
            },
            Equal => {
                let v = field.add(col[i].1, field.mul(f, other[j].1));
                if v != 0 {
                    out.push((col[i].0, v));
                }
                i += 1;
                j += 1;
            }
        }
    }

    out.extend_from_slice(&col[i..]);

    for &(r, b) in &other[j..] {
        let v = field.mul(f, b);
        if v != 0 {
            out.push((r, v));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use filt_dist::{DnsDistMat, SpsDistMat};

    fn f2() -> PrimeField {
        PrimeField::new(2)
    }

    fn run<D: DistOracle>(dist: &D, max_dim: usize, thresh: f64) -> PersistenceDiagram {
        let cpx = RipsComplex::new(dist, max_dim, thresh);
        persistence(&cpx, &f2()).0
    }

    #[test]
    fn two_points() {
        let dm = DnsDistMat::from_fn(2, |i, j| if i == j { 0.0 } else { 1.0 });
        let dgm = run(&dm, 1, f64::INFINITY);

        let h0 = dgm.intervals(0);
        assert_eq!(h0.len(), 2);
        assert_eq!(h0[0], PersistenceInterval::new(0.0, 1.0, 0));
        assert!(h0[1].is_essential());

        assert!(dgm.intervals(1).is_empty());
    }

    #[test]
    fn triangle() {
        let dm = DnsDistMat::from_fn(3, |i, j| if i == j { 0.0 } else { 1.0 });
        let dgm = run(&dm, 1, f64::INFINITY);

        assert_eq!(dgm.finite(0).count(), 2);
        assert_eq!(dgm.essential(0).count(), 1);

        // the cycle closes and dies at the same value
        assert!(dgm.intervals(1).is_empty());
    }

    #[test]
    fn square() {
        // unit square: one loop born at 1, filled at √2
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let dm = DnsDistMat::from_fn(4, |i, j| {
            let (xi, yi) = pts[i];
            let (xj, yj) = pts[j];
            f64::hypot(xi - xj, yi - yj)
        });
        let dgm = run(&dm, 1, f64::INFINITY);

        assert_eq!(dgm.essential(0).count(), 1);
        assert_eq!(dgm.finite(0).count(), 3);

        let h1 = dgm.intervals(1);
        assert_eq!(h1.len(), 1);
        assert!((h1[0].birth - 1.0).abs() < 1e-12);
        assert!((h1[0].death - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn square_truncated() {
        // thresh below √2: the loop never dies
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let dm = DnsDistMat::from_fn(4, |i, j| {
            let (xi, yi) = pts[i];
            let (xj, yj) = pts[j];
            f64::hypot(xi - xj, yi - yj)
        });
        let dgm = run(&dm, 1, 1.2);

        let h1 = dgm.intervals(1);
        assert_eq!(h1.len(), 1);
        assert!(h1[0].is_essential());
        assert!((h1[0].birth - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sparse_cycle() {
        // 4-cycle given by its edges only: H1 class never fills in
        let rows = [0, 1, 2, 3];
        let cols = [1, 2, 3, 0];
        let vals = [1.0; 4];
        let dm = SpsDistMat::from_triplets(4, &rows, &cols, &vals).unwrap();
        let dgm = run(&dm, 1, f64::INFINITY);

        assert_eq!(dgm.essential(0).count(), 1);
        let h1 = dgm.intervals(1);
        assert_eq!(h1.len(), 1);
        assert!(h1[0].is_essential());
        assert_eq!(h1[0].birth, 1.0);
    }

    #[test]
    fn vertex_births() {
        // nonzero diagonal delays vertex births
        let rows = [0, 1, 0];
        let cols = [0, 1, 1];
        let vals = [0.5, 0.2, 1.0];
        let dm = SpsDistMat::from_triplets(2, &rows, &cols, &vals).unwrap();
        let dgm = run(&dm, 1, f64::INFINITY);

        let h0 = dgm.intervals(0);
        assert_eq!(h0.len(), 2);
        assert_eq!(h0[0], PersistenceInterval::essential(0.2, 0));
        assert_eq!(h0[1], PersistenceInterval::new(0.5, 1.0, 0));
    }

    #[test]
    fn vertex_births_dense() {
        // nonzero diagonal on dense input, no sparse conversion
        let d = [[0.5, 2.0], [2.0, 0.2]];
        let dm = DnsDistMat::from_fn(2, |i, j| d[i][j]);
        let dgm = run(&dm, 1, f64::INFINITY);

        let h0 = dgm.intervals(0);
        assert_eq!(h0.len(), 2);
        assert_eq!(h0[0], PersistenceInterval::essential(0.2, 0));
        assert_eq!(h0[1], PersistenceInterval::new(0.5, 2.0, 0));
    }

    #[test]
    fn two_dim() {
        // octahedron ±e_i: a 2-sphere born at √2, filled at 2
        let pts: [[f64; 3]; 6] = [
            [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0], [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
        ];
        let dm = DnsDistMat::from_fn(6, |i, j| {
            let d: f64 = (0..3).map(|k| (pts[i][k] - pts[j][k]).powi(2)).sum();
            d.sqrt()
        });
        let cpx = RipsComplex::new(&dm, 2, f64::INFINITY);
        let (dgm, num_edges) = persistence(&cpx, &f2());

        assert_eq!(num_edges, 15);
        assert_eq!(dgm.essential(0).count(), 1);
        assert_eq!(dgm.finite(0).count(), 5);
        assert!(dgm.intervals(1).is_empty());

        let h2 = dgm.intervals(2);
        assert_eq!(h2.len(), 1);
        assert!((h2[0].birth - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((h2[0].death - 2.0).abs() < 1e-12);
    }

    #[test]
    fn coeff_independence() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.5)];
        let dm = DnsDistMat::from_fn(5, |i, j| {
            let (xi, yi) = pts[i];
            let (xj, yj) = pts[j];
            f64::hypot(xi - xj, yi - yj)
        });
        let cpx = RipsComplex::new(&dm, 2, f64::INFINITY);

        let d2 = persistence(&cpx, &PrimeField::new(2)).0;
        let d3 = persistence(&cpx, &PrimeField::new(3)).0;

        assert_eq!(d2, d3);
    }

    #[test]
    fn column_arith() {
        let f = PrimeField::new(5);
        let a = vec![(0, 1), (2, 3), (4, 1)];
        let b = vec![(0, 2), (3, 1), (4, 3)];

        // a + 2b = (0: 1+4, 2: 3, 3: 2, 4: 1+6) = (2: 3, 3: 2, 4: 2) mod 5
        let c = add_mul(&a, &b, 2, &f);
        assert_eq!(c, vec![(2, 3), (3, 2), (4, 2)]);
    }
}
