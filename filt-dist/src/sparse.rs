use std::collections::BTreeMap;
use log::trace;
use sprs::TriMat;

use crate::{DistError, DistOracle};

const TOL: f64 = 1e-12;

/// A sparse symmetric distance matrix in coordinate form. Entries are
/// symmetrized on construction and the adjacency is kept in (row, col)
/// lexicographic order. An absent off-diagonal entry means the edge never
/// appears in the filtration; diagonal entries are vertex birth times.
#[derive(Clone, Debug, PartialEq)]
pub struct SpsDistMat {
    n: usize,
    diag: Vec<f64>,
    adj: Vec<Vec<(usize, f64)>>
}

impl SpsDistMat {
    pub fn from_triplets(n: usize, rows: &[usize], cols: &[usize], vals: &[f64]) -> Result<Self, DistError> {
        assert_eq!(rows.len(), cols.len());
        assert_eq!(rows.len(), vals.len());

        let mut diag = vec![0.0; n];
        let mut seen = vec![false; n];
        let mut map = BTreeMap::new();

        for ((&i, &j), &v) in rows.iter().zip(cols.iter()).zip(vals.iter()) {
            if i >= n || j >= n {
                return Err(DistError::OutOfRange(i, j, n))
            }
            if v < 0.0 {
                return Err(DistError::Negative(i, j))
            }
            if i == j {
                if seen[i] && (diag[i] - v).abs() > TOL {
                    return Err(DistError::Conflict(i, i))
                }
                diag[i] = v;
                seen[i] = true;
                continue
            }

            let key = (usize::min(i, j), usize::max(i, j));
            if let Some(&w) = map.get(&key) {
                if f64::abs(w - v) > TOL {
                    return Err(DistError::Conflict(key.0, key.1))
                }
            } else {
                map.insert(key, v);
            }
        }

        trace!("sparse distance matrix: {} vertices, {} edges", n, map.len());

        // BTreeMap iteration is (row, col)-lexicographic, so the adjacency
        // lists come out sorted on both sides.
        let mut adj = vec![vec![]; n];
        for (&(i, j), &v) in map.iter() {
            adj[i].push((j, v));
        }
        for (&(i, j), &v) in map.iter() {
            adj[j].push((i, v));
        }
        for l in adj.iter_mut() {
            l.sort_unstable_by_key(|&(j, _)| j);
        }

        Ok(Self { n, diag, adj })
    }

    pub fn from_trimat(t: &TriMat<f64>) -> Result<Self, DistError> {
        if t.rows() != t.cols() {
            return Err(DistError::NotSquare(t.rows(), t.cols()))
        }
        let mut rows = Vec::with_capacity(t.nnz());
        let mut cols = Vec::with_capacity(t.nnz());
        let mut vals = Vec::with_capacity(t.nnz());
        for (&v, (i, j)) in t.triplet_iter() {
            rows.push(i);
            cols.push(j);
            vals.push(v);
        }
        Self::from_triplets(t.rows(), &rows, &cols, &vals)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn num_entries(&self) -> usize {
        self.adj.iter().map(|l| l.len()).sum::<usize>() / 2
    }
}

impl DistOracle for SpsDistMat {
    fn size(&self) -> usize {
        self.n
    }

    fn vertex_birth(&self, i: usize) -> f64 {
        self.diag[i]
    }

    fn edge(&self, i: usize, j: usize) -> Option<f64> {
        let l = &self.adj[i];
        l.binary_search_by_key(&j, |&(k, _)| k).ok().map(|pos| l[pos].1)
    }

    fn neighbors(&self, i: usize) -> Vec<(usize, f64)> {
        self.adj[i].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_triplets() {
        // entries out of order, one given on both sides
        let sm = SpsDistMat::from_triplets(
            3,
            &[2, 0, 1, 0],
            &[1, 1, 0, 2],
            &[3.0, 1.0, 1.0, 2.0]
        ).unwrap();

        assert_eq!(sm.size(), 3);
        assert_eq!(sm.num_entries(), 3);
        assert_eq!(sm.edge(0, 1), Some(1.0));
        assert_eq!(sm.edge(1, 0), Some(1.0));
        assert_eq!(sm.edge(1, 2), Some(3.0));
        assert_eq!(sm.neighbors(0), vec![(1, 1.0), (2, 2.0)]);
        assert_eq!(sm.neighbors(1), vec![(0, 1.0), (2, 3.0)]);
    }

    #[test]
    fn missing_edge() {
        let sm = SpsDistMat::from_triplets(3, &[0], &[1], &[1.0]).unwrap();

        assert_eq!(sm.edge(0, 2), None);
        assert_eq!(sm.edge(1, 2), None);
        assert_eq!(sm.neighbors(2), vec![]);
    }

    #[test]
    fn diagonal() {
        let sm = SpsDistMat::from_triplets(2, &[0, 0], &[0, 1], &[0.5, 2.0]).unwrap();

        assert!(sm.has_nonzero_diagonal());
        assert_eq!(sm.vertex_birth(0), 0.5);
        assert_eq!(sm.vertex_birth(1), 0.0);
    }

    #[test]
    fn conflict() {
        let e = SpsDistMat::from_triplets(2, &[0, 1], &[1, 0], &[1.0, 2.0]);
        assert_eq!(e.unwrap_err(), DistError::Conflict(0, 1));
    }

    #[test]
    fn out_of_range() {
        let e = SpsDistMat::from_triplets(2, &[0], &[5], &[1.0]);
        assert_eq!(e.unwrap_err(), DistError::OutOfRange(0, 5, 2));
    }

    #[test]
    fn trimat() {
        let mut t = TriMat::new((3, 3));
        t.add_triplet(0, 1, 1.0);
        t.add_triplet(1, 2, 2.0);

        let sm = SpsDistMat::from_trimat(&t).unwrap();
        assert_eq!(sm.edge(0, 1), Some(1.0));
        assert_eq!(sm.edge(2, 1), Some(2.0));
        assert_eq!(sm.edge(0, 2), None);
    }
}
