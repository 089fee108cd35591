/// Union-find over vertices 0..n, tracking for each component the
/// (birth, vertex) of its oldest member. Merging follows the elder rule:
/// the younger component dies, and its birth is handed back to the caller.
pub struct UnionFind {
    p: Vec<usize>,
    rank: Vec<u8>,
    birth: Vec<(f64, usize)> // valid at roots
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self::with_births(vec![0.0; n])
    }

    pub fn with_births(births: Vec<f64>) -> Self {
        let n = births.len();
        Self {
            p: (0..n).collect(),
            rank: vec![0; n],
            birth: births.into_iter().enumerate().map(|(i, b)| (b, i)).collect()
        }
    }

    pub fn size(&self) -> usize {
        self.p.len()
    }

    pub fn root(&mut self, i: usize) -> usize {
        if self.p[i] != i {
            let r = self.root(self.p[i]);
            self.p[i] = r;
        }
        self.p[i]
    }

    pub fn is_same(&mut self, i: usize, j: usize) -> bool {
        self.root(i) == self.root(j)
    }

    pub fn birth(&mut self, i: usize) -> f64 {
        let r = self.root(i);
        self.birth[r].0
    }

    /// Merges the components of i and j. Returns the younger component's
    /// (birth, vertex), or None if i and j were already connected.
    pub fn union(&mut self, i: usize, j: usize) -> Option<(f64, usize)> {
        let ri = self.root(i);
        let rj = self.root(j);

        if ri == rj {
            return None
        }

        let (elder, younger) = if self.birth[ri] <= self.birth[rj] {
            (self.birth[ri], self.birth[rj])
        } else {
            (self.birth[rj], self.birth[ri])
        };

        use std::cmp::Ordering::*;
        let r = match u8::cmp(&self.rank[ri], &self.rank[rj]) {
            Less    => { self.p[ri] = rj; rj },
            Greater => { self.p[rj] = ri; ri },
            Equal   => {
                self.p[rj] = ri;
                self.rank[ri] += 1;
                ri
            }
        };
        self.birth[r] = elder;

        Some(younger)
    }

    pub fn roots(&mut self) -> Vec<usize> {
        (0..self.size()).filter(|&i| self.root(i) == i).collect()
    }
}
