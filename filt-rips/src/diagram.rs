use std::fmt::Display;
use itertools::Itertools;

use filt::util::format::{fil_value, table};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistenceInterval {
    pub birth: f64,
    pub death: f64,
    pub dim: usize
}

impl PersistenceInterval {
    pub fn new(birth: f64, death: f64, dim: usize) -> Self {
        Self { birth, death, dim }
    }

    pub fn essential(birth: f64, dim: usize) -> Self {
        Self { birth, death: f64::INFINITY, dim }
    }

    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    pub fn contains(&self, t: f64) -> bool {
        self.birth <= t && t < self.death
    }
}

impl Display for PersistenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", fil_value(self.birth), fil_value(self.death))
    }
}

/// Persistence intervals grouped by homology dimension 0..=max_dim.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistenceDiagram {
    dgms: Vec<Vec<PersistenceInterval>>
}

impl PersistenceDiagram {
    pub fn new(mut dgms: Vec<Vec<PersistenceInterval>>) -> Self {
        for d in dgms.iter_mut() {
            d.sort_unstable_by(|a, b|
                a.birth.total_cmp(&b.birth).then(a.death.total_cmp(&b.death))
            );
        }
        Self { dgms }
    }

    pub fn max_dim(&self) -> usize {
        self.dgms.len().saturating_sub(1)
    }

    pub fn intervals(&self, dim: usize) -> &[PersistenceInterval] {
        self.dgms.get(dim).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistenceInterval> {
        self.dgms.iter().flatten()
    }

    pub fn finite(&self, dim: usize) -> impl Iterator<Item = &PersistenceInterval> {
        self.intervals(dim).iter().filter(|i| !i.is_essential())
    }

    pub fn essential(&self, dim: usize) -> impl Iterator<Item = &PersistenceInterval> {
        self.intervals(dim).iter().filter(|i| i.is_essential())
    }

    /// Betti number at filtration value t.
    pub fn betti_at(&self, dim: usize, t: f64) -> usize {
        self.intervals(dim).iter().filter(|i| i.contains(t)).count()
    }

    pub fn total_persistence(&self, dim: usize) -> f64 {
        self.finite(dim).map(|i| i.persistence()).sum()
    }

    /// Shannon entropy of the normalized finite lifetimes.
    pub fn persistence_entropy(&self, dim: usize) -> f64 {
        let ps = self.finite(dim).map(|i| i.persistence()).filter(|&p| p > 0.0).collect_vec();
        let total: f64 = ps.iter().sum();
        if total <= 0.0 {
            return 0.0
        }
        -ps.iter().map(|p| {
            let q = p / total;
            q * q.ln()
        }).sum::<f64>()
    }
}

impl Display for PersistenceDiagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = table("H", 0..self.dgms.len(), [""].iter(), |&d, _| {
            let ints = self.intervals(d);
            if ints.is_empty() {
                ".".to_string()
            } else {
                ints.iter().map(|i| i.to_string()).join(" ")
            }
        });
        write!(f, "{str}")
    }
}
