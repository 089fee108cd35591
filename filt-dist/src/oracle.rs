/// Read access to a (possibly incomplete) symmetric distance structure.
/// A `None` edge never enters the filtration, so the complex built on top
/// is the clique complex of the present edges. Diagonal entries are vertex
/// birth times.
pub trait DistOracle: Sync {
    fn size(&self) -> usize;
    fn vertex_birth(&self, i: usize) -> f64;

    /// The length of the edge {i, j}, or None if absent. i != j.
    fn edge(&self, i: usize, j: usize) -> Option<f64>;

    /// Present edges at i, as (j, length) sorted by j.
    fn neighbors(&self, i: usize) -> Vec<(usize, f64)>;

    fn has_nonzero_diagonal(&self) -> bool {
        (0..self.size()).any(|i| self.vertex_birth(i) != 0.0)
    }
}
