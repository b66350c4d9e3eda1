pub mod metric;
pub mod neighbors;

pub use metric::DistanceMetric;
pub use neighbors::{Neighbor, NeighborIndex};

/// Nearest-neighbor lookup over the recipe feature space.
///
/// Implementations are immutable after construction and shared across
/// request threads.
pub trait SimilarityIndex: Send + Sync {
    /// The `k` nearest rows to `query`, nearest first.
    fn kneighbors(&self, query: &[f64], k: usize) -> anyhow::Result<Vec<Neighbor>>;

    /// Number of indexed rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SimilarityIndex for NeighborIndex {
    fn kneighbors(&self, query: &[f64], k: usize) -> anyhow::Result<Vec<Neighbor>> {
        NeighborIndex::kneighbors(self, query, k)
    }

    fn len(&self) -> usize {
        NeighborIndex::len(self)
    }
}
