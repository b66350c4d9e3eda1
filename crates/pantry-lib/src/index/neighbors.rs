use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use super::metric::DistanceMetric;

/// On-disk form of a fitted nearest-neighbor index.
#[derive(Debug, Deserialize)]
struct IndexArtifact {
    #[serde(default)]
    metric: DistanceMetric,
    dimension: usize,
    rows: Vec<Vec<f64>>,
}

/// A single query hit: the dataset row and its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

/// Brute-force nearest-neighbor index over fixed-width feature rows.
///
/// Rows are stored flattened; row `i` corresponds to recipe row `i`.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    metric: DistanceMetric,
    dimension: usize,
    data: Vec<f64>,
}

impl NeighborIndex {
    /// Build an index from fitted rows, validating their shape.
    pub fn new(
        metric: DistanceMetric,
        dimension: usize,
        rows: Vec<Vec<f64>>,
    ) -> anyhow::Result<Self> {
        metric.validate()?;
        if dimension == 0 {
            anyhow::bail!("Index dimension must be positive");
        }

        let mut data = Vec::with_capacity(rows.len() * dimension);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                anyhow::bail!(
                    "Index row {i} has {} values, expected {dimension}",
                    row.len()
                );
            }
            if let Some(value) = row.iter().find(|v| !v.is_finite()) {
                anyhow::bail!("Index row {i} contains non-finite value {value}");
            }
            data.extend(row);
        }

        Ok(Self {
            metric,
            dimension,
            data,
        })
    }

    /// Load an index artifact from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Similarity index not found at {}", path.display()))?;
        let index = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load similarity index {}", path.display()))?;

        info!(
            path = %path.display(),
            metric = %index.metric.name(),
            dimension = index.dimension,
            rows = index.len(),
            "Similarity index loaded"
        );
        Ok(index)
    }

    /// Parse an index artifact from any JSON source.
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let artifact: IndexArtifact =
            serde_json::from_reader(reader).context("Malformed index artifact")?;
        Self::new(artifact.metric, artifact.dimension, artifact.rows)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the `k` rows closest to `query`, nearest first.
    ///
    /// `k` is clamped to the number of indexed rows. Equal distances are
    /// ordered by row position, so results are deterministic.
    pub fn kneighbors(&self, query: &[f64], k: usize) -> anyhow::Result<Vec<Neighbor>> {
        if query.len() != self.dimension {
            anyhow::bail!(
                "Query has {} features but the index expects {}",
                query.len(),
                self.dimension
            );
        }
        if let Some(value) = query.iter().find(|v| !v.is_finite()) {
            anyhow::bail!("Query contains non-finite value {value}");
        }

        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(row, values)| Neighbor {
                row,
                distance: self.metric.distance(query, values),
            })
            .collect();

        // Partial selection keeps large tables cheap; only the head is sorted.
        hits.select_nth_unstable_by(k - 1, by_distance_then_row);
        hits.truncate(k);
        hits.sort_by(by_distance_then_row);

        debug!(
            k = k,
            nearest = hits.first().map(|n| n.distance),
            farthest = hits.last().map(|n| n.distance),
            "Nearest neighbors selected"
        );
        Ok(hits)
    }
}

fn by_distance_then_row(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.row.cmp(&b.row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_index() -> NeighborIndex {
        // Points on a line at x = 0, 10, 20, 30, 40.
        let rows = (0..5_i32).map(|i| vec![f64::from(i) * 10.0, 0.0]).collect();
        NeighborIndex::new(DistanceMetric::Euclidean, 2, rows).unwrap()
    }

    fn rows_of(hits: &[Neighbor]) -> Vec<usize> {
        hits.iter().map(|n| n.row).collect()
    }

    #[test]
    fn returns_nearest_first() {
        let index = line_index();
        let hits = index.kneighbors(&[21.0, 0.0], 3).unwrap();
        assert_eq!(rows_of(&hits), vec![2, 3, 1]);
        assert!((hits[0].distance - 1.0).abs() < 1e-12);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn k_is_clamped_to_row_count() {
        let index = line_index();
        let hits = index.kneighbors(&[0.0, 0.0], 50).unwrap();
        assert_eq!(rows_of(&hits), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_k_returns_nothing() {
        let index = line_index();
        assert!(index.kneighbors(&[0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn ties_break_by_row_position() {
        let rows = vec![vec![1.0], vec![-1.0], vec![1.0], vec![5.0]];
        let index = NeighborIndex::new(DistanceMetric::Euclidean, 1, rows).unwrap();
        let hits = index.kneighbors(&[0.0], 3).unwrap();
        assert_eq!(rows_of(&hits), vec![0, 1, 2]);
    }

    #[test]
    fn metric_changes_ranking() {
        // From the origin: row 0 is (3, 3), row 1 is (0, 4.5).
        // Euclidean: 4.24 vs 4.5. Manhattan: 6 vs 4.5.
        let rows = vec![vec![3.0, 3.0], vec![0.0, 4.5]];
        let euclid = NeighborIndex::new(DistanceMetric::Euclidean, 2, rows.clone()).unwrap();
        let manhattan = NeighborIndex::new(DistanceMetric::Manhattan, 2, rows).unwrap();
        assert_eq!(rows_of(&euclid.kneighbors(&[0.0, 0.0], 1).unwrap()), vec![0]);
        assert_eq!(rows_of(&manhattan.kneighbors(&[0.0, 0.0], 1).unwrap()), vec![1]);
    }

    #[test]
    fn query_dimension_mismatch_errors() {
        let index = line_index();
        let err = index.kneighbors(&[1.0, 2.0, 3.0], 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Query has 3 features but the index expects 2"
        );
    }

    #[test]
    fn non_finite_query_errors() {
        let index = line_index();
        assert!(index.kneighbors(&[f64::NAN, 0.0], 1).is_err());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = NeighborIndex::new(DistanceMetric::Euclidean, 2, vec![vec![1.0, 2.0], vec![3.0]])
            .unwrap_err();
        assert_eq!(err.to_string(), "Index row 1 has 1 values, expected 2");
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(NeighborIndex::new(DistanceMetric::Euclidean, 0, Vec::new()).is_err());
    }

    #[test]
    fn empty_index_yields_no_neighbors() {
        let index = NeighborIndex::new(DistanceMetric::Euclidean, 2, Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.kneighbors(&[0.0, 0.0], 5).unwrap().is_empty());
    }

    #[test]
    fn from_reader_parses_artifact() {
        let json = r#"{"metric": "manhattan", "dimension": 2, "rows": [[0, 0], [1, 1]]}"#;
        let index = NeighborIndex::from_reader(json.as_bytes()).unwrap();
        assert_eq!(index.metric(), DistanceMetric::Manhattan);
        assert_eq!(index.dimension(), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn from_reader_defaults_to_euclidean() {
        let json = r#"{"dimension": 1, "rows": [[0.5]]}"#;
        let index = NeighborIndex::from_reader(json.as_bytes()).unwrap();
        assert_eq!(index.metric(), DistanceMetric::Euclidean);
    }

    #[test]
    fn from_reader_rejects_garbage() {
        let err = NeighborIndex::from_reader("not json".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Malformed index artifact");
    }

    #[test]
    fn load_missing_file_errors() {
        let err = NeighborIndex::load(Path::new("/nonexistent/index.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Similarity index not found at /nonexistent/index.json"
        );
    }
}
