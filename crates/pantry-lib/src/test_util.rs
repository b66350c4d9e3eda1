use std::sync::Arc;

use pantry_test_util::dataset::{dataset_csv, sample_recipes};
use pantry_test_util::index::sample_index_rows;

use crate::config::FEATURE_DIMENSION;
use crate::dataset::{RecipeTable, load_from_reader};
use crate::index::{DistanceMetric, NeighborIndex};
use crate::pipeline::recommend::Recommender;

/// The fixture recipes parsed through the real CSV loader.
pub fn sample_table() -> RecipeTable {
    let csv = dataset_csv(&sample_recipes());
    load_from_reader(csv.as_bytes()).unwrap().0
}

/// A Euclidean index aligned with [`sample_table`].
pub fn sample_index() -> NeighborIndex {
    NeighborIndex::new(
        DistanceMetric::Euclidean,
        FEATURE_DIMENSION,
        sample_index_rows(),
    )
    .unwrap()
}

/// A [`Recommender`] over the fixture data with the default top-k.
pub fn sample_recommender() -> Recommender {
    let table = sample_table();
    let categories = table.category_mapping();
    Recommender::new(
        Arc::new(table),
        Arc::new(categories),
        Arc::new(sample_index()),
    )
}
