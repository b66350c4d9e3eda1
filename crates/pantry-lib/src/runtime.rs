use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::FEATURE_DIMENSION;
use crate::context::PantryContext;
use crate::dataset::{self, CategoryMapping, RecipeTable};
use crate::index::NeighborIndex;
use crate::pipeline::recommend::Recommender;

/// Everything loaded once at process start.
///
/// Owned values are wrapped in `Arc` so request handlers can share them
/// without copying; nothing here is mutated after [`Runtime::load`].
pub struct Runtime {
    pub context: PantryContext,
    pub recipes: Arc<RecipeTable>,
    pub categories: Arc<CategoryMapping>,
    pub index: Arc<NeighborIndex>,
    pub dataset_sha256: String,
    pub index_sha256: String,
}

impl Runtime {
    /// Load the dataset and similarity index named by `context`.
    ///
    /// Fails if either artifact is missing or malformed, if the index was not
    /// fitted on the 9-feature layout, or if it references rows the dataset
    /// does not have.
    pub fn load(context: PantryContext) -> anyhow::Result<Self> {
        let (recipes, categories) = dataset::load(context.dataset_path())?;
        let index = NeighborIndex::load(context.index_path())?;

        if index.dimension() != FEATURE_DIMENSION {
            anyhow::bail!(
                "Similarity index has dimension {}, expected {FEATURE_DIMENSION}",
                index.dimension()
            );
        }
        if index.len() > recipes.len() {
            anyhow::bail!(
                "Similarity index has {} rows but the dataset only has {}",
                index.len(),
                recipes.len()
            );
        }

        let dataset_sha256 = fingerprint(context.dataset_path())?;
        let index_sha256 = fingerprint(context.index_path())?;
        info!(
            dataset_sha256 = %dataset_sha256,
            index_sha256 = %index_sha256,
            "Runtime ready"
        );

        Ok(Self {
            context,
            recipes: Arc::new(recipes),
            categories: Arc::new(categories),
            index: Arc::new(index),
            dataset_sha256,
            index_sha256,
        })
    }

    /// A recommendation engine sharing this runtime's data.
    pub fn recommender(&self) -> Recommender {
        Recommender::new(
            Arc::clone(&self.recipes),
            Arc::clone(&self.categories),
            self.index.clone(),
        )
    }
}

/// Hex SHA-256 of a file's contents.
pub fn fingerprint(path: &Path) -> anyhow::Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}
