use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{DATA_DIR_ENV, DATASET_ENV, DATASET_FILE_NAME, INDEX_ENV, INDEX_FILE_NAME};

/// Resolved locations of the startup artifacts.
///
/// Layering: built-in defaults under the data directory, then environment
/// variables, then explicit overrides (CLI flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryContext {
    data_dir: PathBuf,
    dataset_path: PathBuf,
    index_path: PathBuf,
}

impl PantryContext {
    /// Context rooted at `data_dir` with the default file names.
    pub fn new(data_dir: PathBuf) -> Self {
        let dataset_path = data_dir.join(DATASET_FILE_NAME);
        let index_path = data_dir.join(INDEX_FILE_NAME);
        Self {
            data_dir,
            dataset_path,
            index_path,
        }
    }

    /// Build a context from the process environment.
    ///
    /// Falls back to `~/.pantry` when `PANTRY_DATA_DIR` is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a context from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("Cannot determine home directory; set PANTRY_DATA_DIR")?
                .join(".pantry"),
        };

        let mut context = Self::new(data_dir);
        if let Some(path) = lookup(DATASET_ENV).filter(|v| !v.is_empty()) {
            context.dataset_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(INDEX_ENV).filter(|v| !v.is_empty()) {
            context.index_path = PathBuf::from(path);
        }
        Ok(context)
    }

    /// Override the dataset path.
    #[must_use]
    pub fn with_dataset(mut self, path: PathBuf) -> Self {
        self.dataset_path = path;
        self
    }

    /// Override the index artifact path.
    #[must_use]
    pub fn with_index(mut self, path: PathBuf) -> Self {
        self.index_path = path;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_live_under_data_dir() {
        let ctx = PantryContext::new(PathBuf::from("/srv/pantry"));
        assert_eq!(ctx.data_dir(), Path::new("/srv/pantry"));
        assert_eq!(ctx.dataset_path(), Path::new("/srv/pantry/recipes.csv"));
        assert_eq!(
            ctx.index_path(),
            Path::new("/srv/pantry/nearest_neighbors_index.json")
        );
    }

    #[test]
    fn env_data_dir_moves_both_artifacts() {
        let ctx = PantryContext::from_lookup(lookup_from(&[("PANTRY_DATA_DIR", "/data")])).unwrap();
        assert_eq!(ctx.dataset_path(), Path::new("/data/recipes.csv"));
        assert_eq!(
            ctx.index_path(),
            Path::new("/data/nearest_neighbors_index.json")
        );
    }

    #[test]
    fn env_file_overrides_beat_data_dir() {
        let ctx = PantryContext::from_lookup(lookup_from(&[
            ("PANTRY_DATA_DIR", "/data"),
            ("PANTRY_DATASET", "/elsewhere/food.csv"),
            ("PANTRY_INDEX", "/elsewhere/knn.json"),
        ]))
        .unwrap();
        assert_eq!(ctx.dataset_path(), Path::new("/elsewhere/food.csv"));
        assert_eq!(ctx.index_path(), Path::new("/elsewhere/knn.json"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let ctx = PantryContext::from_lookup(lookup_from(&[
            ("PANTRY_DATA_DIR", "/data"),
            ("PANTRY_DATASET", ""),
        ]))
        .unwrap();
        assert_eq!(ctx.dataset_path(), Path::new("/data/recipes.csv"));
    }

    #[test]
    fn explicit_overrides_win() {
        let ctx = PantryContext::new(PathBuf::from("/data"))
            .with_dataset(PathBuf::from("a.csv"))
            .with_index(PathBuf::from("b.json"));
        assert_eq!(ctx.dataset_path(), Path::new("a.csv"));
        assert_eq!(ctx.index_path(), Path::new("b.json"));
    }
}
