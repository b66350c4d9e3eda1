pub mod category;
pub mod recipe;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

pub use category::CategoryMapping;
pub use recipe::Recipe;

/// Columns that must be present in the dataset header.
const REQUIRED_COLUMNS: &[&str] = &["Name", "RecipeCategory"];

/// Read-only, in-memory recipe table. Row `i` is the `i`-th data line of the
/// dataset and the `i`-th row of the similarity index.
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
}

impl RecipeTable {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Recipe at `row`, or `None` if out of range.
    pub fn get(&self, row: usize) -> Option<&Recipe> {
        self.recipes.get(row)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Build the category mapping from this table's `RecipeCategory` column.
    pub fn category_mapping(&self) -> CategoryMapping {
        CategoryMapping::from_labels(self.recipes.iter().map(|r| r.category.as_str()))
    }
}

/// Load the recipe dataset from a CSV file and derive its category mapping.
pub fn load(path: &Path) -> anyhow::Result<(RecipeTable, CategoryMapping)> {
    let file = File::open(path)
        .with_context(|| format!("Recipe dataset not found at {}", path.display()))?;
    let loaded = load_from_reader(file)
        .with_context(|| format!("Failed to load recipe dataset {}", path.display()))?;

    info!(
        path = %path.display(),
        recipes = loaded.0.len(),
        categories = loaded.1.len(),
        "Recipe dataset loaded"
    );
    Ok(loaded)
}

/// Load the recipe dataset from any CSV source.
pub fn load_from_reader<R: Read>(reader: R) -> anyhow::Result<(RecipeTable, CategoryMapping)> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("Failed to read dataset header")?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            anyhow::bail!("Dataset is missing required column `{column}`");
        }
    }

    let mut recipes = Vec::new();
    for (i, row) in reader.deserialize::<Recipe>().enumerate() {
        let recipe = row.with_context(|| format!("Malformed recipe at data row {}", i + 1))?;
        recipes.push(recipe);
    }

    let table = RecipeTable::new(recipes);
    let categories = table.category_mapping();
    debug!(
        recipes = table.len(),
        categories = categories.len(),
        "Parsed recipe rows"
    );
    Ok((table, categories))
}
