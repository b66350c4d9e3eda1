use serde::Deserialize;

/// One row of the recipe dataset.
///
/// Column names follow the Food.com export. Columns not listed here are
/// ignored; text columns that are missing read as empty strings and numeric
/// cells that are missing or empty read as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recipe {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Informally delimited ingredient list, e.g. `c("flour", "sugar")`.
    #[serde(rename = "RecipeIngredientParts", default)]
    pub ingredients: String,
    #[serde(rename = "RecipeInstructions", default)]
    pub instructions: String,
    #[serde(rename = "RecipeCategory")]
    pub category: String,
    #[serde(rename = "Images", default)]
    pub image: String,
    #[serde(rename = "TotalTime", default)]
    pub total_time: Option<String>,
    #[serde(rename = "ProteinContent", default)]
    pub protein: Option<f64>,
    #[serde(rename = "FatContent", default)]
    pub fat: Option<f64>,
    #[serde(rename = "FiberContent", default)]
    pub fiber: Option<f64>,
    #[serde(rename = "SodiumContent", default)]
    pub sodium: Option<f64>,
    #[serde(rename = "Calories", default)]
    pub calories: Option<f64>,
}

impl Recipe {
    /// Whether the ingredient text contains `needle`, ignoring case.
    ///
    /// A recipe without ingredient text never matches.
    pub fn mentions_ingredient(&self, needle: &str) -> bool {
        if self.ingredients.is_empty() {
            return false;
        }
        self.ingredients
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
