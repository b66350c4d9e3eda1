/// Number of nearest neighbors requested from the similarity index per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Width of the feature vector the similarity index was trained on.
///
/// Layout: `[max_cook_time, max_calories, saturated_fat, cholesterol, sodium,
/// carbohydrate, fiber, protein, category_code]`.
pub const FEATURE_DIMENSION: usize = 9;

/// Category code used when a request names no category, or one that never
/// appears in the dataset.
///
/// This is also the code of the first category seen in the dataset, so an
/// unknown category silently aliases to it.
pub const DEFAULT_CATEGORY_CODE: u32 = 0;

/// File name of the recipe dataset inside the data directory.
pub const DATASET_FILE_NAME: &str = "recipes.csv";

/// File name of the serialized nearest-neighbor index inside the data directory.
pub const INDEX_FILE_NAME: &str = "nearest_neighbors_index.json";

/// Environment variable overriding the data directory (default `~/.pantry`).
pub const DATA_DIR_ENV: &str = "PANTRY_DATA_DIR";

/// Environment variable overriding the dataset path.
pub const DATASET_ENV: &str = "PANTRY_DATASET";

/// Environment variable overriding the index artifact path.
pub const INDEX_ENV: &str = "PANTRY_INDEX";

/// Default bind address for `pantry serve`.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Message returned alongside an empty recommendation list.
pub const NO_MATCHES_MESSAGE: &str = "No recipes found matching your criteria.";

/// Generic error message returned when the pipeline fails internally.
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request.";
