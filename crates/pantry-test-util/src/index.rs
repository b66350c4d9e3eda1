use std::path::{Path, PathBuf};

/// Feature rows aligned with [`crate::dataset::sample_recipes`].
///
/// Layout: `[cook_time, calories, 0, 0, 0, 0, 0, 0, category_code]`.
pub fn sample_index_rows() -> Vec<Vec<f64>> {
    [
        (25.0, 450.0, 0.0),
        (30.0, 380.0, 1.0),
        (35.0, 210.0, 1.0),
        (40.0, 520.0, 0.0),
        (60.0, 330.0, 1.0),
        (70.0, 300.0, 2.0),
        (20.0, 410.0, 3.0),
        (10.0, 150.0, 4.0),
    ]
    .into_iter()
    .map(|(time, calories, category)| {
        vec![time, calories, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, category]
    })
    .collect()
}

/// Serialize an index artifact with the given metric and rows.
pub fn index_json(metric: &serde_json::Value, rows: &[Vec<f64>]) -> String {
    let dimension = rows.first().map_or(9, Vec::len);
    serde_json::json!({
        "metric": metric,
        "dimension": dimension,
        "rows": rows,
    })
    .to_string()
}

/// Write a Euclidean index artifact to `dir` and return its path.
pub fn write_index(dir: &Path, rows: &[Vec<f64>]) -> PathBuf {
    write_index_json(dir, &index_json(&serde_json::json!("euclidean"), rows))
}

/// Write raw artifact JSON to `nearest_neighbors_index.json` in `dir`.
pub fn write_index_json(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("nearest_neighbors_index.json");
    std::fs::write(&path, json).unwrap();
    path
}
