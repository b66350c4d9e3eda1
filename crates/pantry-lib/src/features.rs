use std::fmt;

use crate::config::FEATURE_DIMENSION;
use crate::dataset::CategoryMapping;
use crate::pipeline::request::Preferences;

/// Query vector in the similarity index's training layout.
///
/// Only the two time/calorie bounds and the category code carry signal; the
/// six nutrition slots in between are always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_DIMENSION]);

impl FeatureVector {
    /// Column names in vector order, as used when the index was trained.
    pub const COLUMNS: [&'static str; FEATURE_DIMENSION] = [
        "max_cook_time",
        "max_calories",
        "SaturatedFatContent",
        "CholesterolContent",
        "SodiumContent",
        "CarbohydrateContent",
        "FiberContent",
        "ProteinContent",
        "RecipeCategory",
    ];

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn max_cook_time(&self) -> f64 {
        self.0[0]
    }

    pub fn max_calories(&self) -> f64 {
        self.0[1]
    }

    pub fn category_code(&self) -> f64 {
        self.0[FEATURE_DIMENSION - 1]
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// Turn validated preferences into the index's query vector.
///
/// Fails when a bound is not a number or a numeric string.
pub fn prepare_features(
    preferences: &Preferences,
    categories: &CategoryMapping,
) -> anyhow::Result<FeatureVector> {
    let category_code = categories.resolve(preferences.category());

    Ok(FeatureVector([
        preferences.max_cook_time()?,
        preferences.max_calories()?,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        f64::from(category_code),
    ]))
}
