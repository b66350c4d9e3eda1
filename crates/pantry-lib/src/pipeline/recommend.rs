use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::{DEFAULT_TOP_K, INTERNAL_ERROR_MESSAGE, NO_MATCHES_MESSAGE};
use crate::dataset::{CategoryMapping, Recipe, RecipeTable};
use crate::features::prepare_features;
use crate::index::SimilarityIndex;
use crate::pipeline::request::{Preferences, RecommendRequest, ValidationError};

/// Display projection of a recipe row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDisplay {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub image: String,
    pub total_time: String,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sodium: f64,
    pub calories: f64,
}

impl From<&Recipe> for RecipeDisplay {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            category: recipe.category.clone(),
            image: recipe.image.clone(),
            total_time: recipe.total_time.clone().unwrap_or_default(),
            protein: recipe.protein.unwrap_or(0.0),
            fat: recipe.fat.unwrap_or(0.0),
            fiber: recipe.fiber.unwrap_or(0.0),
            sodium: recipe.sodium.unwrap_or(0.0),
            calories: recipe.calories.unwrap_or(0.0),
        }
    }
}

/// Outcome of one recommendation request.
#[derive(Debug)]
pub enum Recommendation {
    /// At least one candidate survived filtering, nearest first.
    Found(Vec<RecipeDisplay>),
    /// Every candidate was filtered out (or the index is empty).
    NoMatches,
    /// The request was rejected before any computation.
    Invalid(ValidationError),
    /// The pipeline failed; `details` carries the error chain.
    Failed { details: String },
}

/// Wire shape of a [`Recommendation`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Found {
        recommended_recipes: Vec<RecipeDisplay>,
        total_recommendations: usize,
    },
    NoMatches {
        message: &'static str,
        recommended_recipes: Vec<RecipeDisplay>,
    },
    Invalid {
        error: String,
    },
    Failed {
        error: &'static str,
        details: String,
    },
}

impl Recommendation {
    /// HTTP status code conventionally paired with this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Found(_) | Self::NoMatches => 200,
            Self::Invalid(_) => 400,
            Self::Failed { .. } => 500,
        }
    }

    /// Whether the request completed (with or without matches).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Found(_) | Self::NoMatches)
    }

    pub fn into_response(self) -> RecommendResponse {
        match self {
            Self::Found(recipes) => RecommendResponse::Found {
                total_recommendations: recipes.len(),
                recommended_recipes: recipes,
            },
            Self::NoMatches => RecommendResponse::NoMatches {
                message: NO_MATCHES_MESSAGE,
                recommended_recipes: Vec::new(),
            },
            Self::Invalid(err) => RecommendResponse::Invalid {
                error: err.to_string(),
            },
            Self::Failed { details } => RecommendResponse::Failed {
                error: INTERNAL_ERROR_MESSAGE,
                details,
            },
        }
    }
}

/// The recommendation engine: immutable dataset, category mapping and
/// similarity index shared across requests.
#[derive(Clone)]
pub struct Recommender {
    recipes: Arc<RecipeTable>,
    categories: Arc<CategoryMapping>,
    index: Arc<dyn SimilarityIndex>,
    top_k: usize,
}

impl Recommender {
    pub fn new(
        recipes: Arc<RecipeTable>,
        categories: Arc<CategoryMapping>,
        index: Arc<dyn SimilarityIndex>,
    ) -> Self {
        Self {
            recipes,
            categories,
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the number of neighbors requested per query.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn recipes(&self) -> &RecipeTable {
        &self.recipes
    }

    pub fn categories(&self) -> &CategoryMapping {
        &self.categories
    }

    /// Run the full pipeline: validate, vectorize, query, filter, format.
    ///
    /// Never returns an error; every failure is folded into the outcome.
    pub fn recommend(&self, request: &RecommendRequest) -> Recommendation {
        let preferences = match request.validate() {
            Ok(preferences) => preferences,
            Err(err) => {
                debug!(error = %err, "Request rejected");
                return Recommendation::Invalid(err);
            }
        };

        match self.recommend_validated(&preferences) {
            Ok(recipes) if recipes.is_empty() => Recommendation::NoMatches,
            Ok(recipes) => Recommendation::Found(recipes),
            Err(err) => {
                let details = format!("{err:#}");
                error!(details = %details, "Error processing recommendation request");
                Recommendation::Failed { details }
            }
        }
    }

    /// Parse a raw request body and run the pipeline on it.
    pub fn recommend_json(&self, body: &[u8]) -> Recommendation {
        match RecommendRequest::from_json(body) {
            Ok(request) => self.recommend(&request),
            Err(err) => {
                debug!(error = %err, "Request body rejected");
                Recommendation::Invalid(err)
            }
        }
    }

    /// Pipeline stages after validation.
    pub fn recommend_validated(
        &self,
        preferences: &Preferences,
    ) -> anyhow::Result<Vec<RecipeDisplay>> {
        debug!(
            max_cook_time = %preferences.max_cook_time,
            max_calories = %preferences.max_calories,
            recipe_category = ?preferences.category(),
            restrictions = %preferences.ingredient_restrictions,
            "Received preferences"
        );

        let features = prepare_features(preferences, &self.categories)?;
        debug!(features = %features, "Prepared features");
        let restrictions = preferences.restrictions()?;

        let candidates = self.query(features.as_slice())?;

        let survivors = filter_restricted(candidates, &restrictions);
        debug!(survivors = survivors.len(), "Applied ingredient restrictions");

        Ok(survivors.into_iter().map(RecipeDisplay::from).collect())
    }

    /// Nearest recipe rows to `features`, distance-ascending.
    pub fn query(&self, features: &[f64]) -> anyhow::Result<Vec<&Recipe>> {
        let neighbors = self
            .index
            .kneighbors(features, self.top_k)
            .context("Similarity query failed")?;

        debug!(
            distances = ?neighbors.iter().map(|n| n.distance).collect::<Vec<_>>(),
            rows = ?neighbors.iter().map(|n| n.row).collect::<Vec<_>>(),
            "Similarity query"
        );

        neighbors
            .iter()
            .map(|n| {
                self.recipes.get(n.row).with_context(|| {
                    format!(
                        "Index row {} is outside the recipe table ({} rows)",
                        n.row,
                        self.recipes.len()
                    )
                })
            })
            .collect()
    }
}

/// Drop every candidate whose ingredient text contains any restriction
/// (case-insensitive). Survivors keep their relative order.
pub fn filter_restricted<'a>(
    candidates: Vec<&'a Recipe>,
    restrictions: &[String],
) -> Vec<&'a Recipe> {
    if restrictions.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|recipe| {
            !restrictions
                .iter()
                .any(|restriction| recipe.mentions_ingredient(restriction))
        })
        .collect()
}
