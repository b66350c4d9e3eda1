use anyhow::Context;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Why a request was rejected before any computation ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request format. Missing preferences.")]
    MissingPreferences,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid request format. {0}")]
    Malformed(String),
}

/// Top-level request body: `{"preferences": {...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub preferences: Option<PreferencesPayload>,
}

/// Preferences as received.
///
/// Values are kept as raw JSON so that presence is all validation checks:
/// a key holding `null` is present. Types are only interpreted when the
/// query is built, so web-form clients may send numbers as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesPayload {
    #[serde(default, deserialize_with = "present")]
    pub max_cook_time: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub max_calories: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ingredient_restrictions: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub recipe_category: Option<Value>,
}

/// Any value, `null` included, marks the key as present.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Preferences with every required key present.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub max_cook_time: Value,
    pub max_calories: Value,
    pub ingredient_restrictions: Value,
    pub recipe_category: Option<Value>,
}

impl Preferences {
    /// Cook-time bound as a number. Numeric strings such as `"30"` are accepted.
    pub fn max_cook_time(&self) -> anyhow::Result<f64> {
        numeric("max_cook_time", &self.max_cook_time)
    }

    /// Calorie bound as a number. Numeric strings are accepted.
    pub fn max_calories(&self) -> anyhow::Result<f64> {
        numeric("max_calories", &self.max_calories)
    }

    /// Requested category label. A missing, null or non-string value names
    /// no category.
    pub fn category(&self) -> Option<&str> {
        self.recipe_category.as_ref().and_then(Value::as_str)
    }

    /// Restriction substrings. `null` means no restrictions.
    pub fn restrictions(&self) -> anyhow::Result<Vec<String>> {
        match &self.ingredient_restrictions {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).with_context(|| {
                        format!("ingredient_restrictions must contain strings, got {item}")
                    })
                })
                .collect(),
            other => anyhow::bail!("ingredient_restrictions must be a list, got {other}"),
        }
    }
}

fn numeric(field: &str, value: &Value) -> anyhow::Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("{field} is out of range: {n}")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .with_context(|| format!("{field} must be a number, got {value}")),
        other => anyhow::bail!("{field} must be a number, got {other}"),
    }
}

impl RecommendRequest {
    pub fn new(preferences: PreferencesPayload) -> Self {
        Self {
            preferences: Some(preferences),
        }
    }

    /// Parse a raw request body.
    ///
    /// An empty body, a non-object body, or a missing/null `preferences` key
    /// all mean "missing preferences". A `preferences` value that is not an
    /// object carries none of the required fields.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::MissingPreferences);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::Malformed(format!("Body is not valid JSON: {e}")))?;

        let preferences = match value.get("preferences") {
            None | Some(Value::Null) => return Err(ValidationError::MissingPreferences),
            Some(prefs @ Value::Object(_)) => PreferencesPayload::deserialize(prefs)
                .map_err(|e| ValidationError::Malformed(e.to_string()))?,
            Some(_) => PreferencesPayload::default(),
        };

        Ok(Self::new(preferences))
    }

    /// Check that the required keys are present, in the order
    /// `max_cook_time`, `max_calories`, `ingredient_restrictions`.
    pub fn validate(&self) -> Result<Preferences, ValidationError> {
        let payload = self
            .preferences
            .as_ref()
            .ok_or(ValidationError::MissingPreferences)?;

        let max_cook_time = payload
            .max_cook_time
            .clone()
            .ok_or(ValidationError::MissingField("max_cook_time"))?;
        let max_calories = payload
            .max_calories
            .clone()
            .ok_or(ValidationError::MissingField("max_calories"))?;
        let ingredient_restrictions = payload
            .ingredient_restrictions
            .clone()
            .ok_or(ValidationError::MissingField("ingredient_restrictions"))?;

        Ok(Preferences {
            max_cook_time,
            max_calories,
            ingredient_restrictions,
            recipe_category: payload.recipe_category.clone(),
        })
    }
}
