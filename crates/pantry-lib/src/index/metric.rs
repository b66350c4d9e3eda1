use serde::Deserialize;

/// Distance metric the index was fitted with.
///
/// Serialized as `"euclidean"`, `"manhattan"` or `{"minkowski": p}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `sqrt(sum((a_i - b_i)^2))`
    #[default]
    Euclidean,
    /// `sum(|a_i - b_i|)`
    Manhattan,
    /// `sum(|a_i - b_i|^p)^(1/p)`, `p >= 1`
    Minkowski(f64),
}

impl DistanceMetric {
    /// Check metric parameters.
    pub fn validate(self) -> anyhow::Result<()> {
        if let Self::Minkowski(p) = self
            && !(p.is_finite() && p >= 1.0)
        {
            anyhow::bail!("Minkowski metric requires a finite p >= 1, got {p}");
        }
        Ok(())
    }

    /// Distance between two equal-length vectors.
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let diffs = a.iter().zip(b).map(|(x, y)| (x - y).abs());
        match self {
            Self::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Self::Manhattan => diffs.sum(),
            Self::Minkowski(p) => diffs.map(|d| d.powf(p)).sum::<f64>().powf(p.recip()),
        }
    }

    pub fn name(self) -> String {
        match self {
            Self::Euclidean => "euclidean".to_string(),
            Self::Manhattan => "manhattan".to_string(),
            Self::Minkowski(p) => format!("minkowski(p={p})"),
        }
    }
}
