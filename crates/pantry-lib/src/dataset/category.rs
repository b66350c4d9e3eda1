use std::collections::HashMap;

use crate::config::DEFAULT_CATEGORY_CODE;

/// Category label to integer code, in first-seen order.
///
/// Built once from the dataset's `RecipeCategory` column. An empty cell still
/// occupies a code so that later codes line up with the enumeration the
/// similarity index was trained on, but no lookup ever resolves to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    /// Entry `i` has code `i`. `None` marks the missing-category slot.
    labels: Vec<Option<String>>,
    codes: HashMap<String, u32>,
}

impl CategoryMapping {
    /// Enumerate distinct labels in the order they first occur.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping = Self::default();
        let mut saw_missing = false;

        for label in labels {
            if label.is_empty() {
                if !saw_missing {
                    saw_missing = true;
                    mapping.labels.push(None);
                }
                continue;
            }
            if mapping.codes.contains_key(label) {
                continue;
            }
            let code = u32::try_from(mapping.labels.len()).unwrap_or(u32::MAX);
            mapping.codes.insert(label.to_string(), code);
            mapping.labels.push(Some(label.to_string()));
        }

        mapping
    }

    /// Code for `label`, or `None` if it never appeared in the dataset.
    pub fn get(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Code for an optional label, falling back to [`DEFAULT_CATEGORY_CODE`].
    pub fn resolve(&self, label: Option<&str>) -> u32 {
        label
            .and_then(|l| self.get(l))
            .unwrap_or(DEFAULT_CATEGORY_CODE)
    }

    /// Iterate `(code, label)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<&str>)> {
        self.labels
            .iter()
            .zip(0u32..)
            .map(|(label, code)| (code, label.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
