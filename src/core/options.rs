use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SERIES_KEY: &str = "series";

/// Options document handed to the rendering backend's `set_option`.
///
/// Top-level keys keep insertion order so the serialized form is stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderConfig(IndexMap<String, Value>);

impl RenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Series entries, or an empty slice when none were generated.
    #[must_use]
    pub fn series(&self) -> &[Value] {
        self.0
            .get(SERIES_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Overlays `style` on top of the generated options.
    ///
    /// Objects merge recursively, anything else replaces. An object-valued
    /// `series` style is merged into every generated series entry instead of
    /// replacing the series array.
    pub fn apply_style(&mut self, style: &ChartStyle) {
        for (key, patch) in style.iter() {
            let Some(existing) = self.0.get_mut(key) else {
                self.0.insert(key.to_owned(), patch.clone());
                continue;
            };
            match (existing, patch) {
                (Value::Array(series), Value::Object(_)) if key == SERIES_KEY => {
                    for entry in series.iter_mut() {
                        merge_json(entry, patch);
                    }
                }
                (existing, _) => merge_json(existing, patch),
            }
        }
    }
}

/// Caller-supplied styling, expressed in the same vocabulary as
/// [`RenderConfig`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartStyle(IndexMap<String, Value>);

impl ChartStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Folds `other` into this style; later values win.
    pub fn merge(&mut self, other: ChartStyle) {
        for (key, patch) in other.0 {
            match self.0.get_mut(&key) {
                Some(existing) => merge_json(existing, &patch),
                None => {
                    self.0.insert(key, patch);
                }
            }
        }
    }
}

pub(crate) fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
