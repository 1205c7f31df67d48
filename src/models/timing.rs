use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `cycle_time_details` as returned by the API. Durations are milliseconds.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawTimingSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cycle_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_time: Option<i64>,
    /// Counts, `rejected_time` and whatever else the API adds.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derived timing fields, keyed by output name in derivation order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimingSummary {
    fields: Map<String, Value>,
}

impl TimingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for TimingSummary {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
