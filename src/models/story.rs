use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::{RawTimingSummary, RawTransition, StoryState, TimingSummary, Transition};
use crate::constants::NO_ESTIMATE;

/// One output row: field name to value, in insertion order.
pub type StoryRecord = Map<String, Value>;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Label {
    pub name: String,
}

/// Story as returned by the stories endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawStory {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub story_type: String,
    #[serde(default)]
    pub current_state: StoryState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Number>,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub owner_ids: Vec<u64>,
    #[serde(default)]
    pub transitions: Vec<RawTransition>,
    #[serde(default)]
    pub cycle_time_details: RawTimingSummary,
}

impl RawStory {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.name == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Points(Number),
    Unestimated,
}

impl From<Option<Number>> for Estimate {
    fn from(value: Option<Number>) -> Self {
        value.map(Estimate::Points).unwrap_or(Estimate::Unestimated)
    }
}

impl From<Estimate> for Value {
    fn from(estimate: Estimate) -> Self {
        match estimate {
            Estimate::Points(points) => Value::Number(points),
            Estimate::Unestimated => Value::String(NO_ESTIMATE.to_string()),
        }
    }
}

/// Story with names resolved and transitions in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: u64,
    pub name: String,
    pub story_type: String,
    pub current_state: StoryState,
    pub estimate: Estimate,
    pub url: String,
    pub accepted_at: Option<String>,
    pub labels: Vec<String>,
    pub owners: Vec<String>,
    pub transitions: Vec<Transition>,
    pub cycle_time_details: TimingSummary,
}
