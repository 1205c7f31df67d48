use std::fmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Workflow state a story can be in or transition into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoryState {
    #[default]
    Unscheduled,
    Unstarted,
    Planned,
    Started,
    Finished,
    Delivered,
    Accepted,
    Rejected,
    Other(String),
}

impl StoryState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unscheduled => "unscheduled",
            Self::Unstarted => "unstarted",
            Self::Planned => "planned",
            Self::Started => "started",
            Self::Finished => "finished",
            Self::Delivered => "delivered",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for StoryState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unscheduled" => Self::Unscheduled,
            "unstarted" => Self::Unstarted,
            "planned" => Self::Planned,
            "started" => Self::Started,
            "finished" => Self::Finished,
            "delivered" => Self::Delivered,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<StoryState> for String {
    fn from(state: StoryState) -> Self {
        match state {
            StoryState::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for StoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition as returned by the API, actor still an id.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RawTransition {
    pub state: StoryState,
    pub occurred_at: String,
    pub performed_by_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StoryState,
    /// Timestamp exactly as the API sent it.
    pub occurred_at: String,
    pub performed_by: String,
    /// `occurred_at` without its zone suffix, compared as naive time.
    pub occurred: NaiveDateTime,
}

impl Transition {
    pub fn display_string(&self) -> String {
        format!(
            "state:{},occurred_at:{},performed_by:{}",
            self.state, self.occurred_at, self.performed_by
        )
    }
}
