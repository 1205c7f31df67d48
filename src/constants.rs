pub const TRACKER_API_URL: &str = "https://www.pivotaltracker.com/services/v5";
pub const TRACKER_TOKEN_HEADER: &str = "X-TrackerToken";
pub const CONFIG_FILE: &str = ".tracker-stories-config.json";

pub const TOKEN_ENV: &str = "TOKEN";
pub const PROJECT_ID_ENV: &str = "PROJECT_ID";
pub const API_URL_ENV: &str = "TRACKER_API_URL";

/// Display name used when a transition actor is no longer a project member.
pub const INACTIVE_USER: &str = "Inactive User";

/// Placeholder for stories that have not been estimated.
pub const NO_ESTIMATE: &str = "-";

pub const ZERO_DURATION: &str = "0:00:00";

// Story fields requested from the API unless told otherwise
pub const DEFAULT_STORY_FIELDS: &[&str] = &[
    "accepted_at",
    "current_state",
    "cycle_time_details",
    "estimate",
    "id",
    "labels",
    "name",
    "owner_ids",
    "story_type",
    "transitions",
    "url",
];

/// Immutable set of endpoint locations for one API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stories(&self, project_id: u64) -> String {
        format!("{}/projects/{}/stories", self.base_url, project_id)
    }

    pub fn memberships(&self, project_id: u64) -> String {
        format!("{}/projects/{}/memberships", self.base_url, project_id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(TRACKER_API_URL)
    }
}
