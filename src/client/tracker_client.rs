use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::constants::{Endpoints, TRACKER_TOKEN_HEADER};
use crate::error::{TrackerError, TrackerResult};
use crate::filtering::StoryQuery;
use crate::logging::log_debug;
use crate::models::{Membership, RawStory};

/// Read-only client for one Tracker API host. Requests are issued one at a
/// time, without retries.
pub struct TrackerClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl TrackerClient {
    pub fn new(token: &str, endpoints: Endpoints) -> TrackerResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| TrackerError::InvalidInput("API token contains invalid characters".to_string()))?;
        token_value.set_sensitive(true);
        let token_header = HeaderName::from_bytes(TRACKER_TOKEN_HEADER.as_bytes())
            .map_err(|e| TrackerError::ConfigError(format!("Invalid token header name: {}", e)))?;
        headers.insert(token_header, token_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        log_debug(&format!("Created client for {}", endpoints.base_url()));

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> TrackerResult<T> {
        log_debug(&format!("GET {} {:?}", url, params));

        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TrackerError::ApiError(format!(
                "GET {} failed with status {}: {}",
                url, status, error_text
            )));
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn get_memberships(&self, project_id: u64) -> TrackerResult<Vec<Membership>> {
        self.get(&self.endpoints.memberships(project_id), &[]).await
    }

    pub async fn get_stories(&self, project_id: u64, query: &StoryQuery) -> TrackerResult<Vec<RawStory>> {
        self.get(&self.endpoints.stories(project_id), &query.to_params()).await
    }
}
