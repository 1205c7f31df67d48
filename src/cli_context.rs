use std::sync::Arc;

use crate::client::TrackerClient;
use crate::config::{get_api_url, get_project_id, get_token, load_config, save_config, Config};
use crate::constants::Endpoints;
use crate::error::{TrackerError, TrackerResult};
use crate::validation::validate_token;

/// Central context for CLI operations: resolved credentials and the client
/// built from them.
pub struct CliContext {
    token: Option<String>,
    project_id: Option<u64>,
    api_url: String,
    client: Option<Arc<TrackerClient>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            token: None,
            project_id: None,
            api_url: crate::constants::TRACKER_API_URL.to_string(),
            client: None,
        }
    }

    /// Load credentials from the environment, then the config file.
    pub fn load() -> TrackerResult<Self> {
        Self::from_config(&load_config())
    }

    pub fn from_config(config: &Config) -> TrackerResult<Self> {
        Ok(Self {
            token: get_token(config),
            project_id: get_project_id(config)?,
            api_url: get_api_url(config),
            client: None,
        })
    }

    /// Validated API token.
    pub fn token(&self) -> TrackerResult<&str> {
        let token = self.token.as_deref().ok_or(TrackerError::TokenNotFound)?;
        validate_token(token)?;
        Ok(token)
    }

    pub fn project_id(&self) -> TrackerResult<u64> {
        self.project_id.ok_or(TrackerError::ProjectIdNotFound)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.api_url.clone())
    }

    /// Get or create the client. Requires a valid token.
    pub fn client(&mut self) -> TrackerResult<Arc<TrackerClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(TrackerClient::new(self.token()?, self.endpoints())?);
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Persist the current credentials to the config file.
    pub fn save(&self) -> TrackerResult<std::path::PathBuf> {
        let mut config = load_config();
        config.token = Some(self.token()?.to_string());
        if let Some(project_id) = self.project_id {
            config.project_id = Some(project_id);
        }
        if self.api_url != crate::constants::TRACKER_API_URL {
            config.api_url = Some(self.api_url.clone());
        }
        save_config(&config)
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for contexts where command-line values override saved ones.
pub struct CliContextBuilder {
    token: Option<String>,
    project_id: Option<u64>,
    api_url: Option<String>,
    config: Option<Config>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            project_id: None,
            api_url: None,
            config: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_project_id(mut self, project_id: Option<u64>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        self.api_url = api_url;
        self
    }

    /// Use this config instead of the one in the home directory.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> TrackerResult<CliContext> {
        let mut context = match self.config {
            Some(config) => CliContext::from_config(&config)?,
            None => CliContext::load()?,
        };

        if self.token.is_some() {
            context.token = self.token;
        }
        if self.project_id.is_some() {
            context.project_id = self.project_id;
        }
        if let Some(api_url) = self.api_url {
            context.api_url = api_url;
        }

        Ok(context)
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
