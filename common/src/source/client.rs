use super::{ActivitySource, FetchOptions};
use crate::error::SourceError;
use crate::models::Activity;
use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the tracking service's user-activities endpoint.
pub struct BacklogClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BacklogClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Builds a client from `BACKLOG_BASE_URL` and `BACKLOG_API_KEY`.
    pub fn from_env() -> Result<Self, SourceError> {
        let base_url = env::var("BACKLOG_BASE_URL")
            .map_err(|_| SourceError::MissingConfig("BACKLOG_BASE_URL".to_string()))?;
        let api_key = env::var("BACKLOG_API_KEY")
            .map_err(|_| SourceError::MissingConfig("BACKLOG_API_KEY".to_string()))?;

        Self::new(&base_url, &api_key)
    }

    fn activities_url(&self, user_id: u64) -> String {
        format!("{}/api/v2/users/{}/activities", self.base_url, user_id)
    }
}

#[async_trait]
impl ActivitySource for BacklogClient {
    async fn fetch_user_activities(
        &self,
        user_id: u64,
        options: FetchOptions,
    ) -> Result<Vec<Activity>, SourceError> {
        let url = self.activities_url(user_id);
        debug!(
            "fetching up to {} activities for user {}",
            options.count, user_id
        );

        let count = options.count.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str()), ("count", count.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, message });
        }

        Ok(response.json::<Vec<Activity>>().await?)
    }
}
