//! Drive v3 REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use crate::config::DriveConfig;
use crate::error::{IndexError, Result};

use super::error::ProviderError;
use super::query::ListingQuery;
use super::types::{DriveFile, FileList};
use super::StorageProvider;

/// User agent string for Drive requests.
const USER_AGENT: &str = "driveindex/0.1 (Drive listing)";

/// Fields fetched for a single record.
const METADATA_FIELDS: &str = "id,name,mimeType,size,webContentLink";

/// How requests are authorized.
#[derive(Clone)]
enum Credentials {
    /// OAuth access token sent as a bearer header.
    Bearer(String),
    /// API key sent as the `key` query parameter.
    ApiKey(String),
}

/// Client for the Drive v3 `files` resource.
#[derive(Clone)]
pub struct DriveClient {
    client: Client,
    base: Url,
    credentials: Credentials,
}

impl DriveClient {
    /// Create a client from the Drive configuration.
    ///
    /// An access token takes precedence over an API key.
    pub fn new(config: &DriveConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| IndexError::Config(format!("invalid drive.api_base: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(IndexError::Config(format!(
                "invalid drive.api_base: {}",
                config.api_base
            )));
        }

        let credentials = if !config.access_token.is_empty() {
            Credentials::Bearer(config.access_token.clone())
        } else if !config.api_key.is_empty() {
            Credentials::ApiKey(config.api_key.clone())
        } else {
            return Err(IndexError::Config(
                "either drive.access_token or drive.api_key must be set".to_string(),
            ));
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IndexError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    /// Build `{api_base}/<segments...>` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ProviderError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport(format!("invalid API base: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authorize and send a request, turning error statuses into [`ProviderError::Api`].
    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, ProviderError> {
        let request = match &self.credentials {
            Credentials::Bearer(token) => request.bearer_auth(token),
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Drive request failed");
            return Err(ProviderError::from_response(status.as_u16(), &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl StorageProvider for DriveClient {
    async fn list_folder_contents(
        &self,
        query: &ListingQuery,
    ) -> std::result::Result<FileList, ProviderError> {
        let url = self.endpoint(&["files"])?;
        let response = self
            .send(self.client.get(url).query(&query.to_params()))
            .await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn file_metadata(&self, file_id: &str) -> std::result::Result<DriveFile, ProviderError> {
        let url = self.endpoint(&["files", file_id])?;
        let response = self
            .send(
                self.client
                    .get(url)
                    .query(&[("fields", METADATA_FIELDS)]),
            )
            .await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn download_media(
        &self,
        file_id: &str,
        max_bytes: u64,
    ) -> std::result::Result<Vec<u8>, ProviderError> {
        let url = self.endpoint(&["files", file_id])?;
        let mut response = self
            .send(self.client.get(url).query(&[("alt", "media")]))
            .await?;

        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(ProviderError::TooLarge { limit: max_bytes });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > max_bytes {
                return Err(ProviderError::TooLarge { limit: max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}
