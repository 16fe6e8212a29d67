//! Main playlist collection client.

use crate::error::{ClientError, Result};
use crate::lists::ListsClient;
use crate::types::{ClientConfig, Credentials};
use async_trait::async_trait;
use playlist_core::{Draft, Playlist, PlaylistService};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Client for the remote playlist collection service.
///
/// Holds one shared HTTP connection pool, a fixed base address and a fixed
/// basic-auth pair. There is no login flow: the credentials are attached to
/// every request as-is.
///
/// # Example
///
/// ```ignore
/// use playlist_client::{ClientConfig, PlaylistClient};
///
/// let client = PlaylistClient::new(ClientConfig::new("http://localhost:8080"))?;
/// let playlist = client.lists().get_by_name("Road Trip").await?;
/// println!("{} has {} songs", playlist.name, playlist.songs.len());
/// ```
pub struct PlaylistClient {
    http: Client,
    url: String,
    base_url: Url,
    credentials: Credentials,
}

impl PlaylistClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url =
            Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base address",
                url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(format!("PlaylistManager/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(url = %url, username = %config.credentials.username, "Playlist client ready");

        Ok(Self {
            http,
            url,
            base_url,
            credentials: config.credentials,
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Username sent with every request.
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Get a client for the `/lists` collection.
    pub fn lists(&self) -> ListsClient<'_> {
        ListsClient::new(&self.http, &self.base_url, &self.credentials)
    }
}

#[async_trait]
impl PlaylistService for PlaylistClient {
    async fn list_all(&self) -> playlist_core::Result<Vec<Playlist>> {
        self.lists().list_all().await
    }

    async fn get_by_name(&self, name: &str) -> playlist_core::Result<Playlist> {
        self.lists().get_by_name(name).await
    }

    async fn create(&self, draft: &Draft) -> playlist_core::Result<()> {
        self.lists().create(draft).await
    }

    async fn delete_by_name(&self, name: &str) -> playlist_core::Result<()> {
        self.lists().delete_by_name(name).await
    }
}
