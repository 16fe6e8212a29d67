//! Requests against the `/lists` collection.

use crate::types::Credentials;
use playlist_core::{Draft, Operation, Playlist, RequestError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

const COLLECTION: &str = "lists";

/// Client for the playlist collection. Each method issues exactly one request.
pub struct ListsClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    credentials: &'a Credentials,
}

impl<'a> ListsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, credentials: &'a Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Get every playlist.
    pub async fn list_all(&self) -> Result<Vec<Playlist>> {
        let url = self.endpoint(None);
        let response = self
            .send(Operation::List, self.request(Method::GET, url))
            .await?;

        let playlists: Vec<Playlist> = response.json().await.map_err(|e| {
            RequestError::invalid_response(
                Operation::List,
                format!("Failed to parse playlist list: {}", e),
            )
        })?;

        debug!(count = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Get a single playlist by name.
    pub async fn get_by_name(&self, name: &str) -> Result<Playlist> {
        let url = self.endpoint(Some(name));
        let response = self
            .send(Operation::Get, self.request(Method::GET, url))
            .await?;

        response.json().await.map_err(|e| {
            RequestError::invalid_response(
                Operation::Get,
                format!("Failed to parse playlist {:?}: {}", name, e),
            )
        })
    }

    /// Create a playlist. Whatever the server answers with is discarded.
    pub async fn create(&self, draft: &Draft) -> Result<()> {
        let url = self.endpoint(None);
        self.send(
            Operation::Create,
            self.request(Method::POST, url).json(draft),
        )
        .await?;

        debug!(name = %draft.name(), songs = draft.songs().len(), "Playlist created");
        Ok(())
    }

    /// Delete a playlist by name.
    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        let url = self.endpoint(Some(name));
        self.send(Operation::Delete, self.request(Method::DELETE, url))
            .await?;

        debug!(name = %name, "Playlist deleted");
        Ok(())
    }

    /// `{base}/lists` or `{base}/lists/{name}`, with the name as one encoded segment.
    fn endpoint(&self, name: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // The base was checked for `cannot_be_a_base` when the client was built
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation = %operation, error = %e, "Request did not reach the server");
            RequestError::transport(operation, e.to_string())
        })?;

        let status = response.status();
        debug!(operation = %operation, url = %response.url(), status = %status, "Response received");

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!(operation = %operation, status = %status, "Request failed");
            Err(RequestError::from_status(
                operation,
                status.as_u16(),
                error_text,
            ))
        }
    }
}
