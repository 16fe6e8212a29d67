//! Service trait for the remote playlist collection

use crate::error::Result;
use crate::types::{Draft, Playlist};
use async_trait::async_trait;

/// Access to the remote collection of playlists, addressed by name.
///
/// Every call maps to exactly one request. Implementations must not retry and
/// must report failures through [`RequestError`](crate::RequestError) rather
/// than panicking.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// Fetch every playlist, in server order
    async fn list_all(&self) -> Result<Vec<Playlist>>;

    /// Fetch one playlist by its name
    async fn get_by_name(&self, name: &str) -> Result<Playlist>;

    /// Create a playlist from a draft. The response body is ignored.
    async fn create(&self, draft: &Draft) -> Result<()>;

    /// Delete a playlist by its name
    async fn delete_by_name(&self, name: &str) -> Result<()>;
}
