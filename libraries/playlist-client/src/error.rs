//! Error types for building a playlist client.
//!
//! Request failures use [`playlist_core::RequestError`]; this module only
//! covers what can go wrong before the first request is sent.

use thiserror::Error;

/// Errors that can occur while constructing a [`PlaylistClient`](crate::PlaylistClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client construction.
pub type Result<T> = std::result::Result<T, ClientError>;
