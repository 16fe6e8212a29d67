//! Playlist Collection Client
//!
//! HTTP client library for the remote playlist collection service.
//!
//! # Features
//!
//! - **Static credentials**: a fixed basic-auth pair on every request
//! - **Name addressing**: playlists are fetched and deleted by name
//! - **Tagged failures**: every error names the operation and a coarse kind
//!
//! # Example
//!
//! ```ignore
//! use playlist_client::{ClientConfig, PlaylistClient};
//! use playlist_core::PlaylistService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8080")
//!         .with_credentials("admin", "password");
//!     let client = PlaylistClient::new(config)?;
//!
//!     for playlist in client.list_all().await? {
//!         println!("{} ({} songs)", playlist.name, playlist.songs.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod lists;
mod types;

// Re-export main types
pub use client::PlaylistClient;
pub use error::{ClientError, Result};
pub use lists::ListsClient;
pub use types::{ClientConfig, Credentials, DEFAULT_BASE_URL};
