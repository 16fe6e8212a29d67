//! Playlist Manager Core
//!
//! Platform-agnostic domain types, traits, and error handling shared by the
//! transport client and the playlist store.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `Draft`
//! - **Core Traits**: `PlaylistService`, the seam between the store and the wire
//! - **Error Handling**: `RequestError` (tagged by operation and kind) and `DraftError`
//!
//! # Example
//!
//! ```rust
//! use playlist_core::{Draft, SongField};
//!
//! let mut draft = Draft::new();
//! draft.set_name("Road Trip");
//! draft.append_song();
//! draft.set_song_field(0, SongField::Artist, "Muse").unwrap();
//!
//! assert!(draft.validate().is_ok());
//! assert_eq!(draft.songs()[0].artist, "Muse");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use error::{DraftError, FailureKind, Operation, RequestError, Result};
pub use service::PlaylistService;
pub use types::{Draft, Playlist, RemoteId, Song, SongField};

#[cfg(feature = "mocks")]
pub use service::MockPlaylistService;
