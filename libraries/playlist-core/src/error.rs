/// Core error types for the playlist manager
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for remote playlist operations
pub type Result<T> = std::result::Result<T, RequestError>;

/// The remote operation a request belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `GET /lists`
    List,
    /// `GET /lists/{name}`
    Get,
    /// `POST /lists`
    Create,
    /// `DELETE /lists/{name}`
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list playlists",
            Operation::Get => "get playlist",
            Operation::Create => "create playlist",
            Operation::Delete => "delete playlist",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The server already holds a playlist with that name (409)
    Conflict,
    /// No playlist with that name (404)
    NotFound,
    /// The server could not be reached at all
    Transport,
    /// Any other non-success status
    Server,
    /// A success status with a body that did not decode
    InvalidResponse,
}

/// Errors produced by a request to the collection service.
///
/// Every variant records the operation that failed, so `Display` always reads
/// "<operation> failed: ...".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Resource already exists
    #[error("{operation} failed: a playlist with that name already exists")]
    Conflict { operation: Operation },

    /// Resource does not exist
    #[error("{operation} failed: playlist not found")]
    NotFound { operation: Operation },

    /// Connection refused, DNS failure, timeout
    #[error("{operation} failed: server unreachable: {message}")]
    Transport { operation: Operation, message: String },

    /// Server returned an error response
    #[error("{operation} failed: server error ({status}): {message}")]
    Server {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Failed to parse server response
    #[error("{operation} failed: invalid response: {message}")]
    InvalidResponse { operation: Operation, message: String },
}

impl RequestError {
    /// Map a non-success HTTP status onto the matching variant
    pub fn from_status(operation: Operation, status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound { operation },
            409 => Self::Conflict { operation },
            _ => Self::Server {
                operation,
                status,
                message: message.into(),
            },
        }
    }

    /// Create a transport error
    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(operation: Operation, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation,
            message: message.into(),
        }
    }

    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            Self::Conflict { operation }
            | Self::NotFound { operation }
            | Self::Transport { operation, .. }
            | Self::Server { operation, .. }
            | Self::InvalidResponse { operation, .. } => *operation,
        }
    }

    /// The coarse kind, without any detail
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Conflict { .. } => FailureKind::Conflict,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Transport { .. } => FailureKind::Transport,
            Self::Server { .. } => FailureKind::Server,
            Self::InvalidResponse { .. } => FailureKind::InvalidResponse,
        }
    }
}

/// Errors raised by local draft edits. No request is ever involved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Name is empty or whitespace only
    #[error("A playlist name is required")]
    NameRequired,

    #[error("Song index {index} is out of bounds (draft has {len} songs)")]
    SongIndexOutOfBounds { index: usize, len: usize },

    #[error("Unknown song field: {0}")]
    UnknownField(String),
}
