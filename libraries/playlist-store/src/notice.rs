use playlist_core::FailureKind;
use serde::Serialize;
use std::fmt;

use crate::RefreshOutcome;

/// User-facing acknowledgment of a store operation.
///
/// Every store operation ends in one of these (or in a state value); failures
/// never propagate past the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    /// Create was attempted with a blank name; nothing was sent
    NameRequired,
    /// The playlist was created. `refresh_failed` is set when the follow-up
    /// refresh did not go through and the cache is stale.
    Created {
        name: String,
        refresh_failed: Option<FailureKind>,
    },
    CreateFailed { name: String, kind: FailureKind },
    Deleted {
        name: String,
        refresh_failed: Option<FailureKind>,
    },
    DeleteFailed { name: String, kind: FailureKind },
    DeleteCancelled { name: String },
    /// Confirm or cancel with no delete awaiting an answer
    NothingPending,
    RefreshFailed { kind: FailureKind },
}

impl Notice {
    pub(crate) fn created(name: String, refresh: RefreshOutcome) -> Self {
        Notice::Created {
            name,
            refresh_failed: refresh.failure(),
        }
    }

    pub(crate) fn deleted(name: String, refresh: RefreshOutcome) -> Self {
        Notice::Deleted {
            name,
            refresh_failed: refresh.failure(),
        }
    }

    /// Alert for a refresh that failed right after a successful mutation
    pub fn refresh_alert(&self) -> Option<Notice> {
        match self {
            Notice::Created {
                refresh_failed: Some(kind),
                ..
            }
            | Notice::Deleted {
                refresh_failed: Some(kind),
                ..
            } => Some(Notice::RefreshFailed { kind: *kind }),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Created { .. } | Notice::Deleted { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Notice::NameRequired
                | Notice::CreateFailed { .. }
                | Notice::DeleteFailed { .. }
                | Notice::RefreshFailed { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NameRequired => f.write_str("You must enter a name."),
            Notice::Created { name, .. } => write!(f, "Playlist \"{}\" created successfully.", name),
            Notice::CreateFailed {
                name,
                kind: FailureKind::Conflict,
            } => write!(f, "A playlist named \"{}\" already exists.", name),
            Notice::CreateFailed { .. } => f.write_str("Error creating the playlist."),
            Notice::Deleted { name, .. } => write!(f, "Playlist \"{}\" deleted.", name),
            Notice::DeleteFailed {
                name,
                kind: FailureKind::NotFound,
            } => write!(f, "Playlist \"{}\" no longer exists.", name),
            Notice::DeleteFailed { .. } => f.write_str("Error deleting the playlist."),
            Notice::DeleteCancelled { name } => write!(f, "Kept playlist \"{}\".", name),
            Notice::NothingPending => f.write_str("No deletion is waiting for confirmation."),
            Notice::RefreshFailed { .. } => f.write_str("Error loading the playlists."),
        }
    }
}
