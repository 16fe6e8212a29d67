use playlist_core::{Draft, FailureKind, Playlist};
use serde::Serialize;
use std::fmt;

use crate::Notice;

/// State of the collection cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    /// Nothing fetched yet
    Idle,
    Loading,
    /// The cache holds the last applied server snapshot
    Populated,
    /// The latest refresh failed; the cache still holds the previous snapshot
    Failed(FailureKind),
}

/// What a single refresh call did to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The response replaced the cache
    Applied { count: usize },
    /// A newer refresh was issued before this one answered; result dropped
    Superseded,
    Failed(FailureKind),
}

impl RefreshOutcome {
    /// The alert to show, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            RefreshOutcome::Failed(kind) => Some(Notice::RefreshFailed { kind: *kind }),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            RefreshOutcome::Failed(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// State of the inspected playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    Idle,
    Loading { name: String },
    Found { playlist: Playlist },
    /// Absent and unreachable both end up here
    NotFound { name: String },
}

impl LookupState {
    pub fn playlist(&self) -> Option<&Playlist> {
        match self {
            LookupState::Found { playlist } => Some(playlist),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }
}

impl fmt::Display for LookupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupState::Idle => Ok(()),
            LookupState::Loading { .. } => f.write_str("Loading..."),
            LookupState::Found { playlist } => f.write_str(&playlist.name),
            LookupState::NotFound { .. } => f.write_str("Playlist not found"),
        }
    }
}

/// A delete waiting for the user to say yes or no
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDeletion {
    pub name: String,
}

impl PendingDeletion {
    /// Question to put to the user
    pub fn prompt(&self) -> String {
        format!("Delete playlist \"{}\"?", self.name)
    }
}

/// Owned copy of everything a presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub playlists: Vec<Playlist>,
    pub refresh: RefreshStatus,
    pub lookup: LookupState,
    pub draft: Draft,
    pub pending_deletion: Option<PendingDeletion>,
    /// True while any refresh or lookup request is outstanding
    pub loading: bool,
}
