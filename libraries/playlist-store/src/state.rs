use playlist_core::{Draft, Playlist, RequestError};
use tracing::{debug, warn};

use crate::types::{LookupState, PendingDeletion, RefreshOutcome, RefreshStatus, StoreSnapshot};

/// Sequence number handed to an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

/// Issues tickets and remembers the newest one
#[derive(Debug, Default)]
struct Sequencer {
    latest: u64,
    in_flight: usize,
}

impl Sequencer {
    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight += 1;
        Ticket(self.latest)
    }

    /// Settle a ticket; returns true if it is still the newest one issued
    fn settle(&mut self, ticket: Ticket) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        ticket.0 == self.latest
    }
}

/// Everything the store owns. Transitions are synchronous; the store takes
/// care of locking and of the network in between.
#[derive(Debug)]
pub(crate) struct StoreState {
    playlists: Vec<Playlist>,
    refresh: RefreshStatus,
    /// Status before the newest refresh began; restored if it is abandoned
    settled_refresh: RefreshStatus,
    refreshes: Sequencer,
    lookup: LookupState,
    lookups: Sequencer,
    pub(crate) draft: Draft,
    pending_deletion: Option<PendingDeletion>,
}

impl StoreState {
    pub(crate) fn new() -> Self {
        Self {
            playlists: Vec::new(),
            refresh: RefreshStatus::Idle,
            settled_refresh: RefreshStatus::Idle,
            refreshes: Sequencer::default(),
            lookup: LookupState::Idle,
            lookups: Sequencer::default(),
            draft: Draft::new(),
            pending_deletion: None,
        }
    }

    pub(crate) fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub(crate) fn refresh_status(&self) -> RefreshStatus {
        self.refresh
    }

    pub(crate) fn lookup(&self) -> &LookupState {
        &self.lookup
    }

    pub(crate) fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending_deletion.as_ref()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.refreshes.in_flight > 0 || self.lookups.in_flight > 0
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    pub(crate) fn begin_refresh(&mut self) -> Ticket {
        let ticket = self.refreshes.issue();
        if self.refresh != RefreshStatus::Loading {
            self.settled_refresh = self.refresh;
        }
        self.refresh = RefreshStatus::Loading;
        debug!(ticket = ticket.0, "Refresh issued");
        ticket
    }

    /// Apply a list response if it answers the newest refresh.
    ///
    /// The cache is replaced wholesale; a failure leaves it untouched.
    pub(crate) fn finish_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Playlist>, RequestError>,
    ) -> RefreshOutcome {
        if !self.refreshes.settle(ticket) {
            warn!(
                ticket = ticket.0,
                latest = self.refreshes.latest,
                "Discarding response from superseded refresh"
            );
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(playlists) => {
                let count = playlists.len();
                self.playlists = playlists;
                self.refresh = RefreshStatus::Populated;
                RefreshOutcome::Applied { count }
            }
            Err(e) => {
                let kind = e.kind();
                self.refresh = RefreshStatus::Failed(kind);
                RefreshOutcome::Failed(kind)
            }
        }
    }

    /// Settle a refresh whose caller stopped waiting for it.
    ///
    /// If it was the newest one, the status goes back to what it was before
    /// that refresh began. The cache is not touched.
    pub(crate) fn abandon_refresh(&mut self, ticket: Ticket) {
        if self.refreshes.settle(ticket) {
            debug!(ticket = ticket.0, "Newest refresh abandoned");
            self.refresh = self.settled_refresh;
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub(crate) fn begin_lookup(&mut self, name: &str) -> Ticket {
        let ticket = self.lookups.issue();
        self.lookup = LookupState::Loading {
            name: name.to_string(),
        };
        ticket
    }

    /// Apply a lookup response if it answers the newest lookup. Any error
    /// becomes `NotFound`.
    pub(crate) fn finish_lookup(
        &mut self,
        ticket: Ticket,
        name: &str,
        result: Result<Playlist, RequestError>,
    ) -> &LookupState {
        if !self.lookups.settle(ticket) {
            warn!(name = %name, "Discarding response from superseded lookup");
            return &self.lookup;
        }

        self.lookup = match result {
            Ok(playlist) => LookupState::Found { playlist },
            Err(_) => LookupState::NotFound {
                name: name.to_string(),
            },
        };
        &self.lookup
    }

    /// Settle a lookup whose caller stopped waiting for it. The inspected
    /// slot goes back to `Idle` if it was the newest lookup.
    pub(crate) fn abandon_lookup(&mut self, ticket: Ticket) {
        if self.lookups.settle(ticket) {
            self.lookup = LookupState::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Delete confirmation
    // ------------------------------------------------------------------

    /// Record a delete awaiting confirmation, replacing any earlier one
    pub(crate) fn request_delete(&mut self, name: String) -> PendingDeletion {
        let pending = PendingDeletion { name };
        self.pending_deletion = Some(pending.clone());
        pending
    }

    pub(crate) fn take_pending_deletion(&mut self) -> Option<PendingDeletion> {
        self.pending_deletion.take()
    }

    pub(crate) fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            playlists: self.playlists.clone(),
            refresh: self.refresh,
            lookup: self.lookup.clone(),
            draft: self.draft.clone(),
            pending_deletion: self.pending_deletion.clone(),
            loading: self.is_loading(),
        }
    }
}
