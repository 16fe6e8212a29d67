use playlist_core::{
    Draft, DraftError, Operation, Playlist, PlaylistService, RequestError, SongField,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    gate::ConfirmationGate,
    notice::Notice,
    state::{StoreState, Ticket},
    types::{LookupState, PendingDeletion, RefreshOutcome, RefreshStatus, StoreSnapshot},
};

/// Client-side mirror of the playlist collection.
///
/// Holds the collection cache, the inspected playlist, the draft being built
/// and any delete awaiting confirmation. Operations take `&self`, so several
/// may be in flight at once; the state lock is never held across a request.
///
/// The cache is only ever replaced by a full refresh. Mutations do not patch
/// it; they trigger a refresh when they succeed.
pub struct PlaylistStore<S: ?Sized> {
    service: Arc<S>,
    state: RwLock<StoreState>,
    updates: watch::Sender<StoreSnapshot>,
}

#[derive(Debug, Clone, Copy)]
enum RequestKind {
    Refresh,
    Lookup,
}

/// An issued ticket that has not been answered yet.
///
/// Dropping it unanswered (the caller's future was cancelled) settles the
/// ticket so the store does not stay loading.
struct InFlight<'a, S: ?Sized> {
    store: &'a PlaylistStore<S>,
    kind: RequestKind,
    ticket: Ticket,
    armed: bool,
}

impl<'a, S: ?Sized> InFlight<'a, S> {
    fn new(store: &'a PlaylistStore<S>, kind: RequestKind, ticket: Ticket) -> Self {
        Self {
            store,
            kind,
            ticket,
            armed: true,
        }
    }

    /// The response arrived; hand the ticket back for the normal transition
    fn answered(mut self) -> Ticket {
        self.armed = false;
        self.ticket
    }
}

impl<S: ?Sized> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let ticket = self.ticket;
        debug!(kind = ?self.kind, "Request dropped before it answered");
        let mut state = self.store.write_state();
        match self.kind {
            RequestKind::Refresh => state.abandon_refresh(ticket),
            RequestKind::Lookup => state.abandon_lookup(ticket),
        }
        self.store.publish(&state);
    }
}

impl<S: PlaylistService> PlaylistStore<S> {
    pub fn new(service: S) -> Self {
        Self::with_shared(Arc::new(service))
    }
}

impl<S: PlaylistService + ?Sized> PlaylistStore<S> {
    /// Build a store over a service that is shared with other owners
    pub fn with_shared(service: Arc<S>) -> Self {
        let state = StoreState::new();
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            service,
            state: RwLock::new(state),
            updates,
        }
    }

    /// First load. Equivalent to a refresh.
    pub async fn initialize(&self) -> RefreshOutcome {
        info!("Loading playlists");
        self.refresh().await
    }

    /// Re-fetch the whole collection.
    ///
    /// Concurrent refreshes each send their own request; only the response to
    /// the most recently issued one is applied. Dropping the returned future
    /// before it completes settles the refresh without touching the cache.
    pub async fn refresh(&self) -> RefreshOutcome {
        let in_flight = {
            let mut state = self.write_state();
            let ticket = state.begin_refresh();
            self.publish(&state);
            InFlight::new(self, RequestKind::Refresh, ticket)
        };

        let result = self.service.list_all().await;
        if let Err(e) = &result {
            warn!(error = %e, "Refresh failed");
        }

        let ticket = in_flight.answered();
        let outcome = {
            let mut state = self.write_state();
            let outcome = state.finish_refresh(ticket, result);
            self.publish(&state);
            outcome
        };

        if let RefreshOutcome::Applied { count } = outcome {
            info!(count, "Playlists refreshed");
        }
        outcome
    }

    /// Fetch one playlist by name into the inspected slot.
    ///
    /// Every failure, whether the playlist is missing or the server is down,
    /// ends in `NotFound`. A blank name resolves to `NotFound` without a
    /// request. The collection cache is left alone.
    pub async fn lookup(&self, name: &str) -> LookupState {
        let in_flight = {
            let mut state = self.write_state();
            let ticket = state.begin_lookup(name);
            if name.trim().is_empty() {
                let resolved = state
                    .finish_lookup(
                        ticket,
                        name,
                        Err(RequestError::NotFound {
                            operation: Operation::Get,
                        }),
                    )
                    .clone();
                self.publish(&state);
                return resolved;
            }
            self.publish(&state);
            InFlight::new(self, RequestKind::Lookup, ticket)
        };

        let result = self.service.get_by_name(name).await;
        if let Err(e) = &result {
            debug!(name = %name, error = %e, "Lookup failed");
        }

        let ticket = in_flight.answered();
        let mut state = self.write_state();
        let resolved = state.finish_lookup(ticket, name, result).clone();
        self.publish(&state);
        resolved
    }

    /// Submit the draft.
    ///
    /// A blank name is rejected locally. On success the collection is
    /// refreshed and the draft reset; on failure the draft is kept as-is.
    /// A refresh that fails after a successful create is reported on the
    /// returned notice (see [`Notice::refresh_alert`]).
    pub async fn create(&self) -> Notice {
        let draft = self.read_state().draft.clone();

        if draft.validate().is_err() {
            debug!("Create rejected: blank name");
            return Notice::NameRequired;
        }

        let name = draft.name().to_string();
        match self.service.create(&draft).await {
            Ok(()) => {
                info!(name = %name, songs = draft.songs().len(), "Playlist created");
                let outcome = self.refresh().await;
                debug!(?outcome, "Refresh after create");

                {
                    let mut state = self.write_state();
                    state.draft.reset();
                    self.publish(&state);
                }

                Notice::created(name, outcome)
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Create failed");
                Notice::CreateFailed {
                    name,
                    kind: e.kind(),
                }
            }
        }
    }

    /// First phase of a delete: record the request and return the question.
    /// No request is sent until [`confirm_delete`](Self::confirm_delete).
    pub async fn request_delete(&self, name: impl Into<String>) -> PendingDeletion {
        let mut state = self.write_state();
        let pending = state.request_delete(name.into());
        self.publish(&state);
        pending
    }

    /// Drop the pending delete without contacting the server
    pub async fn cancel_delete(&self) -> Notice {
        let pending = {
            let mut state = self.write_state();
            let pending = state.take_pending_deletion();
            self.publish(&state);
            pending
        };

        match pending {
            Some(PendingDeletion { name }) => {
                debug!(name = %name, "Delete cancelled");
                Notice::DeleteCancelled { name }
            }
            None => Notice::NothingPending,
        }
    }

    /// Second phase of a delete: send it.
    ///
    /// On success the collection is refreshed. On failure the row stays in
    /// the (now stale) cache until the next refresh.
    pub async fn confirm_delete(&self) -> Notice {
        let pending = {
            let mut state = self.write_state();
            let pending = state.take_pending_deletion();
            self.publish(&state);
            pending
        };

        let Some(PendingDeletion { name }) = pending else {
            return Notice::NothingPending;
        };

        match self.service.delete_by_name(&name).await {
            Ok(()) => {
                info!(name = %name, "Playlist deleted");
                let outcome = self.refresh().await;
                debug!(?outcome, "Refresh after delete");
                Notice::deleted(name, outcome)
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Delete failed");
                Notice::DeleteFailed {
                    name,
                    kind: e.kind(),
                }
            }
        }
    }

    /// Run both delete phases, asking `gate` in between
    pub async fn delete<G>(&self, name: impl Into<String>, gate: &G) -> Notice
    where
        G: ConfirmationGate + ?Sized,
    {
        let pending = self.request_delete(name).await;
        if gate.confirm(&pending.prompt()) {
            self.confirm_delete().await
        } else {
            self.cancel_delete().await
        }
    }

    // ------------------------------------------------------------------
    // Draft
    // ------------------------------------------------------------------

    /// Owned copy of the draft
    pub async fn draft(&self) -> Draft {
        self.read_state().draft.clone()
    }

    /// Edit the draft in place
    pub async fn edit_draft<R>(&self, edit: impl FnOnce(&mut Draft) -> R) -> R {
        let mut state = self.write_state();
        let result = edit(&mut state.draft);
        self.publish(&state);
        result
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.edit_draft(|draft| draft.set_name(name)).await;
    }

    pub async fn set_description(&self, description: impl Into<String>) {
        self.edit_draft(|draft| draft.set_description(description))
            .await;
    }

    /// Append an empty song and return its index
    pub async fn append_song(&self) -> usize {
        self.edit_draft(Draft::append_song).await
    }

    pub async fn set_song_field(
        &self,
        index: usize,
        field: SongField,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        self.edit_draft(|draft| draft.set_song_field(index, field, value))
            .await
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.read_state().snapshot()
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.updates.subscribe()
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.read_state().playlists().to_vec()
    }

    pub async fn refresh_status(&self) -> RefreshStatus {
        self.read_state().refresh_status()
    }

    pub async fn lookup_state(&self) -> LookupState {
        self.read_state().lookup().clone()
    }

    pub async fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.read_state().pending_deletion().cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.read_state().is_loading()
    }
}

impl<S: ?Sized> PlaylistStore<S> {
    // Transitions run to completion under the lock and never panic halfway,
    // so a poisoned lock still holds consistent state.
    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &StoreState) {
        self.updates.send_replace(state.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use playlist_core::{FailureKind, MockPlaylistService};
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot, Mutex};

    type ListReply = playlist_core::Result<Vec<Playlist>>;

    /// Service whose list responses are released by the test, one channel per call
    struct GatedService {
        replies: Mutex<VecDeque<oneshot::Receiver<ListReply>>>,
        started: mpsc::UnboundedSender<usize>,
    }

    impl GatedService {
        fn new(
            replies: Vec<oneshot::Receiver<ListReply>>,
        ) -> (Self, mpsc::UnboundedReceiver<usize>) {
            let (started, started_rx) = mpsc::unbounded_channel();
            let service = Self {
                replies: Mutex::new(replies.into()),
                started,
            };
            (service, started_rx)
        }
    }

    #[async_trait]
    impl PlaylistService for GatedService {
        async fn list_all(&self) -> playlist_core::Result<Vec<Playlist>> {
            let reply = {
                let mut replies = self.replies.lock().await;
                let remaining = replies.len();
                let reply = replies.pop_front();
                let _ = self.started.send(remaining);
                reply
            };
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(RequestError::transport(Operation::List, "dropped"))),
                None => Err(RequestError::transport(Operation::List, "no reply queued")),
            }
        }

        async fn get_by_name(&self, _name: &str) -> playlist_core::Result<Playlist> {
            Err(RequestError::transport(Operation::Get, "not used"))
        }

        async fn create(&self, _draft: &Draft) -> playlist_core::Result<()> {
            Err(RequestError::transport(Operation::Create, "not used"))
        }

        async fn delete_by_name(&self, _name: &str) -> playlist_core::Result<()> {
            Err(RequestError::transport(Operation::Delete, "not used"))
        }
    }

    /// Service that never answers
    struct StalledService;

    #[async_trait]
    impl PlaylistService for StalledService {
        async fn list_all(&self) -> playlist_core::Result<Vec<Playlist>> {
            std::future::pending().await
        }

        async fn get_by_name(&self, _name: &str) -> playlist_core::Result<Playlist> {
            std::future::pending().await
        }

        async fn create(&self, _draft: &Draft) -> playlist_core::Result<()> {
            std::future::pending().await
        }

        async fn delete_by_name(&self, _name: &str) -> playlist_core::Result<()> {
            std::future::pending().await
        }
    }

    fn names(playlists: &[Playlist]) -> Vec<&str> {
        playlists.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn blank_name_sends_nothing_and_keeps_draft() {
        let mut service = MockPlaylistService::new();
        service.expect_create().never();
        service.expect_list_all().never();

        let store = PlaylistStore::new(service);
        for name in ["", "   ", "\t\n"] {
            store.set_name(name).await;
            store.set_description("kept").await;
            store.append_song().await;
            let before = store.draft().await;

            assert_eq!(store.create().await, Notice::NameRequired);
            assert_eq!(store.draft().await, before);
        }
    }

    #[tokio::test]
    async fn successful_create_refreshes_and_resets_draft() {
        let mut service = MockPlaylistService::new();
        service
            .expect_create()
            .withf(|draft: &Draft| draft.name() == "Road Trip" && draft.songs().is_empty())
            .times(1)
            .returning(|_| Ok(()));
        service
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![Playlist::new("Road Trip")]));

        let store = PlaylistStore::new(service);
        store.set_name("Road Trip").await;

        let notice = store.create().await;
        assert_eq!(
            notice,
            Notice::Created {
                name: "Road Trip".into(),
                refresh_failed: None
            }
        );
        assert!(notice.is_success());

        let playlists = store.playlists().await;
        assert_eq!(names(&playlists), ["Road Trip"]);
        assert!(playlists[0].songs.is_empty());
        assert!(store.draft().await.is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_after_create_is_reported() {
        let mut service = MockPlaylistService::new();
        service.expect_create().times(1).returning(|_| Ok(()));
        service
            .expect_list_all()
            .times(1)
            .returning(|| Err(RequestError::transport(Operation::List, "refused")));

        let store = PlaylistStore::new(service);
        store.set_name("Road Trip").await;

        let notice = store.create().await;
        assert_eq!(
            notice,
            Notice::Created {
                name: "Road Trip".into(),
                refresh_failed: Some(FailureKind::Transport)
            }
        );
        assert_eq!(
            notice.refresh_alert(),
            Some(Notice::RefreshFailed {
                kind: FailureKind::Transport
            })
        );
        assert!(store.draft().await.is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_after_delete_is_reported() {
        let mut service = MockPlaylistService::new();
        service.expect_delete_by_name().times(1).returning(|_| Ok(()));
        service
            .expect_list_all()
            .times(1)
            .returning(|| Err(RequestError::from_status(Operation::List, 500, "boom")));

        let store = PlaylistStore::new(service);
        let notice = store.delete("Road Trip", &|_: &str| true).await;

        assert!(notice.is_success());
        assert_eq!(
            notice.refresh_alert(),
            Some(Notice::RefreshFailed {
                kind: FailureKind::Server
            })
        );
    }

    #[tokio::test]
    async fn failed_create_keeps_draft() {
        let mut service = MockPlaylistService::new();
        service
            .expect_create()
            .times(1)
            .returning(|_| Err(RequestError::from_status(Operation::Create, 409, "exists")));
        service.expect_list_all().never();

        let store = PlaylistStore::new(service);
        store.set_name("Road Trip").await;
        let index = store.append_song().await;
        store
            .set_song_field(index, SongField::Title, "Starlight")
            .await
            .unwrap();
        let before = store.draft().await;

        let notice = store.create().await;
        assert_eq!(
            notice,
            Notice::CreateFailed {
                name: "Road Trip".into(),
                kind: FailureKind::Conflict
            }
        );
        assert_eq!(store.draft().await, before);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut service = MockPlaylistService::new();
        service.expect_delete_by_name().never();
        service.expect_list_all().never();

        let store = PlaylistStore::new(service);
        let before = store.snapshot().await;

        let notice = store.delete("Road Trip", &|_: &str| false).await;
        assert_eq!(
            notice,
            Notice::DeleteCancelled {
                name: "Road Trip".into()
            }
        );
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn two_phase_delete() {
        let mut service = MockPlaylistService::new();
        service
            .expect_delete_by_name()
            .withf(|name: &str| name == "Road Trip")
            .times(1)
            .returning(|_| Ok(()));
        service
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![Playlist::new("Focus")]));

        let store = PlaylistStore::new(service);

        let pending = store.request_delete("Road Trip").await;
        assert_eq!(pending.prompt(), "Delete playlist \"Road Trip\"?");
        assert_eq!(store.pending_deletion().await, Some(pending));

        let notice = store.confirm_delete().await;
        assert_eq!(
            notice,
            Notice::Deleted {
                name: "Road Trip".into(),
                refresh_failed: None
            }
        );
        assert!(store.pending_deletion().await.is_none());
        assert_eq!(names(&store.playlists().await), ["Focus"]);

        // Nothing left to confirm
        assert_eq!(store.confirm_delete().await, Notice::NothingPending);
        assert_eq!(store.cancel_delete().await, Notice::NothingPending);
    }

    #[tokio::test]
    async fn failed_delete_leaves_cache_stale() {
        let mut service = MockPlaylistService::new();
        service
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![Playlist::new("Road Trip")]));
        service
            .expect_delete_by_name()
            .times(1)
            .returning(|_| Err(RequestError::transport(Operation::Delete, "refused")));

        let store = PlaylistStore::new(service);
        store.initialize().await;

        let notice = store.delete("Road Trip", &|_: &str| true).await;
        assert_eq!(
            notice,
            Notice::DeleteFailed {
                name: "Road Trip".into(),
                kind: FailureKind::Transport
            }
        );
        assert_eq!(names(&store.playlists().await), ["Road Trip"]);
    }

    #[tokio::test]
    async fn lookup_does_not_touch_collection() {
        let mut service = MockPlaylistService::new();
        service
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![Playlist::new("Road Trip")]));
        service
            .expect_get_by_name()
            .withf(|name: &str| name == "Road Trip")
            .times(1)
            .returning(|_| Ok(Playlist::new("Road Trip").with_description("changed")));

        let store = PlaylistStore::new(service);
        store.initialize().await;

        let state = store.lookup("Road Trip").await;
        assert_eq!(
            state.playlist().and_then(|p| p.description.as_deref()),
            Some("changed")
        );
        assert!(store.playlists().await[0].description.is_none());
    }

    #[tokio::test]
    async fn lookup_failures_are_indistinguishable() {
        let mut missing = MockPlaylistService::new();
        missing.expect_get_by_name().returning(|_| {
            Err(RequestError::NotFound {
                operation: Operation::Get,
            })
        });
        let mut down = MockPlaylistService::new();
        down.expect_get_by_name()
            .returning(|_| Err(RequestError::transport(Operation::Get, "refused")));

        let a = PlaylistStore::new(missing);
        let b = PlaylistStore::new(down);

        let state_a = a.lookup("Road Trip").await;
        let state_b = b.lookup("Road Trip").await;

        assert_eq!(
            state_a,
            LookupState::NotFound {
                name: "Road Trip".into()
            }
        );
        assert_eq!(state_a, state_b);
        assert_eq!(state_a.to_string(), "Playlist not found");
        assert_eq!(a.snapshot().await, b.snapshot().await);
    }

    #[tokio::test]
    async fn blank_lookup_sends_nothing() {
        let mut service = MockPlaylistService::new();
        service.expect_get_by_name().never();

        let store = PlaylistStore::new(service);
        let state = store.lookup("  ").await;
        assert!(matches!(state, LookupState::NotFound { .. }));
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn failed_refresh_alerts_and_keeps_cache() {
        let mut service = MockPlaylistService::new();
        let mut calls = 0;
        service.expect_list_all().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![Playlist::new("a")])
            } else {
                Err(RequestError::from_status(Operation::List, 503, "down"))
            }
        });

        let store = PlaylistStore::new(service);
        store.initialize().await;

        let outcome = store.refresh().await;
        assert_eq!(outcome, RefreshOutcome::Failed(FailureKind::Server));
        assert_eq!(
            outcome.notice(),
            Some(Notice::RefreshFailed {
                kind: FailureKind::Server
            })
        );
        assert_eq!(
            store.refresh_status().await,
            RefreshStatus::Failed(FailureKind::Server)
        );
        assert_eq!(names(&store.playlists().await), ["a"]);
    }

    #[tokio::test]
    async fn subscribers_see_each_change() {
        let mut service = MockPlaylistService::new();
        service
            .expect_list_all()
            .returning(|| Ok(vec![Playlist::new("a")]));

        let store = PlaylistStore::new(service);
        let mut updates = store.subscribe();

        store.set_name("Draft").await;
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().draft.name(), "Draft");

        store.refresh().await;
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(names(&snapshot.playlists), ["a"]);
        assert_eq!(snapshot.refresh, RefreshStatus::Populated);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn cancelled_refresh_stops_loading() {
        let store = PlaylistStore::new(StalledService);

        let result = tokio::time::timeout(Duration::from_millis(50), store.refresh()).await;
        assert!(result.is_err());

        assert!(!store.is_loading().await);
        assert_eq!(store.refresh_status().await, RefreshStatus::Idle);
        assert!(!store.snapshot().await.loading);
    }

    #[tokio::test]
    async fn cancelled_lookup_stops_loading() {
        let store = PlaylistStore::new(StalledService);

        let result =
            tokio::time::timeout(Duration::from_millis(50), store.lookup("Road Trip")).await;
        assert!(result.is_err());

        assert!(!store.is_loading().await);
        assert_eq!(store.lookup_state().await, LookupState::Idle);
    }

    #[tokio::test]
    async fn cancelled_refresh_keeps_previous_status() {
        let (tx, rx) = oneshot::channel();
        let (stalled_tx, stalled_rx) = oneshot::channel::<ListReply>();
        let (service, _started) = GatedService::new(vec![rx, stalled_rx]);
        let store = PlaylistStore::new(service);

        tx.send(Ok(vec![Playlist::new("a")])).unwrap();
        store.refresh().await;

        let result = tokio::time::timeout(Duration::from_millis(50), store.refresh()).await;
        assert!(result.is_err());

        assert_eq!(store.refresh_status().await, RefreshStatus::Populated);
        assert_eq!(names(&store.playlists().await), ["a"]);
        assert!(!store.is_loading().await);
        drop(stalled_tx);
    }

    #[tokio::test]
    async fn newest_refresh_wins_when_it_answers_first() {
        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel();
        let (service, mut started) = GatedService::new(vec![older_rx, newer_rx]);
        let store = Arc::new(PlaylistStore::new(service));

        let older = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh().await }
        });
        started.recv().await.unwrap();

        let newer = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh().await }
        });
        started.recv().await.unwrap();
        assert!(store.is_loading().await);

        newer_tx.send(Ok(vec![Playlist::new("new")])).unwrap();
        assert_eq!(
            newer.await.unwrap(),
            RefreshOutcome::Applied { count: 1 }
        );

        older_tx.send(Ok(vec![Playlist::new("old")])).unwrap();
        assert_eq!(older.await.unwrap(), RefreshOutcome::Superseded);

        assert_eq!(names(&store.playlists().await), ["new"]);
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn newest_refresh_wins_when_it_answers_last() {
        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel();
        let (service, mut started) = GatedService::new(vec![older_rx, newer_rx]);
        let store = Arc::new(PlaylistStore::new(service));

        let older = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh().await }
        });
        started.recv().await.unwrap();

        let newer = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.refresh().await }
        });
        started.recv().await.unwrap();

        older_tx.send(Ok(vec![Playlist::new("old")])).unwrap();
        assert_eq!(older.await.unwrap(), RefreshOutcome::Superseded);
        assert!(store.playlists().await.is_empty());
        assert_eq!(store.refresh_status().await, RefreshStatus::Loading);

        newer_tx.send(Ok(vec![Playlist::new("new")])).unwrap();
        assert_eq!(
            newer.await.unwrap(),
            RefreshOutcome::Applied { count: 1 }
        );
        assert_eq!(names(&store.playlists().await), ["new"]);
    }
}
