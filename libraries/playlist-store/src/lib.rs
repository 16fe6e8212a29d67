//! Playlist Store
//!
//! In-memory mirror of the remote playlist collection. The store never patches
//! its cache locally: every successful mutation is followed by a full refresh,
//! and refresh/lookup responses are only applied if they answer the most
//! recently issued request of their kind.

mod gate;
mod notice;
mod state;
mod store;
mod types;

// Public exports
pub use gate::ConfirmationGate;
pub use notice::Notice;
pub use store::PlaylistStore;
pub use types::{LookupState, PendingDeletion, RefreshOutcome, RefreshStatus, StoreSnapshot};
