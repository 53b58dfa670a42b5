//! Per-client bookkeeping against the key-value store.
//!
//! # Data Flow
//! ```text
//! albums request (client address)
//!     → Bookkeeper::record
//!         none      → Visit::Untracked
//!         last_seen → last_seen.rs (read previous, overwrite with now)
//!         session   → session.rs (read or create once)
//!     → Visit handed back to the handler
//! ```
//!
//! # Design Decisions
//! - The last-seen read-then-write is not atomic; concurrent requests from
//!   one address may both see the same previous value. That race is accepted.
//! - Session creation uses set-if-absent, so an address never gets two ids.

pub mod last_seen;
pub mod session;

use std::sync::Arc;

use crate::config::BookkeepingMode;
use crate::store::{ClientStore, StoreError};

/// What bookkeeping did for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// Bookkeeping is off.
    Untracked,
    /// Last-seen timestamp recorded.
    LastSeen {
        /// Timestamp stored by the client's previous request, if any.
        previous: Option<String>,
        /// Timestamp stored by this request.
        current: String,
    },
    /// Session id resolved.
    Session {
        id: String,
        /// Whether this request created the id.
        created: bool,
    },
}

impl Visit {
    /// Session id to propagate downstream, if any.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Visit::Session { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Applies the configured bookkeeping mode to a client store.
#[derive(Clone)]
pub struct Bookkeeper {
    mode: BookkeepingMode,
    store: Arc<dyn ClientStore>,
}

impl Bookkeeper {
    pub fn new(mode: BookkeepingMode, store: Arc<dyn ClientStore>) -> Self {
        Self { mode, store }
    }

    pub fn mode(&self) -> BookkeepingMode {
        self.mode
    }

    /// Record a request from `client`.
    pub async fn record(&self, client: &str) -> Result<Visit, StoreError> {
        match self.mode {
            BookkeepingMode::None => Ok(Visit::Untracked),
            BookkeepingMode::LastSeen => {
                let (previous, current) = last_seen::touch(self.store.as_ref(), client).await?;
                Ok(Visit::LastSeen { previous, current })
            }
            BookkeepingMode::Session => {
                let (id, created) = session::resolve(self.store.as_ref(), client).await?;
                Ok(Visit::Session { id, created })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_untracked_leaves_store_alone() {
        let store = MemoryStore::new();
        let keeper = Bookkeeper::new(BookkeepingMode::None, Arc::new(store.clone()));

        assert_eq!(keeper.record("10.1.1.1").await.unwrap(), Visit::Untracked);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_session_id_only_in_session_mode() {
        let store = Arc::new(MemoryStore::new());

        let keeper = Bookkeeper::new(BookkeepingMode::LastSeen, store.clone());
        let visit = keeper.record("10.1.1.2").await.unwrap();
        assert!(visit.session_id().is_none());

        let keeper = Bookkeeper::new(BookkeepingMode::Session, store);
        let visit = keeper.record("10.1.1.3").await.unwrap();
        assert!(visit.session_id().is_some());
    }
}
