//! Session store: the client-held authenticated identity.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is an injected handle over durable key-value storage. The
//! HTTP client reads it to attach headers, the router reads it to gate
//! navigation, and only the auth client writes it. Clones share the same
//! underlying storage.
//!
//! A session is authenticated iff both the token and the user id are
//! present. Either one alone (a corrupted or half-written store) reads as
//! signed out.

pub mod storage;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::fmt;
use std::sync::Arc;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "user_token";
/// Storage key for the numeric user id (decimal string).
pub const USER_ID_KEY: &str = "user_id";

// =============================================================================
// SESSION
// =============================================================================

/// Point-in-time view of the stored session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<i64>,
}

impl Session {
    /// True iff both token and user id are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .finish()
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by fresh in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Startup initialization: wrap already-opened storage and report what
    /// it holds.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let store = Self::new(storage);
        let session = store.snapshot();
        match (session.token.is_some(), session.user_id.is_some()) {
            (true, true) => tracing::info!(user_id = session.user_id, "restored persisted session"),
            (false, false) => tracing::debug!("no persisted session"),
            _ => tracing::warn!("persisted session is incomplete; treating as signed out"),
        }
        store
    }

    /// Read token and user id together.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        let mut values = self.storage.get_entries(&[TOKEN_KEY, USER_ID_KEY]).into_iter();
        let token = values.next().flatten().filter(|t| !t.is_empty());
        let user_id = values.next().flatten().and_then(|raw| raw.trim().parse::<i64>().ok());
        Session { token, user_id }
    }

    /// Write token and user id as one unit, replacing any prior session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to persist. The prior
    /// session stays in effect when that happens.
    pub fn save(&self, token: &str, user_id: i64) -> Result<(), StorageError> {
        let user_id = user_id.to_string();
        self.storage.set_entries(&[(TOKEN_KEY, token), (USER_ID_KEY, &user_id)])
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to persist. The
    /// in-process view is already cleared when that happens.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_entries(&[TOKEN_KEY, USER_ID_KEY])
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.snapshot().token
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.snapshot().user_id
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
