//! Application context wiring session, HTTP pipeline, clients, and router.
//!
//! LIFECYCLE
//! =========
//! `GameStack::from_config` opens durable storage and loads the session once
//! at startup. Every component receives the same `SessionStore` handle, so a
//! login or logout is visible to the next request and the next navigation.
//! Teardown is `logout`, which clears the session.

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::http::{ApiClient, ReqwestTransport, Transport};
use crate::router::{Navigation, RouteError, Router};
use crate::services::auth::AuthClient;
use crate::services::collection::CollectionClient;
use crate::services::games::GamesClient;
use crate::session::{FileStorage, KeyValueStorage, SessionStore};

pub struct GameStack {
    session: SessionStore,
    pub auth: AuthClient,
    pub games: GamesClient,
    pub collection: CollectionClient,
    router: Router,
}

impl GameStack {
    /// Open the session file and build a reqwest-backed client.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be read or the HTTP
    /// client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let storage = FileStorage::open(&config.session_file)?;
        let transport = ReqwestTransport::new(&config.api_url, config.timeouts)?;
        tracing::debug!(api_url = transport.base_url(), session_file = %config.session_file.display(), "client configured");
        Ok(Self::with_parts(Arc::new(storage), Arc::new(transport), config.send_user_id))
    }

    /// Assemble from explicit storage and transport.
    #[must_use]
    pub fn with_parts(storage: Arc<dyn KeyValueStorage>, transport: Arc<dyn Transport>, send_user_id: bool) -> Self {
        let session = SessionStore::load(storage);
        let api = ApiClient::new(transport, session.clone()).with_user_id_header(send_user_id);
        Self {
            auth: AuthClient::new(api.clone()),
            games: GamesClient::new(api.clone()),
            collection: CollectionClient::new(api),
            router: Router::new(session.clone()),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Run the guard for `path`.
    ///
    /// # Errors
    ///
    /// Returns routing errors for unknown paths or redirect loops.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouteError> {
        self.router.navigate(path)
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Teardown: clear the session.
    pub fn logout(&self) {
        self.auth.logout();
    }
}
