//! Auth gateway client: register, login, logout.
//!
//! This is the only writer of the session. `login` validates the response
//! before touching storage, so a malformed reply never leaves a partial
//! session behind.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use reqwest::Method;

use crate::error::ApiError;
use crate::net::http::{ApiClient, OutgoingRequest};
use crate::net::types::{AuthResponse, Credentials};
use crate::session::SessionStore;

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Create an account. The session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` carrying the server's message, or
    /// `registration failed` when the payload has none.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = OutgoingRequest::new(Method::POST, REGISTER_PATH).with_json(&Credentials { username, password })?;
        let response = self
            .api
            .execute(request)
            .await?
            .ensure_success("registration failed")?;
        let user: AuthResponse = if response.is_no_content() { AuthResponse::default() } else { response.json()? };
        tracing::info!(username, user_id = user.user_id, "account registered");
        Ok(user)
    }

    /// Authenticate and persist the session. Returns the token.
    ///
    /// # Errors
    ///
    /// - `ApiError::Status` on non-success, with the server's message or
    ///   `login failed`.
    /// - `ApiError::Validation` when the response is malformed or lacks a
    ///   token or user id; the session is not modified.
    /// - `ApiError::Storage` if the session cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let request = OutgoingRequest::new(Method::POST, LOGIN_PATH).with_json(&Credentials { username, password })?;
        let response = self.api.execute(request).await?.ensure_success("login failed")?;
        let body: AuthResponse = response
            .json()
            .map_err(|e| ApiError::Validation(format!("malformed login response: {e}")))?;
        let (token, user_id) = validate_login(body)?;

        self.session().save(&token, user_id)?;
        tracing::info!(username, user_id, "logged in");
        Ok(token)
    }

    /// Drop the session. No network call is made.
    pub fn logout(&self) {
        if let Err(e) = self.session().clear() {
            tracing::warn!(error = %e, "session removal was not persisted");
        }
        tracing::info!("logged out");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}

/// Require both token and user id. `user_id == 0` is a real id.
fn validate_login(body: AuthResponse) -> Result<(String, i64), ApiError> {
    let token = body.token.filter(|t| !t.is_empty());
    match (token, body.user_id) {
        (Some(token), Some(user_id)) => Ok((token, user_id)),
        (None, Some(_)) => Err(ApiError::Validation("login response is missing the token".into())),
        (Some(_), None) => Err(ApiError::Validation("login response is missing the user id".into())),
        (None, None) => Err(ApiError::Validation("login response is missing the token and user id".into())),
    }
}
