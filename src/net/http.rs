//! Outgoing-request pipeline.
//!
//! ARCHITECTURE
//! ============
//! Every call goes `ApiClient` -> session interceptor -> `Transport`. The
//! interceptor copies the current session into `Authorization` and
//! `X-User-Id` headers; paths under `/auth/` skip it because they run
//! before any session exists. `Transport` is the dispatch seam: reqwest in
//! production, a recording double in tests.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries or swallows. Header encoding failures stop the
//! request before dispatch; non-2xx responses become `ApiError::Status`.

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::HttpTimeouts;
use crate::error::ApiError;
use crate::session::{Session, SessionStore};

/// Header carrying the numeric user id.
pub const USER_ID_HEADER: &str = "x-user-id";

const AUTH_PATH_PREFIX: &str = "/auth/";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// A request before dispatch. Only `headers` is touched by the pipeline.
#[derive(Clone, Debug)]
pub struct OutgoingRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl OutgoingRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Validation(format!("unencodable body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Auth endpoints are dispatched without session headers.
    #[must_use]
    pub fn is_auth_endpoint(&self) -> bool {
        self.path.starts_with(AUTH_PATH_PREFIX)
    }
}

/// Status and raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `204 No Content` or a blank body.
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        self.status == 204 || self.body.trim().is_empty()
    }

    /// Return `self` if 2xx, otherwise a `Status` error using `fallback`
    /// when the body carries no message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx responses.
    pub fn ensure_success(self, fallback: &str) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, &self.body, fallback))
        }
    }

    /// Decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Dispatches an already-intercepted request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport rooted at the gateway base URL.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method, url).headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

// =============================================================================
// INTERCEPTOR
// =============================================================================

/// Copy the session into request headers. Returns whether anything was
/// attached.
///
/// # Errors
///
/// Returns `ApiError::InvalidHeader` if the token cannot be encoded as a
/// header value.
pub fn apply_session_headers(headers: &mut HeaderMap, session: &Session, send_user_id: bool) -> Result<bool, ApiError> {
    let mut attached = false;
    if let Some(token) = &session.token {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::InvalidHeader(format!("authorization: {e}")))?;
        headers.insert(AUTHORIZATION, value);
        attached = true;
    }
    if send_user_id {
        if let Some(user_id) = session.user_id {
            headers.insert(HeaderName::from_static(USER_ID_HEADER), HeaderValue::from(user_id));
            attached = true;
        }
    }
    Ok(attached)
}

// =============================================================================
// CLIENT
// =============================================================================

/// The single pipeline every resource client calls through.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
    send_user_id: bool,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session, send_user_id: true }
    }

    /// Toggle `X-User-Id` injection.
    #[must_use]
    pub fn with_user_id_header(mut self, enabled: bool) -> Self {
        self.send_user_id = enabled;
        self
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Intercept and dispatch without judging the status.
    ///
    /// # Errors
    ///
    /// Returns header construction and transport errors unchanged.
    pub async fn execute(&self, mut request: OutgoingRequest) -> Result<HttpResponse, ApiError> {
        let authenticated = if request.is_auth_endpoint() {
            false
        } else {
            apply_session_headers(&mut request.headers, &self.session.snapshot(), self.send_user_id)?
        };
        tracing::debug!(method = %request.method, path = %request.path, authenticated, "dispatching request");

        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "response received");
        Ok(response)
    }

    /// Intercept, dispatch, and reject non-2xx responses.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx plus anything `execute` returns.
    pub async fn send(&self, request: OutgoingRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await?.ensure_success("request failed")
    }

    /// `GET` and decode a single object.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let mut request = OutgoingRequest::new(Method::GET, path);
        for (k, v) in query {
            request = request.with_query(k, v);
        }
        self.send(request).await?.json()
    }

    /// `GET` a list; no content decodes as an empty list.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>, ApiError> {
        let mut request = OutgoingRequest::new(Method::GET, path);
        for (k, v) in query {
            request = request.with_query(k, v);
        }
        let response = self.send(request).await?;
        if response.is_no_content() {
            return Ok(Vec::new());
        }
        let items: Option<Vec<T>> = response.json()?;
        Ok(items.unwrap_or_default())
    }

    /// `POST` a JSON body. An empty response body decodes as `null`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<serde_json::Value, ApiError> {
        let request = OutgoingRequest::new(Method::POST, path).with_json(body)?;
        decode_value(&self.send(request).await?)
    }

    /// `PUT` a JSON body. An empty response body decodes as `null`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and decode errors.
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<serde_json::Value, ApiError> {
        let request = OutgoingRequest::new(Method::PUT, path).with_json(body)?;
        decode_value(&self.send(request).await?)
    }

    /// `DELETE`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(OutgoingRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }
}

fn decode_value(response: &HttpResponse) -> Result<serde_json::Value, ApiError> {
    if response.is_no_content() {
        Ok(serde_json::Value::Null)
    } else {
        response.json()
    }
}
