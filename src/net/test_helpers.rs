//! Recording transport double shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::http::{ApiClient, HttpResponse, OutgoingRequest, Transport};
use crate::error::ApiError;
use crate::session::SessionStore;

/// Canned outcome for one dispatched request.
pub enum Reply {
    Response(HttpResponse),
    TransportError(String),
}

/// Records every request and answers from a queue. An exhausted queue
/// answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .expect("replies mutex should lock")
            .push_back(Reply::Response(HttpResponse::new(status, body)));
    }

    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(status, body.to_string());
    }

    pub fn push_transport_error(&self, message: &str) {
        self.replies
            .lock()
            .expect("replies mutex should lock")
            .push_back(Reply::TransportError(message.to_owned()));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().expect("requests mutex should lock").clone()
    }

    #[must_use]
    pub fn last_request(&self) -> OutgoingRequest {
        self.requests()
            .pop()
            .expect("at least one request should have been sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .expect("requests mutex should lock")
            .push(request);
        let reply = self
            .replies
            .lock()
            .expect("replies mutex should lock")
            .pop_front();
        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::TransportError(message)) => Err(ApiError::Transport(message)),
            None => Ok(HttpResponse::new(200, "{}")),
        }
    }
}

/// Client over a fresh in-memory session and a recording transport.
#[must_use]
pub fn test_client() -> (ApiClient, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let client = ApiClient::new(transport.clone(), SessionStore::in_memory());
    (client, transport)
}

/// Header value as a string, if present.
#[must_use]
pub fn header(request: &OutgoingRequest, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
