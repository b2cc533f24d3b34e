//! Mock transport serving canned responses.
//!
//! Responses are matched on query parameters: a canned response applies to
//! any request whose query string contains all of its parameters. The first
//! registered match wins. Every request is recorded so tests can assert on
//! what was sent upstream.

use std::sync::{Arc, Mutex, MutexGuard};

use super::error::TransportError;
use super::{Request, Transport};

/// A canned response.
#[derive(Debug, Clone)]
struct Canned {
    params: Vec<(String, String)>,
    reply: Reply,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

#[derive(Debug, Default)]
struct State {
    canned: Vec<Canned>,
    requests: Vec<Request>,
}

/// Transport that never touches the network.
///
/// Clones share state, so a clone kept by a test sees the requests made by
/// the client that owns the original.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for requests carrying all of `params`.
    pub fn respond(self, params: &[(&str, &str)], body: impl Into<String>) -> Self {
        self.push(params, Reply::Body(body.into()));
        self
    }

    /// Fail requests carrying all of `params` with an HTTP status.
    pub fn fail(self, params: &[(&str, &str)], status: u16) -> Self {
        self.push(params, Reply::Status(status));
        self
    }

    /// Requests made so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Values of one query parameter across all requests made so far.
    pub fn requested(&self, param: &str) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .filter_map(|r| r.param(param))
            .collect()
    }

    fn push(&self, params: &[(&str, &str)], reply: Reply) {
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.lock().canned.push(Canned { params, reply });
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock cannot leave State half-written.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for MockTransport {
    async fn get(&self, request: Request) -> Result<String, TransportError> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        let reply = state
            .canned
            .iter()
            .find(|c| {
                c.params
                    .iter()
                    .all(|(k, v)| request.param(k).as_deref() == Some(v.as_str()))
            })
            .map(|c| c.reply.clone())
            .ok_or_else(|| TransportError::Mock(request.url.to_string()))?;

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(401) | Reply::Status(403) => Err(TransportError::Unauthorized),
            Reply::Status(status) => Err(TransportError::Api {
                status,
                message: "mock failure".to_string(),
            }),
        }
    }
}
