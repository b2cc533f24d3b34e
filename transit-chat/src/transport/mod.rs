//! HTTP transport shared by the provider clients.
//!
//! Every provider endpoint is a read-only `GET` returning a text body.
//! Clients are generic over [`Transport`] so query logic can be exercised
//! against canned responses ([`MockTransport`]) instead of the network.

mod error;
mod http;
mod mock;

use std::future::Future;

use reqwest::Url;

pub use error::TransportError;
pub use http::{HttpConfig, HttpTransport};
pub use mock::MockTransport;

/// A single outbound `GET` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Fully-formed URL, query string included.
    pub url: Url,
    /// Bearer credential sent in the `Authorization` header.
    pub bearer: Option<String>,
}

impl Request {
    /// Build a request for `base` with the given query parameters.
    ///
    /// Parameters are form-encoded, so reserved characters such as `&` in
    /// user-supplied text cannot break the query string.
    pub fn get<K, V>(base: &str, params: &[(K, V)]) -> Result<Self, TransportError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs = params.iter().map(|(k, v)| (k.as_ref(), v.as_ref()));
        let url = Url::parse_with_params(base, pairs).map_err(|e| TransportError::InvalidUrl {
            url: base.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { url, bearer: None })
    }

    /// Attach a bearer credential.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// Something that can perform a `GET` and hand back the response body.
///
/// Implementations must return [`TransportError`] for any non-success
/// status; callers never see an error body as if it were data.
pub trait Transport: Send + Sync {
    fn get(&self, request: Request) -> impl Future<Output = Result<String, TransportError>> + Send;
}
