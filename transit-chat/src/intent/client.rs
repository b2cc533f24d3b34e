//! NLU service client.

use crate::error::{MalformedResponse, TransitError};
use crate::transport::{HttpTransport, Request, Transport};

use super::Intent;
use super::types::WitResponse;

/// Default base URL for the NLU service.
const DEFAULT_BASE_URL: &str = "https://api.wit.ai";

/// API version the intent model was trained against.
const DEFAULT_API_VERSION: &str = "20171011";

/// Configuration for the NLU client.
#[derive(Debug, Clone)]
pub struct WitConfig {
    /// Bearer token for the NLU app
    pub access_token: String,
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `v` query parameter
    pub api_version: String,
}

impl WitConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Classifies free text through the NLU service.
#[derive(Debug, Clone)]
pub struct WitClient<T = HttpTransport> {
    transport: T,
    config: WitConfig,
}

impl<T: Transport> WitClient<T> {
    pub fn new(config: WitConfig, transport: T) -> Self {
        Self { transport, config }
    }

    /// Fetch the raw NLU response for `text`.
    pub async fn message(&self, text: &str) -> Result<WitResponse, TransitError> {
        let url = format!("{}/message", self.config.base_url.trim_end_matches('/'));
        let request = Request::get(&url, &[("v", self.config.api_version.as_str()), ("q", text)])?
            .with_bearer(self.config.access_token.as_str());

        let body = self.transport.get(request).await?;

        serde_json::from_str(&body).map_err(|e| {
            MalformedResponse::Json {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Classify `text`. Anything the service does not label as a rail or
    /// bus query becomes [`Intent::Help`].
    pub async fn classify(&self, text: &str) -> Result<Intent, TransitError> {
        let response = self.message(text).await?;
        Ok(Intent::from_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::transport::{MockTransport, TransportError};

    fn client(mock: &MockTransport) -> WitClient<MockTransport> {
        WitClient::new(WitConfig::new("wit-token"), mock.clone())
    }

    #[test]
    fn config_defaults() {
        let config = WitConfig::new("wit-token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
    }

    #[tokio::test]
    async fn classify_sends_text_with_bearer() {
        let mock = MockTransport::new().respond(&[("v", "20171011")], fixtures::WIT_BUS_QUERY);
        let text = "when is the 57 from 40th St & Telegraph Av to Foothill Square";

        let intent = client(&mock).classify(text).await.unwrap();

        assert!(matches!(intent, Intent::BusQuery { .. }));
        let request = &mock.requests()[0];
        assert_eq!(request.url.path(), "/message");
        assert_eq!(request.bearer.as_deref(), Some("wit-token"));
        assert_eq!(request.param("q").as_deref(), Some(text));
        assert!(request.url.query().unwrap().contains("%26"));
    }

    #[tokio::test]
    async fn unlabelled_text_is_help() {
        let mock = MockTransport::new().respond(&[], fixtures::WIT_NO_INTENT);

        let intent = client(&mock).classify("hello there").await.unwrap();

        assert_eq!(intent, Intent::Help);
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let mock = MockTransport::new().fail(&[], 401);

        let err = client(&mock).classify("next bart").await.unwrap_err();

        assert!(matches!(err, TransitError::Transport(TransportError::Unauthorized)));
    }

    #[tokio::test]
    async fn malformed_body_propagates() {
        let mock = MockTransport::new().respond(&[], "not json");

        let err = client(&mock).classify("next bart").await.unwrap_err();

        assert!(matches!(err, TransitError::Malformed(MalformedResponse::Json { .. })));
    }
}
