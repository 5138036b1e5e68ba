//! Client layer: configuration, the retrying request engine, and resource facades.

mod account;
mod error;
mod http;
mod media;
mod messages;
mod templates;
mod verify;
mod webhooks;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use self::error::{classify_response, parse_object};
use self::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::domain::{ApiToken, ValidationError};

pub use account::AccountResource;
pub use error::{ErrorKind, SmsError};
pub use media::MediaResource;
pub use messages::MessagesResource;
pub use templates::TemplatesResource;
pub use verify::VerifyResource;
pub use webhooks::WebhooksResource;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.smsgate.dev/api/v1";
/// Per-request timeout unless overridden with [`SmsClientBuilder::timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// TCP and TLS connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Retries after the first attempt, so at most four requests per call.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Delay before the first retry; doubles for each one after.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Environment variable holding the API key for [`SmsClientBuilder::from_env`].
pub const API_KEY_ENV: &str = "SMSGATE_API_KEY";
/// Optional environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SMSGATE_BASE_URL";

fn default_user_agent() -> String {
    format!("smsgate-rust/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the base URL, timeouts, retries, or user-agent.
pub struct SmsClientBuilder {
    api_key: ApiToken,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
    retry_base_delay: Duration,
    user_agent: String,
}

impl SmsClientBuilder {
    /// Create a builder with the default endpoint and retry settings.
    pub fn new(api_key: ApiToken) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            user_agent: default_user_agent(),
        }
    }

    /// Read the API key from `SMSGATE_API_KEY` and, if set, the base URL from
    /// `SMSGATE_BASE_URL`.
    pub fn from_env() -> Result<Self, SmsError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let mut builder = Self::new(ApiToken::new(api_key)?);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                builder = builder.base_url(base_url);
            }
        }
        Ok(builder)
    }

    /// Override the API root, e.g. `https://sandbox.example.com/api/v1`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overall per-request timeout, covering connect, send, and body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout for establishing the connection only.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Additional attempts after the first for retryable failures.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Delay before the first retry; each further retry doubles it.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let base_url = parse_base_url(&self.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|err| SmsError::Network(Box::new(err)))?;

        Ok(SmsClient {
            api_key: self.api_key,
            base_url,
            max_retries: self.max_retries,
            retry_base_delay: self.retry_base_delay,
            user_agent: self.user_agent,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(input: &str) -> Result<url::Url, SmsError> {
    let invalid = || ValidationError::InvalidUrl {
        input: input.to_owned(),
    };
    let url = url::Url::parse(input.trim()).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid().into());
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level messaging API client.
///
/// Every call validates its input locally, then goes through one request engine
/// that authenticates, retries transient failures with exponential backoff, and
/// classifies errors. Resource groups are reached through cheap borrowing
/// handles such as [`SmsClient::messages`].
pub struct SmsClient {
    api_key: ApiToken,
    base_url: url::Url,
    max_retries: u32,
    retry_base_delay: Duration,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl SmsClient {
    /// Create a client with default settings.
    ///
    /// Fails with [`SmsError::InvalidInput`] when `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SmsError> {
        Self::builder(ApiToken::new(api_key)?).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiToken) -> SmsClientBuilder {
        SmsClientBuilder::new(api_key)
    }

    /// API root every request path is appended to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Configured retry budget per call.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Send, schedule, batch, and list messages.
    pub fn messages(&self) -> MessagesResource<'_> {
        MessagesResource::new(self)
    }

    /// Account profile, credits, and API keys.
    pub fn account(&self) -> AccountResource<'_> {
        AccountResource::new(self)
    }

    /// One-time passcode verification.
    pub fn verify(&self) -> VerifyResource<'_> {
        VerifyResource::new(self)
    }

    /// Reusable message templates.
    pub fn templates(&self) -> TemplatesResource<'_> {
        TemplatesResource::new(self)
    }

    /// Webhook endpoint management.
    ///
    /// To authenticate deliveries, see [`crate::webhook`].
    pub fn webhooks(&self) -> WebhooksResource<'_> {
        WebhooksResource::new(self)
    }

    /// Uploaded media files.
    pub fn media(&self) -> MediaResource<'_> {
        MediaResource::new(self)
    }

    pub(crate) async fn get(
        &self,
        path: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<Map<String, Value>, SmsError> {
        self.request(Method::GET, path, query, None).await
    }

    pub(crate) async fn post(
        &self,
        path: &[&str],
        body: Value,
    ) -> Result<Map<String, Value>, SmsError> {
        self.request(Method::POST, path, Vec::new(), Some(body))
            .await
    }

    pub(crate) async fn patch(
        &self,
        path: &[&str],
        body: Value,
    ) -> Result<Map<String, Value>, SmsError> {
        self.request(Method::PATCH, path, Vec::new(), Some(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> Result<Map<String, Value>, SmsError> {
        self.request(Method::DELETE, path, Vec::new(), None).await
    }

    /// Perform one logical API call.
    ///
    /// Makes at most `max_retries + 1` attempts. Network failures and unclassified
    /// statuses are retried after `base_delay * 2^(n-1)`; every other error is
    /// returned on first occurrence. After the last attempt the last classified
    /// error is returned as-is. A 2xx body that is not a JSON object decodes to an
    /// empty object.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &[&str],
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Map<String, Value>, SmsError> {
        let request = HttpRequest {
            method,
            url: self.endpoint(path)?,
            headers: self.headers(),
            query,
            body,
        };

        let mut attempt = 0u32;
        loop {
            if attempt > 0 {
                tokio::time::sleep(self.backoff(attempt)).await;
            }
            debug!(
                method = %request.method,
                path = request.url.path(),
                attempt,
                "sending API request"
            );

            let error = match self.http.execute(request.clone()).await {
                Ok(response) if (200..=299).contains(&response.status) => {
                    return Ok(parse_object(&response.body));
                }
                Ok(response) => classify_response(&response),
                Err(err) => SmsError::Network(err),
            };

            if !error.is_retryable() || attempt >= self.max_retries {
                debug!(
                    kind = ?error.kind(),
                    status = ?error.status(),
                    attempt,
                    "API request failed"
                );
                return Err(error);
            }

            attempt += 1;
            warn!(
                path = request.url.path(),
                attempt,
                max_retries = self.max_retries,
                delay_ms = self.backoff(attempt).as_millis() as u64,
                "retrying after error: {error}"
            );
        }
    }

    fn endpoint(&self, path: &[&str]) -> Result<url::Url, SmsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ValidationError::InvalidUrl {
                input: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Authorization",
                format!("Bearer {}", self.api_key.as_str()),
            ),
            ("Accept", "application/json".to_owned()),
            ("Content-Type", "application/json".to_owned()),
            ("User-Agent", self.user_agent.clone()),
        ]
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_base_delay.saturating_mul(factor)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{ScriptedTransport, header, make_client};
    use super::*;

    #[tokio::test]
    async fn success_returns_decoded_object_and_sends_auth_headers() {
        let transport = ScriptedTransport::new().respond(200, r#"{"id":"msg_1"}"#);
        let client = make_client(transport.clone());

        let body = client.get(&["messages", "msg_1"], Vec::new()).await.unwrap();
        assert_eq!(body.get("id"), Some(&json!("msg_1")));

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://api.example.invalid/api/v1/messages/msg_1"
        );
        assert_eq!(header(&request, "authorization"), Some("Bearer test_key"));
        assert_eq!(header(&request, "accept"), Some("application/json"));
        assert_eq!(header(&request, "user-agent"), Some("smsgate-test"));
    }

    #[tokio::test]
    async fn empty_or_non_object_success_body_is_empty_map() {
        let transport = ScriptedTransport::new()
            .respond(204, "")
            .respond(200, "[1,2,3]");
        let client = make_client(transport);

        assert!(client.delete(&["templates", "t1"]).await.unwrap().is_empty());
        assert!(client.get(&["templates"], Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_exhausted() {
        let transport = ScriptedTransport::new()
            .respond(500, r#"{"message":"boom 1"}"#)
            .respond(500, r#"{"message":"boom 2"}"#)
            .respond(500, r#"{"message":"boom 3"}"#)
            .respond(500, r#"{"message":"boom 4"}"#);
        let client = make_client(transport.clone());

        let err = client.get(&["account"], Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error (500): boom 4");
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn retry_stops_at_first_success() {
        let transport = ScriptedTransport::new()
            .fail("connection refused")
            .respond(503, "")
            .respond(200, r#"{"ok":true}"#);
        let client = make_client(transport.clone());

        let body = client.get(&["account"], Vec::new()).await.unwrap();
        assert_eq!(body.get("ok"), Some(&json!(true)));
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn network_failures_surface_after_retries() {
        let transport = ScriptedTransport::new()
            .fail("dns failure")
            .fail("dns failure")
            .fail("dns failure")
            .fail("connection reset");
        let client = make_client(transport.clone());

        let err = client.get(&["account"], Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn authentication_error_is_not_retried() {
        let transport = ScriptedTransport::new()
            .respond(401, r#"{"error":"Invalid API key"}"#)
            .respond(200, "{}");
        let client = make_client(transport.clone());

        let err = client.get(&["account"], Vec::new()).await.unwrap_err();
        assert!(matches!(
            err,
            SmsError::Authentication { ref message, status: 401 } if message == "Invalid API key"
        ));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn non_retryable_statuses_fail_fast() {
        for status in [400, 402, 404, 422] {
            let transport = ScriptedTransport::new()
                .respond(status, "{}")
                .respond(200, "{}");
            let client = make_client(transport.clone());
            let err = client.get(&["account"], Vec::new()).await.unwrap_err();
            assert_eq!(err.status(), Some(status));
            assert_eq!(transport.requests().len(), 1, "status {status}");
        }
    }

    #[tokio::test]
    async fn rate_limit_exposes_retry_after() {
        let transport = ScriptedTransport::new().respond_rate_limited("45");
        let client = make_client(transport.clone());

        let err = client.get(&["account"], Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.retry_after(), Some(45));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn zero_max_retries_makes_a_single_attempt() {
        let transport = ScriptedTransport::new()
            .respond(500, "{}")
            .respond(200, "{}");
        let mut client = make_client(transport.clone());
        client.max_retries = 0;

        assert!(client.get(&["account"], Vec::new()).await.is_err());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn path_segments_are_percent_encoded() {
        let transport = ScriptedTransport::new().respond(200, "{}");
        let client = make_client(transport.clone());

        client
            .get(&["messages", "a/b c"], vec![("limit".to_owned(), "5".to_owned())])
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.url.path(), "/api/v1/messages/a%2Fb%20c");
        assert_eq!(request.query, vec![("limit".to_owned(), "5".to_owned())]);
    }

    #[test]
    fn backoff_doubles_from_base_delay() {
        let mut client = make_client(ScriptedTransport::new());
        client.retry_base_delay = Duration::from_secs(1);
        assert_eq!(client.backoff(1), Duration::from_secs(1));
        assert_eq!(client.backoff(2), Duration::from_secs(2));
        assert_eq!(client.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn builder_overrides_are_applied() {
        let client = SmsClient::builder(ApiToken::new("key").unwrap())
            .base_url("https://sandbox.example.invalid/api/v1/")
            .max_retries(5)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://sandbox.example.invalid/api/v1/");
        assert_eq!(client.max_retries(), 5);
        assert_eq!(
            client.endpoint(&["account"]).unwrap().as_str(),
            "https://sandbox.example.invalid/api/v1/account"
        );
    }

    #[test]
    fn construction_rejects_blank_key_and_bad_base_url() {
        assert!(matches!(
            SmsClient::new("  "),
            Err(SmsError::InvalidInput(ValidationError::Empty { .. }))
        ));

        let err = SmsClient::builder(ApiToken::new("key").unwrap())
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SmsError::InvalidInput(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn default_client_uses_default_settings() {
        let client = SmsClient::new("key").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.max_retries(), DEFAULT_MAX_RETRIES);
    }
}
