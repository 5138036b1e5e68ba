use serde::Deserialize;
use serde_json::{Map, Value};

use super::http::{HttpResponse, TransportFailure};
use crate::domain::ValidationError;
use crate::transport::TransportError;

/// Message used when an error body carries neither `message` nor `error`.
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse classification of an [`SmsError`].
pub enum ErrorKind {
    Authentication,
    RateLimit,
    InsufficientCredits,
    Validation,
    NotFound,
    Network,
    Generic,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`](crate::SmsClient).
///
/// HTTP failures are classified once per attempt; the retry loop only repeats
/// [`SmsError::Network`] and [`SmsError::Api`].
pub enum SmsError {
    /// HTTP 401: the API key is missing, revoked, or invalid.
    #[error("authentication failed: {message}")]
    Authentication { message: String, status: u16 },

    /// HTTP 402: the account balance cannot cover the request.
    #[error("insufficient credits: {message}")]
    InsufficientCredits { message: String, status: u16 },

    /// HTTP 404.
    #[error("not found: {message}")]
    NotFound { message: String, status: u16 },

    /// HTTP 429. `retry_after` is the server's `Retry-After` in seconds (0 if absent).
    #[error("rate limit exceeded: {message} (retry after {retry_after}s)")]
    RateLimit {
        message: String,
        status: u16,
        retry_after: u64,
    },

    /// HTTP 400/422: the server rejected the request parameters.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        status: u16,
        details: Option<Value>,
    },

    /// Local input check rejected a value; nothing was sent.
    #[error("validation failed: {0}")]
    InvalidInput(#[from] ValidationError),

    /// DNS, TCP, TLS, or timeout failure below the HTTP layer.
    #[error("network error: {0}")]
    Network(#[source] TransportFailure),

    /// Any other non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { message: String, status: u16 },

    /// Successful response whose body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SmsError {
    /// Coarse category, stable across variants that share a meaning.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::InsufficientCredits { .. } => ErrorKind::InsufficientCredits,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Validation { .. } | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Network(_) => ErrorKind::Network,
            Self::Api { .. } | Self::Parse(_) => ErrorKind::Generic,
        }
    }

    /// HTTP status that produced this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::InsufficientCredits { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Validation { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::InvalidInput(_) | Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// Seconds the server asked to wait, for [`SmsError::RateLimit`] only.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Field-level details attached to a server-side validation failure.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Whether the request engine tries again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }

    /// `true` when the failure never left the client.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<TransportError> for SmsError {
    fn from(err: TransportError) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// Error envelope returned with non-2xx statuses. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    details: Option<Value>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn message(&self) -> String {
        [&self.message, &self.error]
            .into_iter()
            .find_map(|value| value.as_ref().and_then(Value::as_str))
            .unwrap_or(UNKNOWN_ERROR)
            .to_owned()
    }
}

/// Map a non-2xx response onto the error taxonomy.
pub(crate) fn classify_response(response: &HttpResponse) -> SmsError {
    let body = ErrorBody::parse(&response.body);
    let message = body.message();
    let status = response.status;

    match status {
        401 => SmsError::Authentication { message, status },
        402 => SmsError::InsufficientCredits { message, status },
        404 => SmsError::NotFound { message, status },
        429 => SmsError::RateLimit {
            message,
            status,
            retry_after: response
                .retry_after
                .as_deref()
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0),
        },
        400 | 422 => SmsError::Validation {
            message,
            status,
            details: body.details,
        },
        _ => SmsError::Api { message, status },
    }
}

/// Parse a body as a JSON object; anything else decodes to an empty object.
pub(crate) fn parse_object(body: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            retry_after: None,
            body: body.to_owned(),
        }
    }

    #[test]
    fn classifies_known_statuses() {
        let cases = [
            (401, ErrorKind::Authentication),
            (402, ErrorKind::InsufficientCredits),
            (404, ErrorKind::NotFound),
            (429, ErrorKind::RateLimit),
            (400, ErrorKind::Validation),
            (422, ErrorKind::Validation),
            (500, ErrorKind::Generic),
            (503, ErrorKind::Generic),
            (403, ErrorKind::Generic),
        ];
        for (status, kind) in cases {
            let err = classify_response(&response(status, "{}"));
            assert_eq!(err.kind(), kind, "status {status}");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn message_prefers_message_then_error_then_default() {
        let err = classify_response(&response(
            401,
            r#"{"message":"bad key","error":"unauthorized"}"#,
        ));
        assert_eq!(err.to_string(), "authentication failed: bad key");

        let err = classify_response(&response(404, r#"{"error":"no such message"}"#));
        assert_eq!(err.to_string(), "not found: no such message");

        let err = classify_response(&response(409, r#"{"message":42,"error":"conflict"}"#));
        assert_eq!(err.to_string(), "API error (409): conflict");

        let err = classify_response(&response(500, "<html>gateway</html>"));
        assert_eq!(err.to_string(), "API error (500): Unknown error");
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let mut resp = response(429, r#"{"message":"slow down"}"#);
        resp.retry_after = Some("45".to_owned());
        assert_eq!(classify_response(&resp).retry_after(), Some(45));

        resp.retry_after = Some("Wed, 21 Oct 2015 07:28:00 GMT".to_owned());
        assert_eq!(classify_response(&resp).retry_after(), Some(0));

        resp.retry_after = None;
        assert_eq!(classify_response(&resp).retry_after(), Some(0));
    }

    #[test]
    fn validation_carries_details() {
        let err = classify_response(&response(
            422,
            r#"{"message":"invalid","details":{"to":["must be E.164"]}}"#,
        ));
        assert_eq!(err.details(), Some(&json!({ "to": ["must be E.164"] })));

        let err = classify_response(&response(400, r#"{"message":"invalid"}"#));
        assert_eq!(err.details(), None);

        let err = classify_response(&response(400, r#"{"message":"invalid","details":null}"#));
        assert_eq!(err.details(), None);
    }

    #[test]
    fn retry_policy_by_kind() {
        assert!(classify_response(&response(500, "")).is_retryable());
        assert!(!classify_response(&response(401, "")).is_retryable());
        assert!(!classify_response(&response(429, "")).is_retryable());
        let local = SmsError::from(ValidationError::MissingId { entity: "Message" });
        assert!(!local.is_retryable());
        assert!(local.is_local());
        assert_eq!(local.kind(), ErrorKind::Validation);
        assert_eq!(local.status(), None);
    }

    #[test]
    fn parse_object_tolerates_non_objects() {
        assert!(parse_object("").is_empty());
        assert!(parse_object("[1,2]").is_empty());
        assert!(parse_object("not json").is_empty());
        assert_eq!(parse_object(r#"{"a":1}"#).len(), 1);
    }
}
