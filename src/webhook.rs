//! Inbound webhook authentication.
//!
//! Each delivery carries an HMAC-SHA256 of the raw request body, keyed with the
//! webhook's signing secret, in the [`SIGNATURE_HEADER`] header as
//! `sha256=<64 lowercase hex chars>`. Verify against the exact bytes received;
//! re-serialized JSON will not match.
//!
//! ```rust
//! use smsgate::webhook;
//!
//! let payload = r#"{"id":"evt_1","type":"message.delivered","created_at":"2024-01-01T00:00:00Z","data":{"message_id":"msg_1","status":"delivered","to":"+15551234567"}}"#;
//! let signature = webhook::generate_signature(payload, "whsec_test");
//! let event = webhook::parse_event(payload, &signature, "whsec_test").unwrap();
//! assert_eq!(event.data.message_id, "msg_1");
//! ```

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;

use crate::domain::WebhookEvent;
use crate::transport;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the signature.
pub const SIGNATURE_HEADER: &str = "X-Smsgate-Signature";

const SIGNATURE_PREFIX: &str = "sha256=";

const INVALID_SIGNATURE: &str = "Invalid webhook signature";
const INVALID_STRUCTURE: &str = "Invalid event structure";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The signature did not match, or the signed payload is not a well-formed event.
    #[error("{message}")]
    Signature { message: &'static str },

    /// The signed payload is not valid JSON.
    #[error("invalid webhook payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The secret could not be used as an HMAC key.
    #[error("invalid webhook secret")]
    InvalidSecret,
}

/// Compute the header value the server would send for `payload`.
///
/// Returns an empty string if the secret is unusable as a key, which never
/// verifies.
pub fn generate_signature(payload: impl AsRef<[u8]>, secret: &str) -> String {
    sign(payload.as_ref(), secret).unwrap_or_default()
}

fn sign(payload: &[u8], secret: &str) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSecret)?;
    mac.update(payload);
    Ok(format!(
        "{SIGNATURE_PREFIX}{}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Check `signature` against `payload`. Returns `false` for any empty input.
pub fn verify_signature(payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
    let payload = payload.as_ref();
    if payload.is_empty() || signature.is_empty() || secret.is_empty() {
        return false;
    }
    match sign(payload, secret) {
        Ok(expected) => timing_safe_eq(expected.as_bytes(), signature.as_bytes()),
        Err(err) => {
            debug!(error = %err, "cannot compute webhook signature");
            false
        }
    }
}

/// Verify `signature`, then decode `payload` into a [`WebhookEvent`].
///
/// `id`, `type`, `data` and `created_at` are required; `api_version` defaults to
/// [`DEFAULT_API_VERSION`](crate::domain::DEFAULT_API_VERSION).
pub fn parse_event(
    payload: impl AsRef<[u8]>,
    signature: &str,
    secret: &str,
) -> Result<WebhookEvent, WebhookError> {
    let payload = payload.as_ref();
    if !verify_signature(payload, signature, secret) {
        debug!("rejecting webhook with mismatched signature");
        return Err(WebhookError::Signature {
            message: INVALID_SIGNATURE,
        });
    }

    let value: Value = serde_json::from_slice(payload)?;
    let invalid_structure = WebhookError::Signature {
        message: INVALID_STRUCTURE,
    };
    let Some(object) = value.as_object() else {
        return Err(invalid_structure);
    };
    transport::decode_event(object).map_err(|err| {
        debug!(error = %err, "rejecting malformed webhook event");
        invalid_structure
    })
}

/// Compare without short-circuiting on the first differing byte.
fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
