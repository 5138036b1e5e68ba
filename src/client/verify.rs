use serde_json::{Map, Value};

use super::{SmsClient, SmsError};
use crate::domain::{
    CheckVerification, ListOptions, SendVerification, Verification, VerificationCheck, require_id,
};
use crate::transport::{self, Fields};

#[derive(Clone, Copy)]
/// `/verify` endpoints: one-time passcode delivery and checking.
pub struct VerifyResource<'a> {
    client: &'a SmsClient,
}

impl<'a> VerifyResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    /// Deliver a fresh code to `request.to()`.
    pub async fn send(&self, request: &SendVerification) -> Result<Verification, SmsError> {
        let body = self
            .client
            .post(&["verify"], transport::encode_send_verification_body(request))
            .await?;
        Ok(transport::decode_verification(Fields::new(&body)))
    }

    /// Check a code the end user typed in. A wrong code is a successful call
    /// with [`VerificationCheck::valid`] set to `false`.
    pub async fn check(
        &self,
        id: &str,
        request: &CheckVerification,
    ) -> Result<VerificationCheck, SmsError> {
        let id = require_id("Verification", id)?;
        let body = self
            .client
            .post(
                &["verify", id, "check"],
                transport::encode_check_verification_body(request),
            )
            .await?;
        Ok(transport::decode_verification_check(Fields::new(&body)))
    }

    /// Fetch a verification with its attempt count and expiry.
    pub async fn get(&self, id: &str) -> Result<Verification, SmsError> {
        let id = require_id("Verification", id)?;
        let body = self.client.get(&["verify", id], Vec::new()).await?;
        Ok(transport::decode_verification(Fields::new(&body)))
    }

    /// Recent verifications as the raw server listing.
    pub async fn list(&self, options: &ListOptions) -> Result<Map<String, Value>, SmsError> {
        self.client
            .get(&["verify"], transport::encode_list_query(options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{ScriptedTransport, make_client};
    use super::*;
    use crate::domain::{PhoneNumber, VerificationCode};

    #[tokio::test]
    async fn send_then_check_code() {
        let transport = ScriptedTransport::new()
            .respond(
                200,
                r#"{"id":"ver_1","status":"pending","phone":"+15551234567","expiresAt":"2024-01-01T00:10:00Z"}"#,
            )
            .respond(200, r#"{"id":"ver_1","status":"verified"}"#);
        let client = make_client(transport.clone());

        let request = SendVerification::new(PhoneNumber::new("+15551234567").unwrap());
        let verification = client.verify().send(&request).await.unwrap();
        assert_eq!(verification.status, "pending");
        assert_eq!(verification.channel, "sms");
        assert_eq!(verification.max_attempts, 3);

        let check = CheckVerification {
            code: VerificationCode::new("123456").unwrap(),
        };
        let result = client.verify().check(&verification.id, &check).await.unwrap();
        assert!(result.valid);

        let sent = transport.last_request();
        assert_eq!(sent.url.path(), "/api/v1/verify/ver_1/check");
        assert_eq!(sent.body, Some(json!({ "code": "123456" })));
    }

    #[tokio::test]
    async fn check_requires_verification_id() {
        let transport = ScriptedTransport::new();
        let client = make_client(transport.clone());
        let check = CheckVerification {
            code: VerificationCode::new("1234").unwrap(),
        };

        let err = client.verify().check("", &check).await.unwrap_err();
        assert_eq!(err.to_string(), "validation failed: Verification ID is required");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn list_returns_raw_listing() {
        let transport =
            ScriptedTransport::new().respond(200, r#"{"data":[{"id":"ver_1"}],"total":1}"#);
        let client = make_client(transport);

        let listing = client.verify().list(&ListOptions::default()).await.unwrap();
        assert_eq!(listing.get("total"), Some(&json!(1)));
    }
}
