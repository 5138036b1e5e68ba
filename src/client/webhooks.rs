use serde_json::{Map, Value};

use super::{SmsClient, SmsError};
use crate::domain::{CreateWebhook, UpdateWebhook, Webhook, require_id};
use crate::transport::{self, Fields};

#[derive(Clone, Copy)]
/// `/webhooks` endpoints: manage delivery-status callbacks.
///
/// Verifying inbound deliveries does not need a client; see [`crate::webhook`].
pub struct WebhooksResource<'a> {
    client: &'a SmsClient,
}

impl<'a> WebhooksResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Webhook>, SmsError> {
        let body = self.client.get(&["webhooks"], Vec::new()).await?;
        Ok(transport::decode_webhooks(&body)?)
    }

    pub async fn get(&self, id: &str) -> Result<Webhook, SmsError> {
        let id = require_id("Webhook", id)?;
        let body = self.client.get(&["webhooks", id], Vec::new()).await?;
        Ok(transport::decode_webhook(Fields::new(&body)))
    }

    /// Register an endpoint. The signing secret is only returned here.
    pub async fn create(&self, request: &CreateWebhook) -> Result<Webhook, SmsError> {
        let body = self
            .client
            .post(&["webhooks"], transport::encode_create_webhook_body(request))
            .await?;
        Ok(transport::decode_webhook(Fields::new(&body)))
    }

    /// Apply a partial update; unset fields keep their current value.
    pub async fn update(&self, id: &str, request: &UpdateWebhook) -> Result<Webhook, SmsError> {
        let id = require_id("Webhook", id)?;
        let body = self
            .client
            .patch(
                &["webhooks", id],
                transport::encode_update_webhook_body(request),
            )
            .await?;
        Ok(transport::decode_webhook(Fields::new(&body)))
    }

    /// Remove the endpoint.
    pub async fn delete(&self, id: &str) -> Result<(), SmsError> {
        let id = require_id("Webhook", id)?;
        self.client.delete(&["webhooks", id]).await?;
        Ok(())
    }

    /// Ask the server to send a signed test event to the endpoint.
    pub async fn test(&self, id: &str) -> Result<Map<String, Value>, SmsError> {
        let id = require_id("Webhook", id)?;
        self.client
            .post(&["webhooks", id, "test"], Value::Object(Map::new()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::super::testing::{ScriptedTransport, make_client};
    use super::*;
    use crate::domain::WebhookUrl;

    #[tokio::test]
    async fn create_returns_secret_once() {
        let transport = ScriptedTransport::new().respond(
            201,
            r#"{"id":"wh_1","url":"https://example.com/hooks","events":["message.delivered"],"secret":"whsec_abc"}"#,
        );
        let client = make_client(transport.clone());

        let request = CreateWebhook::new(
            WebhookUrl::new("https://example.com/hooks").unwrap(),
            vec!["message.delivered".to_owned()],
        )
        .unwrap();
        let webhook = client.webhooks().create(&request).await.unwrap();
        assert_eq!(webhook.secret.as_deref(), Some("whsec_abc"));
        assert!(webhook.is_active);
        assert_eq!(
            transport.last_request().body,
            Some(json!({ "url": "https://example.com/hooks", "events": ["message.delivered"] }))
        );
    }

    #[tokio::test]
    async fn update_uses_patch() {
        let transport =
            ScriptedTransport::new().respond(200, r#"{"id":"wh_1","isActive":false}"#);
        let client = make_client(transport.clone());

        let request = UpdateWebhook::new().is_active(false);
        let webhook = client.webhooks().update("wh_1", &request).await.unwrap();
        assert!(!webhook.is_active);

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::PATCH);
        assert_eq!(sent.url.path(), "/api/v1/webhooks/wh_1");
    }

    #[tokio::test]
    async fn test_delivery_posts_to_test_endpoint() {
        let transport = ScriptedTransport::new().respond(200, r#"{"success":true,"statusCode":200}"#);
        let client = make_client(transport.clone());

        let result = client.webhooks().test("wh_1").await.unwrap();
        assert_eq!(result.get("success"), Some(&json!(true)));
        assert_eq!(transport.last_request().url.path(), "/api/v1/webhooks/wh_1/test");
    }
}
