use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::TransportError;
use super::fields::Fields;
use super::scalar::TransportText;
use crate::domain::{
    CreateWebhook, DEFAULT_API_VERSION, MessageStatus, UpdateWebhook, Webhook, WebhookEvent,
    WebhookMessageData,
};

/// Signed event envelope. `id`, `type`, `data` and `created_at` are required
/// and must not be `null`; `data` must be an object.
#[derive(Debug, Deserialize)]
struct TransportEvent {
    id: TransportText,
    #[serde(rename = "type")]
    event_type: TransportText,
    data: Map<String, Value>,
    created_at: TransportText,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default, rename = "apiVersion")]
    api_version_camel: Option<String>,
}

pub fn encode_create_webhook_body(request: &CreateWebhook) -> Value {
    let mut body = Map::new();
    body.insert("url".to_owned(), json!(request.url().as_str()));
    body.insert("events".to_owned(), json!(request.events()));
    if let Some(description) = request.description.as_deref() {
        body.insert("description".to_owned(), json!(description));
    }
    Value::Object(body)
}

pub fn encode_update_webhook_body(request: &UpdateWebhook) -> Value {
    let mut body = Map::new();
    if let Some(url) = request.url.as_ref() {
        body.insert("url".to_owned(), json!(url.as_str()));
    }
    if let Some(events) = request.events.as_deref() {
        body.insert("events".to_owned(), json!(events));
    }
    if let Some(is_active) = request.is_active {
        body.insert("isActive".to_owned(), json!(is_active));
    }
    if let Some(description) = request.description.as_deref() {
        body.insert("description".to_owned(), json!(description));
    }
    Value::Object(body)
}

pub fn decode_webhook(fields: Fields<'_>) -> Webhook {
    Webhook {
        id: fields.string(&["id"]),
        url: fields.string(&["url"]),
        events: fields.strings(&["events"]),
        is_active: fields.bool_or(&["is_active", "isActive"], true),
        description: fields.opt_string(&["description"]),
        secret: fields.opt_string(&["secret"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_webhooks(object: &Map<String, Value>) -> Result<Vec<Webhook>, TransportError> {
    super::decode_list(object, &["data", "webhooks"], decode_webhook)
}

/// Decode a signed event payload.
pub fn decode_event(object: &Map<String, Value>) -> Result<WebhookEvent, TransportError> {
    let envelope = Value::Object(object.clone());
    let event = TransportEvent::deserialize(&envelope)?;

    Ok(WebhookEvent {
        id: event.id.into_string(),
        event_type: event.event_type.into_string(),
        data: decode_event_data(Fields::new(&event.data)),
        created_at: event.created_at.into_string(),
        api_version: event
            .api_version
            .or(event.api_version_camel)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
    })
}

fn decode_event_data(fields: Fields<'_>) -> WebhookMessageData {
    WebhookMessageData {
        message_id: fields.string(&["message_id", "messageId", "id"]),
        status: MessageStatus::from_wire(&fields.string(&["status"])),
        to: fields.string(&["to"]),
        from: fields.opt_string(&["from"]),
        error: fields.opt_string(&["error"]),
        error_code: fields.opt_string(&["error_code", "errorCode"]),
        delivered_at: fields.opt_string(&["delivered_at", "deliveredAt"]),
        failed_at: fields.opt_string(&["failed_at", "failedAt"]),
        segments: fields.u32_or(&["segments"], 1),
        credits_used: fields.u32_or(&["credits_used", "creditsUsed"], 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WebhookUrl;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn decode_event_maps_message_payload() {
        let body = object(json!({
            "id": "evt_1",
            "type": "message.failed",
            "created_at": "2024-06-01T12:00:00Z",
            "data": {
                "messageId": "msg_1",
                "status": "failed",
                "to": "+15551234567",
                "error": "unreachable",
                "errorCode": 30003
            }
        }));
        let event = decode_event(&body).unwrap();
        assert_eq!(event.event_type, "message.failed");
        assert_eq!(event.api_version, DEFAULT_API_VERSION);
        assert_eq!(event.data.message_id, "msg_1");
        assert_eq!(event.data.status, MessageStatus::Failed);
        assert_eq!(event.data.error_code.as_deref(), Some("30003"));
        assert_eq!(event.data.segments, 1);
        assert_eq!(event.data.credits_used, 0);
    }

    #[test]
    fn decode_event_reports_missing_field() {
        let body = object(json!({ "id": "evt_1", "type": "message.sent", "data": {} }));
        let err = decode_event(&body).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
        assert!(err.to_string().contains("created_at"), "{err}");
    }

    #[test]
    fn decode_event_rejects_null_required_field() {
        let body = object(json!({
            "id": null,
            "type": "message.sent",
            "data": {},
            "created_at": "2024-06-01T12:00:00Z"
        }));
        assert!(matches!(
            decode_event(&body),
            Err(TransportError::Malformed(_))
        ));
    }

    #[test]
    fn decode_event_accepts_numeric_id_and_camel_api_version() {
        let body = object(json!({
            "id": 42,
            "type": "message.sent",
            "data": {},
            "created_at": "2024-06-01T12:00:00Z",
            "apiVersion": "2025-02-01"
        }));
        let event = decode_event(&body).unwrap();
        assert_eq!(event.id, "42");
        assert_eq!(event.api_version, "2025-02-01");
    }

    #[test]
    fn decode_event_requires_object_data() {
        let body = object(json!({
            "id": "evt_1",
            "type": "message.sent",
            "data": "nope",
            "created_at": "2024-06-01T12:00:00Z"
        }));
        assert!(matches!(
            decode_event(&body),
            Err(TransportError::Malformed(_))
        ));
    }

    #[test]
    fn update_body_only_contains_changes() {
        let request = UpdateWebhook::new().is_active(false);
        assert_eq!(encode_update_webhook_body(&request), json!({ "isActive": false }));

        let request = UpdateWebhook::new()
            .url(WebhookUrl::new("https://example.com/new").unwrap())
            .events(vec!["message.delivered".to_owned()])
            .unwrap();
        assert_eq!(
            encode_update_webhook_body(&request),
            json!({ "url": "https://example.com/new", "events": ["message.delivered"] })
        );

        let request = UpdateWebhook::new().description("primary endpoint");
        assert_eq!(
            encode_update_webhook_body(&request),
            json!({ "description": "primary endpoint" })
        );
        assert!(encode_update_webhook_body(&UpdateWebhook::new())
            .as_object()
            .unwrap()
            .is_empty());
    }
}
