use serde::Serialize;

use crate::domain::response::MessageStatus;

/// `api_version` assumed when an event omits it.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Verified inbound webhook notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookMessageData,
    pub created_at: String,
    pub api_version: String,
}

/// Delivery details carried by `message.*` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookMessageData {
    pub message_id: String,
    pub status: MessageStatus,
    pub to: String,
    pub from: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub delivered_at: Option<String>,
    pub failed_at: Option<String>,
    pub segments: u32,
    pub credits_used: u32,
}
