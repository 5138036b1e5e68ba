use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery state reported for a message.
///
/// Unknown values are preserved in [`MessageStatus::Other`].
pub enum MessageStatus {
    Queued,
    Scheduled,
    Sending,
    Sent,
    Delivered,
    Failed,
    Cancelled,
    Other(String),
}

impl MessageStatus {
    /// Map the API's status string. Accepts both `cancelled` and `canceled`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "queued" => Self::Queued,
            "scheduled" => Self::Scheduled,
            "sending" => Self::Sending,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "failed" => Self::Failed,
            "cancelled" | "canceled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Scheduled => "scheduled",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(other) => other,
        }
    }

    /// Whether the message reached a state it will not leave.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed | Self::Cancelled)
    }
}

impl Serialize for MessageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sent or queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub to: String,
    pub from: Option<String>,
    pub text: String,
    pub status: MessageStatus,
    pub error: Option<String>,
    pub segments: u32,
    pub credits_used: u32,
    pub is_sandbox: bool,
    pub created_at: Option<String>,
    pub delivered_at: Option<String>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Page returned by [`MessagesResource::list`](crate::MessagesResource::list).
pub type MessageList = Page<Message>;

/// Message waiting for its `scheduled_at` time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledMessage {
    pub id: String,
    pub to: String,
    pub from: Option<String>,
    pub text: String,
    pub status: MessageStatus,
    pub scheduled_at: String,
    pub credits_reserved: u32,
    pub error: Option<String>,
    pub created_at: Option<String>,
}

pub type ScheduledMessageList = Page<ScheduledMessage>;

/// Outcome of one entry in a batch send. `id` is absent when the entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchMessageResult {
    pub id: Option<String>,
    pub to: String,
    pub status: MessageStatus,
    pub error: Option<String>,
}

/// Aggregate state of a batch send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub status: String,
    pub total: u32,
    pub queued: u32,
    pub sent: u32,
    pub failed: u32,
    pub credits_used: u32,
    pub messages: Vec<BatchMessageResult>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
}

/// Account owning the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Option<String>,
}

/// Credit balance. `available_balance` is what can be spent now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Credits {
    pub balance: i64,
    pub reserved_balance: i64,
    pub available_balance: i64,
}

impl Credits {
    /// Whether any credits are available to spend.
    pub fn has_credits(&self) -> bool {
        self.available_balance > 0
    }
}

/// One entry in the credit ledger: a purchase, a charge, or a refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditTransaction {
    pub id: String,
    pub transaction_type: String,
    pub amount: i64,
    pub balance_after: i64,
    pub description: Option<String>,
    pub reference_id: Option<String>,
    pub created_at: Option<String>,
}

/// API key metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub prefix: Option<String>,
    pub last_four: Option<String>,
    /// Full secret, only present in the response to key creation.
    pub key: Option<String>,
    pub created_at: Option<String>,
    pub last_used_at: Option<String>,
    pub expires_at: Option<String>,
    pub is_revoked: bool,
}

/// Uploaded media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    pub id: String,
    pub url: String,
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub size_bytes: u64,
    pub created_at: Option<String>,
}

/// One-time passcode verification session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub id: String,
    pub status: String,
    pub phone: String,
    pub channel: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub expires_at: Option<String>,
    pub verified_at: Option<String>,
    pub created_at: Option<String>,
}

/// Result of submitting a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCheck {
    pub id: String,
    pub status: String,
    pub valid: bool,
    pub remaining_attempts: Option<u32>,
}

/// Reusable message body. `variables` lists the placeholders the server found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub text: String,
    pub variables: Vec<String>,
    pub created_at: Option<String>,
}

/// Registered webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub events: Vec<String>,
    pub is_active: bool,
    pub description: Option<String>,
    /// Signing secret, only present in the response to webhook creation.
    pub secret: Option<String>,
    pub created_at: Option<String>,
}
