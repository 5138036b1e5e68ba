//! Typed async Rust client for the smsgate messaging HTTP API.
//!
//! The crate is layered the same way throughout: a domain layer of validated
//! types, a transport layer for wire-format quirks, and a client layer with a
//! single retrying request engine behind per-resource facades. The
//! [`webhook`] module verifies and decodes inbound event notifications.
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use smsgate::{ListMessages, SendMessage, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsgate::SmsError> {
//!     let client = SmsClient::new("sk_live_...")?;
//!     let request = SendMessage::from_raw("+15551234567", "Your order has shipped")?;
//!     let message = client.messages().send(&request).await?;
//!     println!("{} is {}", message.id, message.status);
//!
//!     let mut delivered = 0;
//!     let stream = client.messages().each(ListMessages::default());
//!     futures::pin_mut!(stream);
//!     while let Some(message) = stream.try_next().await? {
//!         if message.status.is_final() {
//!             delivered += 1;
//!         }
//!     }
//!     println!("{delivered} messages in a final state");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;
pub mod webhook;

pub use client::{
    AccountResource, ErrorKind, MediaResource, MessagesResource, SmsClient, SmsClientBuilder,
    SmsError, TemplatesResource, VerifyResource, WebhooksResource,
};
pub use domain::{
    Account, ApiKey, ApiToken, BatchItem, BatchResult, CheckVerification, CreateApiKey,
    CreateTemplate, CreateWebhook, Credits, ListMessages, ListOptions, MediaFile, Message,
    MessageList, MessageStatus, MessageText, MessageType, Page, PageLimit, PhoneNumber,
    ScheduleMessage, ScheduledMessage, SendBatch, SendMessage, SendOptions, SendVerification,
    Template, UpdateWebhook, ValidationError, Verification, VerificationChannel,
    VerificationCheck, VerificationCode, Webhook, WebhookEvent, WebhookUrl,
};
pub use webhook::{WebhookError, generate_signature, parse_event, verify_signature};
