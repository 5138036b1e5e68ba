//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;
mod webhook;

pub use request::{
    BatchEntry, BatchItem, CheckVerification, CreateApiKey, CreateTemplate, CreateWebhook,
    ListMessages, ListOptions, ScheduleMessage, SendBatch, SendMessage, SendOptions,
    SendVerification, UpdateWebhook, VerificationChannel,
};
pub use response::{
    Account, ApiKey, BatchMessageResult, BatchResult, CreditTransaction, Credits, MediaFile,
    Message, MessageList, MessageStatus, Page, ScheduledMessage, ScheduledMessageList, Template,
    Verification, VerificationCheck, Webhook,
};
pub(crate) use validation::require_id;
pub use validation::ValidationError;
pub use value::{
    ApiToken, MessageText, MessageType, PageLimit, PhoneNumber, VerificationCode, WebhookUrl,
};
pub use webhook::{DEFAULT_API_VERSION, WebhookEvent, WebhookMessageData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_from_raw_validates_both_fields() {
        assert!(SendMessage::from_raw("+15551234567", "hello").is_ok());
        assert!(matches!(
            SendMessage::from_raw("1234567890", "hello"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
        assert!(matches!(
            SendMessage::from_raw("+15551234567", ""),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn send_message_carries_message_type() {
        let request = SendMessage::from_raw("+15551234567", "hello")
            .unwrap()
            .with_message_type(MessageType::Transactional);
        assert_eq!(
            request.options().message_type,
            Some(MessageType::Transactional)
        );
    }
}
