use crate::domain::validation::ValidationError;
use crate::domain::value::{
    MessageText, MessageType, PageLimit, PhoneNumber, VerificationCode, WebhookUrl, non_blank,
};

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub message_type: Option<MessageType>,
    /// Sender id or number; must be enabled on the account.
    pub from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    to: PhoneNumber,
    text: MessageText,
    options: SendOptions,
}

impl SendMessage {
    /// Build a send request from already validated parts.
    pub fn new(to: PhoneNumber, text: MessageText, options: SendOptions) -> Self {
        Self { to, text, options }
    }

    /// Validate raw recipient and text in one go.
    pub fn from_raw(
        to: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(
            PhoneNumber::new(to)?,
            MessageText::new(text)?,
            SendOptions::default(),
        ))
    }

    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.options.message_type = Some(message_type);
        self
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleMessage {
    message: SendMessage,
    scheduled_at: String,
}

impl ScheduleMessage {
    /// `scheduled_at` is an ISO 8601 timestamp; the server rejects past times.
    pub fn new(message: SendMessage, scheduled_at: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            message,
            scheduled_at: non_blank("scheduled_at", scheduled_at)?,
        })
    }

    pub fn message(&self) -> &SendMessage {
        &self.message
    }

    pub fn scheduled_at(&self) -> &str {
        &self.scheduled_at
    }
}

/// One unvalidated entry of a batch send. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchItem {
    pub to: Option<String>,
    pub text: Option<String>,
}

impl BatchItem {
    /// Entry with both fields set. They are validated by [`SendBatch::new`].
    pub fn new(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: Some(to.into()),
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub to: PhoneNumber,
    pub text: MessageText,
}

#[derive(Debug, Clone)]
pub struct SendBatch {
    entries: Vec<BatchEntry>,
    options: SendOptions,
}

impl SendBatch {
    /// Validate every entry; the first failure reports its index.
    pub fn new(
        items: impl IntoIterator<Item = BatchItem>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| validate_batch_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        if entries.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        Ok(Self { entries, options })
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

fn validate_batch_item(index: usize, item: BatchItem) -> Result<BatchEntry, ValidationError> {
    let to = item
        .to
        .filter(|to| !to.is_empty())
        .ok_or(ValidationError::BatchEntryMissingField { index, field: "to" })?;
    let text = item
        .text
        .filter(|text| !text.is_empty())
        .ok_or(ValidationError::BatchEntryMissingField {
            index,
            field: "text",
        })?;

    let wrap = |reason| ValidationError::BatchEntryInvalid {
        index,
        reason: Box::new(reason),
    };
    Ok(BatchEntry {
        to: PhoneNumber::new(to).map_err(wrap)?,
        text: MessageText::new(text).map_err(wrap)?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: PageLimit,
    pub offset: u32,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListMessages {
    pub limit: PageLimit,
    pub offset: u32,
    pub status: Option<String>,
    pub to: Option<PhoneNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationChannel {
    #[default]
    Sms,
    Voice,
}

impl VerificationChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Voice => "voice",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendVerification {
    to: PhoneNumber,
    pub channel: VerificationChannel,
    code_length: Option<u32>,
    pub app_name: Option<String>,
    pub template_id: Option<String>,
}

impl SendVerification {
    pub const MIN_CODE_LENGTH: u32 = 4;
    pub const MAX_CODE_LENGTH: u32 = 10;

    /// Verification over SMS with the server's default code length.
    pub fn new(to: PhoneNumber) -> Self {
        Self {
            to,
            channel: VerificationChannel::default(),
            code_length: None,
            app_name: None,
            template_id: None,
        }
    }

    pub fn code_length(mut self, length: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_CODE_LENGTH..=Self::MAX_CODE_LENGTH).contains(&length) {
            return Err(ValidationError::OutOfRange {
                field: "code_length",
                min: Self::MIN_CODE_LENGTH,
                max: Self::MAX_CODE_LENGTH,
                actual: length,
            });
        }
        self.code_length = Some(length);
        Ok(self)
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn requested_code_length(&self) -> Option<u32> {
        self.code_length
    }
}

#[derive(Debug, Clone)]
pub struct CheckVerification {
    pub code: VerificationCode,
}

#[derive(Debug, Clone)]
pub struct CreateApiKey {
    name: String,
    /// ISO 8601 expiry; `None` keeps the key valid until revoked.
    pub expires_at: Option<String>,
}

impl CreateApiKey {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("API key name", name)?,
            expires_at: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct CreateTemplate {
    name: String,
    text: MessageText,
}

impl CreateTemplate {
    pub fn new(name: impl Into<String>, text: MessageText) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("Template name", name)?,
            text,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}

#[derive(Debug, Clone)]
pub struct CreateWebhook {
    url: WebhookUrl,
    events: Vec<String>,
    pub description: Option<String>,
}

impl CreateWebhook {
    pub fn new(url: WebhookUrl, events: Vec<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            url,
            events: validate_events(events)?,
            description: None,
        })
    }

    pub fn url(&self) -> &WebhookUrl {
        &self.url
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }
}

/// Partial webhook update. Only the fields that were set are sent.
///
/// ```rust
/// use smsgate::{UpdateWebhook, WebhookUrl};
///
/// let update = UpdateWebhook::new()
///     .url(WebhookUrl::new("https://example.com/hooks").unwrap())
///     .is_active(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateWebhook {
    pub(crate) url: Option<WebhookUrl>,
    pub(crate) events: Option<Vec<String>>,
    pub(crate) is_active: Option<bool>,
    pub(crate) description: Option<String>,
}

impl UpdateWebhook {
    /// Empty update; chain setters to pick the fields to change.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: WebhookUrl) -> Self {
        self.url = Some(url);
        self
    }

    /// Replace the subscribed events. The list must be non-empty and every event non-blank.
    pub fn events(mut self, events: Vec<String>) -> Result<Self, ValidationError> {
        self.events = Some(validate_events(events)?);
        Ok(self)
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether no field was set.
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.events.is_none()
            && self.is_active.is_none()
            && self.description.is_none()
    }
}

fn validate_events(events: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let events = events
        .into_iter()
        .map(|event| non_blank("event", event))
        .collect::<Result<Vec<_>, _>>()?;
    if events.is_empty() {
        return Err(ValidationError::Empty { field: "events" });
    }
    Ok(events)
}
