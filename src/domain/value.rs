use std::fmt;
use std::str::FromStr;

use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token used to authenticate every API call.
///
/// Invariant: non-empty after trimming. `Debug` never prints the secret.
pub struct ApiToken(String);

impl ApiToken {
    pub const FIELD: &'static str = "API key";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in E.164 form (`+` followed by 2 to 15 digits, no leading zero).
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const FIELD: &'static str = "to";

    /// Minimum number of digits after the `+`.
    pub const MIN_DIGITS: usize = 2;
    /// Maximum number of digits after the `+`.
    pub const MAX_DIGITS: usize = 15;

    /// Validate an already formatted E.164 number, exactly as given.
    ///
    /// Use [`PhoneNumber::parse`] for input with spaces, dashes, or national formatting.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_e164(&value) {
            return Err(ValidationError::InvalidPhoneNumber { input: value });
        }
        Ok(Self(value))
    }

    /// Parse a loosely formatted number (spaces, dashes, national form) and
    /// normalize it to E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Self::new(e164)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_e164(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };
    let bytes = digits.as_bytes();
    (PhoneNumber::MIN_DIGITS..=PhoneNumber::MAX_DIGITS).contains(&bytes.len())
        && matches!(bytes.first(), Some(b'1'..=b'9'))
        && bytes.iter().all(u8::is_ascii_digit)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body.
///
/// Invariant: non-empty and at most [`MessageText::MAX_CHARS`] characters.
/// Whitespace is significant and preserved as given.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "Message text";

    /// Longest accepted body, counted in Unicode scalar values.
    pub const MAX_CHARS: usize = 1600;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let len = value.chars().count();
        if len > Self::MAX_CHARS {
            return Err(ValidationError::TextTooLong {
                max: Self::MAX_CHARS,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message classification. Marketing traffic is subject to quiet hours and opt-outs.
pub enum MessageType {
    Marketing,
    Transactional,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Transactional => "transactional",
        }
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "marketing" => Ok(Self::Marketing),
            "transactional" => Ok(Self::Transactional),
            other => Err(ValidationError::InvalidMessageType {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page size for list endpoints.
///
/// Invariant: `1..=100`.
pub struct PageLimit(u32);

impl PageLimit {
    pub const FIELD: &'static str = "limit";

    /// Smallest page the API serves.
    pub const MIN: u32 = 1;
    /// Largest page the API serves, and the default.
    pub const MAX: u32 = 100;

    /// Fails with [`ValidationError::OutOfRange`] outside `MIN..=MAX`.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time verification code entered by the end user.
///
/// Invariant: non-empty, ASCII digits only. Length is left to the server,
/// which knows the length it issued.
pub struct VerificationCode(String);

impl VerificationCode {
    pub const FIELD: &'static str = "Verification code";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCode { input: value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery target for webhook notifications.
///
/// Invariant: absolute `https` URL.
pub struct WebhookUrl(url::Url);

impl WebhookUrl {
    pub const FIELD: &'static str = "url";

    /// Parse and require an absolute `https` URL with a host.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim();
        let invalid = || ValidationError::InvalidUrl {
            input: value.to_owned(),
        };
        let parsed = url::Url::parse(value).map_err(|_| invalid())?;
        if parsed.scheme() != "https" || parsed.host_str().is_none() {
            return Err(invalid());
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Build a non-blank free-text value, trimming surrounding whitespace.
pub(crate) fn non_blank(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
