use std::fmt;

/// Local input check that failed before any request left the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingId { entity: &'static str },
    InvalidPhoneNumber { input: String },
    TextTooLong { max: usize, actual: usize },
    InvalidMessageType { value: String },
    EmptyBatch,
    BatchEntryMissingField { index: usize, field: &'static str },
    BatchEntryInvalid { index: usize, reason: Box<ValidationError> },
    OutOfRange { field: &'static str, min: u32, max: u32, actual: u32 },
    InvalidCode { input: String },
    InvalidUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is required"),
            Self::MissingId { entity } => write!(f, "{entity} ID is required"),
            Self::InvalidPhoneNumber { input } => write!(
                f,
                "Invalid phone number format: {input}. Use E.164 format (e.g. +15551234567)"
            ),
            Self::TextTooLong { max, actual } => write!(
                f,
                "Message text exceeds maximum length of {max} characters (got {actual})"
            ),
            Self::InvalidMessageType { value } => write!(
                f,
                "Invalid message type: {value}. Must be 'marketing' or 'transactional'"
            ),
            Self::EmptyBatch => write!(f, "Batch must contain at least one message"),
            Self::BatchEntryMissingField { index, field } => {
                write!(f, "Message at index {index} is missing '{field}'")
            }
            Self::BatchEntryInvalid { index, reason } => {
                write!(f, "Message at index {index}: {reason}")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
            Self::InvalidCode { input } => {
                write!(f, "Invalid verification code: {input}")
            }
            Self::InvalidUrl { input } => write!(f, "Invalid URL: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject empty identifiers before they are spliced into a request path.
///
/// The id is passed through unchanged; it is percent-encoded as a path segment.
pub(crate) fn require_id<'a>(
    entity: &'static str,
    id: &'a str,
) -> Result<&'a str, ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingId { entity });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, require_id};

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "Message text",
        };
        assert_eq!(err.to_string(), "Message text is required");

        let err = ValidationError::MissingId { entity: "Message" };
        assert_eq!(err.to_string(), "Message ID is required");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert!(err.to_string().starts_with("Invalid phone number format"));

        let err = ValidationError::TextTooLong {
            max: 1600,
            actual: 1601,
        };
        assert!(err.to_string().contains("exceeds maximum length"));

        let err = ValidationError::InvalidMessageType {
            value: "promo".to_owned(),
        };
        assert!(err.to_string().contains("promo"));

        let err = ValidationError::BatchEntryMissingField {
            index: 2,
            field: "to",
        };
        assert_eq!(err.to_string(), "Message at index 2 is missing 'to'");

        let err = ValidationError::OutOfRange {
            field: "limit",
            min: 1,
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "limit out of range: 101 (expected 1..=100)");
    }

    #[test]
    fn require_id_rejects_empty_and_keeps_value_verbatim() {
        assert_eq!(require_id("Message", "msg_1"), Ok("msg_1"));
        assert_eq!(require_id("Message", " msg_1 "), Ok(" msg_1 "));
        assert_eq!(
            require_id("Batch", ""),
            Err(ValidationError::MissingId { entity: "Batch" })
        );
    }
}
