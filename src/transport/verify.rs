use serde_json::{Map, Value, json};

use super::fields::Fields;
use crate::domain::{CheckVerification, SendVerification, Verification, VerificationCheck};

pub fn encode_send_verification_body(request: &SendVerification) -> Value {
    let mut body = Map::new();
    body.insert("to".to_owned(), json!(request.to().as_str()));
    body.insert("channel".to_owned(), json!(request.channel.as_str()));
    if let Some(length) = request.requested_code_length() {
        body.insert("codeLength".to_owned(), json!(length));
    }
    if let Some(app_name) = request.app_name.as_deref() {
        body.insert("appName".to_owned(), json!(app_name));
    }
    if let Some(template_id) = request.template_id.as_deref() {
        body.insert("templateId".to_owned(), json!(template_id));
    }
    Value::Object(body)
}

pub fn encode_check_verification_body(request: &CheckVerification) -> Value {
    json!({ "code": request.code.as_str() })
}

pub fn decode_verification(fields: Fields<'_>) -> Verification {
    Verification {
        id: fields.string(&["id"]),
        status: fields.string(&["status"]),
        phone: fields.string(&["phone", "to"]),
        channel: fields.opt_string(&["channel"]).unwrap_or_else(|| "sms".to_owned()),
        attempts: fields.u32_or(&["attempts"], 0),
        max_attempts: fields.u32_or(&["max_attempts", "maxAttempts"], 3),
        expires_at: fields.opt_string(&["expires_at", "expiresAt"]),
        verified_at: fields.opt_string(&["verified_at", "verifiedAt"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_verification_check(fields: Fields<'_>) -> VerificationCheck {
    let status = fields.string(&["status"]);
    VerificationCheck {
        id: fields.string(&["id"]),
        valid: fields.bool_or(&["valid", "verified"], status == "verified"),
        status,
        remaining_attempts: fields.opt_u32(&["remaining_attempts", "remainingAttempts"]),
    }
}
