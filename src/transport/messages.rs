use serde_json::{Map, Value, json};

use super::fields::Fields;
use crate::domain::{
    BatchMessageResult, BatchResult, ListMessages, Message, MessageStatus, ScheduleMessage,
    ScheduledMessage, SendBatch, SendMessage, SendOptions,
};

pub fn encode_send_body(request: &SendMessage) -> Value {
    Value::Object(send_fields(request))
}

fn send_fields(request: &SendMessage) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("to".to_owned(), json!(request.to().as_str()));
    body.insert("text".to_owned(), json!(request.text().as_str()));
    push_options(&mut body, request.options());
    body
}

pub fn encode_schedule_body(request: &ScheduleMessage) -> Value {
    let mut body = send_fields(request.message());
    body.insert("scheduledAt".to_owned(), json!(request.scheduled_at()));
    Value::Object(body)
}

pub fn encode_batch_body(request: &SendBatch) -> Value {
    let messages = request
        .entries()
        .iter()
        .map(|entry| json!({ "to": entry.to.as_str(), "text": entry.text.as_str() }))
        .collect::<Vec<_>>();

    let mut body = Map::new();
    body.insert("messages".to_owned(), Value::Array(messages));
    push_options(&mut body, request.options());
    Value::Object(body)
}

fn push_options(body: &mut Map<String, Value>, options: &SendOptions) {
    if let Some(message_type) = options.message_type {
        body.insert("messageType".to_owned(), json!(message_type.as_str()));
    }
    if let Some(from) = options.from.as_deref() {
        body.insert("from".to_owned(), json!(from));
    }
}

pub fn encode_list_messages_query(request: &ListMessages) -> Vec<(String, String)> {
    let mut query = vec![
        ("limit".to_owned(), request.limit.value().to_string()),
        ("offset".to_owned(), request.offset.to_string()),
    ];
    if let Some(status) = request.status.as_deref() {
        query.push(("status".to_owned(), status.to_owned()));
    }
    if let Some(to) = request.to.as_ref() {
        query.push(("to".to_owned(), to.as_str().to_owned()));
    }
    query
}

fn status(fields: &Fields<'_>) -> MessageStatus {
    MessageStatus::from_wire(&fields.string(&["status"]))
}

pub fn decode_message(fields: Fields<'_>) -> Message {
    Message {
        id: fields.string(&["id", "message_id", "messageId"]),
        to: fields.string(&["to"]),
        from: fields.opt_string(&["from"]),
        text: fields.string(&["text", "body"]),
        status: status(&fields),
        error: fields.opt_string(&["error", "error_message", "errorMessage"]),
        segments: fields.u32_or(&["segments", "segment_count", "segmentCount"], 1),
        credits_used: fields.u32_or(&["credits_used", "creditsUsed"], 0),
        is_sandbox: fields.bool_or(&["is_sandbox", "isSandbox"], false),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
        delivered_at: fields.opt_string(&["delivered_at", "deliveredAt"]),
    }
}

pub fn decode_scheduled_message(fields: Fields<'_>) -> ScheduledMessage {
    ScheduledMessage {
        id: fields.string(&["id"]),
        to: fields.string(&["to"]),
        from: fields.opt_string(&["from"]),
        text: fields.string(&["text", "body"]),
        status: status(&fields),
        scheduled_at: fields.string(&["scheduled_at", "scheduledAt"]),
        credits_reserved: fields.u32_or(&["credits_reserved", "creditsReserved"], 0),
        error: fields.opt_string(&["error"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_batch(fields: Fields<'_>) -> BatchResult {
    let messages = fields
        .array(&["messages", "results"])
        .iter()
        .filter_map(Value::as_object)
        .map(|object| decode_batch_message(Fields::new(object)))
        .collect::<Vec<_>>();

    BatchResult {
        batch_id: fields.string(&["batch_id", "batchId", "id"]),
        status: fields.string(&["status"]),
        total: fields.u32_or(&["total"], messages.len() as u32),
        queued: fields.u32_or(&["queued"], 0),
        sent: fields.u32_or(&["sent"], 0),
        failed: fields.u32_or(&["failed"], 0),
        credits_used: fields.u32_or(&["credits_used", "creditsUsed"], 0),
        messages,
        created_at: fields.opt_string(&["created_at", "createdAt"]),
        completed_at: fields.opt_string(&["completed_at", "completedAt"]),
    }
}

fn decode_batch_message(fields: Fields<'_>) -> BatchMessageResult {
    BatchMessageResult {
        id: fields.opt_string(&["id", "message_id", "messageId"]),
        to: fields.string(&["to"]),
        status: status(&fields),
        error: fields.opt_string(&["error"]),
    }
}
