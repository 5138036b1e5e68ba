//! Transport layer: wire-format details (JSON bodies, query strings, response decoding).

mod account;
mod fields;
mod media;
mod messages;
mod scalar;
mod templates;
mod verify;
mod webhooks;

use serde_json::{Map, Value};

use crate::domain::{ListOptions, Page};

pub use account::{
    decode_account, decode_api_key, decode_api_keys, decode_credits, decode_transaction,
    encode_create_api_key_body,
};
pub use fields::Fields;
pub use media::decode_media_file;
pub use messages::{
    decode_batch, decode_message, decode_scheduled_message, encode_batch_body,
    encode_list_messages_query, encode_schedule_body, encode_send_body,
};
pub use templates::{decode_template, decode_templates, encode_create_template_body};
pub use verify::{
    decode_verification, decode_verification_check, encode_check_verification_body,
    encode_send_verification_body,
};
pub use webhooks::{
    decode_event, decode_webhook, decode_webhooks, encode_create_webhook_body,
    encode_update_webhook_body,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("expected a JSON object at {path}")]
    NotAnObject { path: String },

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn encode_list_query(options: &ListOptions) -> Vec<(String, String)> {
    let mut query = vec![
        ("limit".to_owned(), options.limit.value().to_string()),
        ("offset".to_owned(), options.offset.to_string()),
    ];
    if let Some(status) = options.status.as_deref() {
        query.push(("status".to_owned(), status.to_owned()));
    }
    query
}

/// Decode a `{ "data": [...], "pagination": {...} }` envelope. Pagination keys may
/// also sit at the top level.
pub fn decode_page<T>(
    object: &Map<String, Value>,
    decode: impl Fn(Fields<'_>) -> T,
) -> Result<Page<T>, TransportError> {
    let fields = Fields::new(object);
    let data = decode_items(fields.array(&["data", "items"]), "data", decode)?;

    let meta = fields.object(&["pagination", "meta"]).unwrap_or(fields);
    let len = data.len() as u64;
    let offset = meta.u32_or(&["offset"], 0);
    let limit = meta.u32_or(&["limit"], data.len() as u32);
    let total = meta.u64_or(&["total", "count"], u64::from(offset) + len);
    let has_more = meta
        .opt_bool(&["has_more", "hasMore"])
        .unwrap_or(u64::from(offset) + len < total);

    Ok(Page {
        data,
        total,
        limit,
        offset,
        has_more,
    })
}

/// Decode a bare array found under one of `keys`, rejecting non-object elements.
pub fn decode_list<T>(
    object: &Map<String, Value>,
    keys: &[&str],
    decode: impl Fn(Fields<'_>) -> T,
) -> Result<Vec<T>, TransportError> {
    let fields = Fields::new(object);
    decode_items(fields.array(keys), keys.first().copied().unwrap_or("data"), decode)
}

fn decode_items<T>(
    items: &[Value],
    path: &str,
    decode: impl Fn(Fields<'_>) -> T,
) -> Result<Vec<T>, TransportError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_object()
                .map(|object| decode(Fields::new(object)))
                .ok_or_else(|| TransportError::NotAnObject {
                    path: format!("{path}[{index}]"),
                })
        })
        .collect()
}
