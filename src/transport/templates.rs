use serde_json::{Map, Value, json};

use super::TransportError;
use super::fields::Fields;
use crate::domain::{CreateTemplate, Template};

pub fn encode_create_template_body(request: &CreateTemplate) -> Value {
    json!({ "name": request.name(), "text": request.text().as_str() })
}

pub fn decode_template(fields: Fields<'_>) -> Template {
    Template {
        id: fields.string(&["id"]),
        name: fields.string(&["name"]),
        text: fields.string(&["text", "body"]),
        variables: fields.strings(&["variables"]),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}

pub fn decode_templates(object: &Map<String, Value>) -> Result<Vec<Template>, TransportError> {
    super::decode_list(object, &["data", "templates"], decode_template)
}
