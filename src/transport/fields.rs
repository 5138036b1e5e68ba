use serde_json::{Map, Value};

/// Read-only view over a decoded JSON object.
///
/// Every accessor takes an ordered list of candidate keys; the first key that is
/// present with a non-null value wins, otherwise the typed default applies.
/// Scalars are accepted as either JSON strings or JSON numbers.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a>(&'a Map<String, Value>);

impl<'a> Fields<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self(object)
    }

    pub fn value(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn opt_string(&self, keys: &[&str]) -> Option<String> {
        self.value(keys).and_then(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
    }

    pub fn string(&self, keys: &[&str]) -> String {
        self.opt_string(keys).unwrap_or_default()
    }

    pub fn opt_u64(&self, keys: &[&str]) -> Option<u64> {
        self.value(keys).and_then(|value| match value {
            Value::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|it| *it >= 0.0).map(|it| it as u64)),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn u64_or(&self, keys: &[&str], default: u64) -> u64 {
        self.opt_u64(keys).unwrap_or(default)
    }

    pub fn opt_u32(&self, keys: &[&str]) -> Option<u32> {
        self.opt_u64(keys).and_then(|value| u32::try_from(value).ok())
    }

    pub fn u32_or(&self, keys: &[&str], default: u32) -> u32 {
        self.opt_u32(keys).unwrap_or(default)
    }

    pub fn i64_or(&self, keys: &[&str], default: i64) -> i64 {
        self.value(keys)
            .and_then(|value| match value {
                Value::Number(number) => number
                    .as_i64()
                    .or_else(|| number.as_f64().map(|it| it as i64)),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(default)
    }

    pub fn opt_bool(&self, keys: &[&str]) -> Option<bool> {
        self.value(keys).and_then(|value| match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => number.as_u64().map(|it| it != 0),
            Value::String(text) => match text.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn bool_or(&self, keys: &[&str], default: bool) -> bool {
        self.opt_bool(keys).unwrap_or(default)
    }

    pub fn object(&self, keys: &[&str]) -> Option<Fields<'a>> {
        self.value(keys).and_then(Value::as_object).map(Fields)
    }

    pub fn array(&self, keys: &[&str]) -> &'a [Value] {
        self.value(keys)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn strings(&self, keys: &[&str]) -> Vec<String> {
        self.array(keys)
            .iter()
            .filter_map(|value| value.as_str().map(str::to_owned))
            .collect()
    }
}
