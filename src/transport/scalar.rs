use serde::Deserialize;
use serde::de::Error as DeError;
use serde_json::Value;

/// Text value the API may send as either a JSON string or a JSON number.
///
/// Numbers keep their JSON spelling (`30003` becomes `"30003"`). `null` and
/// other JSON types are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportText(String);

impl TransportText {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            _ => Err(D::Error::custom(
                "expected text field to be JSON string or number",
            )),
        }
    }
}
