use crate::error::RelayError;
use serde::de::IgnoredAny;
use serde_json::{Map, Value};

const MARKDOWN_FIELD: &str = "markdown";
const SCHEMA_FIELD: &str = "schema";

/// Body of `/api/extract`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractRequest {
    pub markdown: String,
    pub schema: SchemaPayload,
}

/// The extraction schema as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaPayload {
    Object(Map<String, Value>),
    /// Already serialized by the caller; known to be well-formed JSON.
    Serialized(String),
}

impl SchemaPayload {
    /// The form value sent upstream.
    pub fn to_form_value(&self) -> Result<String, serde_json::Error> {
        match self {
            SchemaPayload::Object(map) => serde_json::to_string(map),
            SchemaPayload::Serialized(raw) => Ok(raw.clone()),
        }
    }
}

impl TryFrom<Value> for SchemaPayload {
    type Error = RelayError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(SchemaPayload::Object(map)),
            Value::String(raw) => {
                serde_json::from_str::<IgnoredAny>(&raw).map_err(|e| {
                    RelayError::bad_request(format!("Field schema is not valid JSON: {}", e))
                })?;
                Ok(SchemaPayload::Serialized(raw))
            }
            _ => Err(RelayError::bad_request(
                "Field schema must be a JSON object or a JSON string",
            )),
        }
    }
}

impl ExtractRequest {
    /// Parses a raw request body.
    ///
    /// An empty, non-JSON, or non-object body is treated as missing both fields.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        let mut fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let (markdown, schema) = match (
            fields.remove(MARKDOWN_FIELD),
            fields.remove(SCHEMA_FIELD),
        ) {
            (Some(markdown), Some(schema)) => (markdown, schema),
            (markdown, schema) => {
                let missing: Vec<&str> = [
                    (MARKDOWN_FIELD, markdown.is_none()),
                    (SCHEMA_FIELD, schema.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, is_missing)| is_missing.then_some(key))
                .collect();
                return Err(RelayError::bad_request(format!(
                    "Missing required fields: {}",
                    missing.join(" and ")
                )));
            }
        };

        let Value::String(markdown) = markdown else {
            return Err(RelayError::bad_request("Field markdown must be a string"));
        };
        let schema = SchemaPayload::try_from(schema)?;

        Ok(Self { markdown, schema })
    }
}
