use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single structured log record, stored as one backend document.
///
/// Every field is optional on input. `null` decodes the same as an absent
/// field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 instant. Filled with the ingestion time when empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Free-form attributes; left out of the stored document when empty.
    #[serde(default, skip_serializing_if = "metadata_is_empty")]
    pub metadata: Option<Map<String, Value>>,
}

/// Search criteria for `POST /api/logs/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query string; empty matches everything.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,

    /// Inclusive lower bound. Only applied together with `end_time`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,

    /// Inclusive upper bound. Only applied together with `start_time`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,

    /// Page size (0 = default).
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,

    /// Page offset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: i64,
}

impl LogEntry {
    const FIELDS: &'static [&'static str] = &["timestamp", "level", "source", "message", "metadata"];

    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_value(fold_keys(body, Self::FIELDS)?)
    }
}

impl SearchRequest {
    const FIELDS: &'static [&'static str] = &["query", "start_time", "end_time", "size", "from"];

    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_value(fold_keys(body, Self::FIELDS)?)
    }
}

/// Parse `body` and rename top-level keys matching one of `fields` up to
/// ASCII case (`"Level"`, `"START_TIME"`) to that field. When two keys fold to
/// the same field the later one wins.
fn fold_keys(body: &[u8], fields: &[&str]) -> serde_json::Result<Value> {
    let mut value: Value = serde_json::from_slice(body)?;
    if let Value::Object(map) = &mut value {
        *map = std::mem::take(map)
            .into_iter()
            .map(|(key, v)| match fields.iter().find(|f| f.eq_ignore_ascii_case(&key)) {
                Some(field) => (field.to_string(), v),
                None => (key, v),
            })
            .collect();
    }
    Ok(value)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn metadata_is_empty(metadata: &Option<Map<String, Value>>) -> bool {
    metadata.as_ref().is_none_or(Map::is_empty)
}
