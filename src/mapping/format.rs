//! Decoding of redirect lists from structured blobs.
//!
//! # Formats
//! ```text
//! YAML:                         JSON:
//!   - path: /some-path            [{"path": "/some-path",
//!     url: https://example.com      "URL": "https://example.com"}]
//! ```
//!
//! The URL field is `url` in YAML and `URL` in JSON. That asymmetry is part
//! of the file contract and must not be normalized away. YAML keys are
//! matched exactly; JSON keys are matched ignoring ASCII case.
//!
//! # Design Decisions
//! - A format is a descriptor: its record shape plus its decoder
//! - Missing or `null` fields decode to the empty string
//! - Unknown fields are ignored
//! - A failed decode yields no records at all

use std::fmt;

use serde::de::{DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::mapping::record::PathUrl;

/// Error raised when a blob is not a well-formed redirect list.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid YAML redirect list: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirect list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Describes how one source format encodes a list of `{path, url}` records.
pub trait RecordFormat {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Wire shape of a single record. Field names are fixed per format.
    type Record: DeserializeOwned + Into<PathUrl>;

    /// Decode the blob. `None` means the blob holds no list at all
    /// (empty or `null` document), which callers treat as an empty list.
    fn decode(blob: &[u8]) -> Result<Option<Vec<Self::Record>>, DecodeError>;
}

/// Decode `blob` as a list of records in format `F`, preserving order.
pub fn parse_records<F: RecordFormat>(blob: &[u8]) -> Result<Vec<PathUrl>, DecodeError> {
    let records = F::decode(blob)?.unwrap_or_default();
    Ok(records.into_iter().map(Into::into).collect())
}

/// YAML source format (`path` / `url`).
#[derive(Debug, Clone, Copy)]
pub struct Yaml;

#[derive(Debug, Deserialize)]
pub struct YamlRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    path: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    url: String,
}

impl From<YamlRecord> for PathUrl {
    fn from(record: YamlRecord) -> Self {
        PathUrl::new(record.path, record.url)
    }
}

impl RecordFormat for Yaml {
    const NAME: &'static str = "yaml";
    type Record = YamlRecord;

    fn decode(blob: &[u8]) -> Result<Option<Vec<YamlRecord>>, DecodeError> {
        // serde_yaml rejects a stream with no document; an empty file is an empty list.
        if blob.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_yaml::from_slice(blob)?)
    }
}

/// JSON source format (`path` / `URL`).
#[derive(Debug, Clone, Copy)]
pub struct Json;

/// JSON keys match their field case-insensitively (`URL`, `url`, `Url`, ...).
/// When a record repeats a field under different spellings, the last one in
/// document order wins, and `null` leaves the earlier value in place.
#[derive(Debug, Default)]
pub struct JsonRecord {
    path: String,
    url: String,
}

impl<'de> Deserialize<'de> for JsonRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(JsonRecordVisitor)
    }
}

struct JsonRecordVisitor;

impl<'de> Visitor<'de> for JsonRecordVisitor {
    type Value = JsonRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with `path` and `URL` fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<JsonRecord, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = JsonRecord::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("path") {
                &mut record.path
            } else if key.eq_ignore_ascii_case("url") {
                &mut record.url
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }
        Ok(record)
    }
}

impl From<JsonRecord> for PathUrl {
    fn from(record: JsonRecord) -> Self {
        PathUrl::new(record.path, record.url)
    }
}

impl RecordFormat for Json {
    const NAME: &'static str = "json";
    type Record = JsonRecord;

    fn decode(blob: &[u8]) -> Result<Option<Vec<JsonRecord>>, DecodeError> {
        Ok(serde_json::from_slice(blob)?)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
