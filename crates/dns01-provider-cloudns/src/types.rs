//! ClouDNS wire types
//!
//! The API is loose about JSON types: numeric fields arrive as strings on
//! some endpoints and as numbers on others. The helpers at the bottom
//! accept both.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Record type managed by this crate
pub const TXT: &str = "TXT";

/// `status` value of a successful mutation
pub const STATUS_SUCCESS: &str = "Success";

/// `status` value of a failed lookup
pub const STATUS_FAILED: &str = "Failed";

/// Generic `{status, statusDescription}` body returned by mutations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_description: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// A DNS zone registered with ClouDNS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone name without trailing dot
    #[serde(default)]
    pub name: String,
    /// Zone type (`master`, `slave`, ...)
    #[serde(default, rename = "type")]
    pub zone_type: String,
    /// Raw zone kind (`domain`, `ipv4`, ...)
    #[serde(default)]
    pub zone: String,
    /// Numeric status as text, or `Failed` when the lookup failed
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,
    #[serde(default)]
    pub status_description: String,
}

/// A TXT record at ClouDNS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    #[serde(alias = "Id", deserialize_with = "u64_from_string_or_number")]
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Label relative to the zone (`_acme-challenge`)
    pub host: String,
    /// Record value
    pub record: String,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub failover: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub ttl: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub status: u64,
}

/// `records.json` body: opaque keys mapped to records
///
/// Ordered by key so "first match" is stable for a given response.
pub type TxtRecords = BTreeMap<String, TxtRecord>;

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            serde::de::Error::custom(format!("expected unsigned integer, got {}", n))
        }),
        Value::String(s) if s.is_empty() => Ok(0),
        Value::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected integer string, got {:?}", s))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
