//
//  seafile-cli
//  api/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Seafile API Data Types
//!
//! Seafile returns slightly different shapes from its legacy `api2` endpoints
//! and its `api/v2.1` endpoints. The types here read both without imposing
//! more structure than the callers need.
//!
//! - [`RepoDetails`]: a reduced view of repository metadata
//! - [`DirEntry`]: one item of a directory listing, kept as the server sent it

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reduced view of the metadata Seafile reports for a repository (library).
///
/// Every field is optional: fields the server did not send stay `None` and are
/// left out when serialized. A server that answers with no data at all yields
/// `RepoDetails::default()`.
///
/// # Key Mapping
///
/// | Field | v2.1 key | api2 key |
/// |-------|----------|----------|
/// | `repo_id` | `repo_id` | `id` |
/// | `repo_name` | `repo_name` | `name` |
/// | `size` | `size` | `size` |
/// | `file_count` | `file_count` | `file_count` |
/// | `last_modified` | `last_modified` (ISO 8601) | `mtime` (Unix seconds) |
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::RepoDetails;
/// use serde_json::json;
///
/// let details = RepoDetails::from_value(&json!({
///     "repo_id": "7f1c",
///     "repo_name": "Notes",
///     "size": 2048,
/// }));
///
/// assert_eq!(details.repo_name.as_deref(), Some("Notes"));
/// assert_eq!(details.file_count, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoDetails {
    /// Repository identifier (a UUID on stock servers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,

    /// Total size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Number of files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,

    /// Last modification time, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl RepoDetails {
    /// Builds the reduced view from a raw server object.
    pub fn from_value(value: &Value) -> Self {
        let last_modified = match first_field(value, &["last_modified", "mtime"]) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.to_rfc3339()),
            _ => None,
        };

        Self {
            repo_id: text_field(value, &["repo_id", "id"]),
            repo_name: text_field(value, &["repo_name", "name"]),
            size: first_field(value, &["size"]).and_then(Value::as_u64),
            file_count: first_field(value, &["file_count"]).and_then(Value::as_u64),
            last_modified,
        }
    }

    /// Checks whether no field was populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reads a repository listing (a JSON array of repository objects).
    ///
    /// Anything other than an array yields an empty list.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

/// First non-null value among `keys`.
fn first_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

fn text_field(value: &Value, keys: &[&str]) -> Option<String> {
    match first_field(value, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One entry of a directory listing.
///
/// The server's JSON object is kept verbatim and serialized back unchanged.
/// The accessors read the commonly present attributes without validating them.
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::DirEntry;
/// use serde_json::json;
///
/// let entry = DirEntry::from(json!({"name": "docs", "type": "dir", "mtime": 1700000000}));
/// assert_eq!(entry.name(), Some("docs"));
/// assert!(entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirEntry(Value);

impl DirEntry {
    /// Entry name, without the parent path.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Entry type as reported by the server (`"dir"` or `"file"`).
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == Some("dir")
    }

    /// Size in bytes, for files.
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    /// Modification time, Unix seconds.
    pub fn mtime(&self) -> Option<i64> {
        self.0.get("mtime").and_then(Value::as_i64)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for DirEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
