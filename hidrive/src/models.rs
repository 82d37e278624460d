//! Data models for HiDrive API responses.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Value of a numeric field the service left out.
pub const UNKNOWN: i64 = -1;

fn unknown() -> i64 {
    UNKNOWN
}

/// Absent and `null` both resolve to [`UNKNOWN`]; a real `0` stays `0`.
fn or_unknown<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(UNKNOWN))
}

/// Names arrive URL-encoded. Undecodable names are kept as sent.
fn unescaped<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if !well_formed_escapes(&raw) {
        return Ok(raw);
    }
    let decoded = urlencoding::decode(&raw).map(Cow::into_owned);
    Ok(decoded.unwrap_or(raw))
}

/// Every `%` starts a two-digit hex escape.
fn well_formed_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

fn known(value: i64) -> Option<u64> {
    u64::try_from(value).ok()
}

/// Type of a filesystem object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Dir,
    File,
    Symlink,
    #[serde(other)]
    Other,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Dir => "dir",
            ObjectKind::File => "file",
            ObjectKind::Symlink => "symlink",
            ObjectKind::Other => "other",
        }
    }
}

/// A directory, file or symlink on HiDrive.
///
/// Only the fields requested through `fields` are filled in. `size` and
/// `nmembers` hold [`UNKNOWN`] when the service did not send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: Option<ObjectKind>,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default, deserialize_with = "unescaped")]
    pub name: String,
    #[serde(default = "unknown", deserialize_with = "or_unknown")]
    pub size: i64,
    #[serde(rename = "nmembers", default = "unknown", deserialize_with = "or_unknown")]
    pub member_count: i64,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub mtime: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub ctime: Option<OffsetDateTime>,
    #[serde(rename = "mhash", default)]
    pub meta_hash: String,
    #[serde(rename = "mohash", default)]
    pub meta_only_hash: String,
    #[serde(rename = "nhash", default)]
    pub name_hash: String,
    #[serde(rename = "chash", default)]
    pub content_hash: String,
    #[serde(default)]
    pub teamfolder: bool,
    #[serde(default)]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub shareable: bool,
    #[serde(default)]
    pub mime_type: String,
    /// Directory contents, present when `members` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<StorageObject>>,
}

impl StorageObject {
    /// Size in bytes, if the service reported one.
    pub fn known_size(&self) -> Option<u64> {
        known(self.size)
    }

    pub fn known_member_count(&self) -> Option<u64> {
        known(self.member_count)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == Some(ObjectKind::Dir)
    }
}

impl std::fmt::Display for StorageObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_str = self
            .known_size()
            .map(format_size)
            .unwrap_or_else(|| "-".to_string());
        let kind = self.kind.map(|k| k.as_str()).unwrap_or("-");
        write!(f, "{}\t{}\t{}\t{}", self.id, size_str, kind, self.name)
    }
}

/// Size column of a [`StorageObject`] listing, in binary units up to TB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Lifecycle state of a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    Valid,
    Invalid,
    Expired,
    #[serde(other)]
    Other,
}

/// An access grant over a directory (share) or a single file (share link).
///
/// `count`, `maxcount`, `remaining`, `size` and `ttl` hold [`UNKNOWN`] when
/// absent. A negative `ttl` other than that means the share already expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareObject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub status: Option<ShareStatus>,
    #[serde(default)]
    pub file_type: String,
    /// Completed downloads.
    #[serde(default = "unknown", deserialize_with = "or_unknown")]
    pub count: i64,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub created: Option<OffsetDateTime>,
    #[serde(default)]
    pub has_password: bool,
    #[serde(rename = "is_encrypted", default)]
    pub encrypted: bool,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub last_modified: Option<OffsetDateTime>,
    #[serde(rename = "maxcount", default = "unknown", deserialize_with = "or_unknown")]
    pub max_count: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub readable: bool,
    #[serde(default = "unknown", deserialize_with = "or_unknown")]
    pub remaining: i64,
    #[serde(default)]
    pub share_type: String,
    #[serde(default = "unknown", deserialize_with = "or_unknown")]
    pub size: i64,
    #[serde(default = "unknown", deserialize_with = "or_unknown")]
    pub ttl: i64,
    #[serde(default)]
    pub uri: String,
    #[serde(default, with = "time::serde::timestamp::option")]
    pub valid_until: Option<OffsetDateTime>,
    #[serde(rename = "viewmode", default)]
    pub view_mode: String,
    #[serde(default)]
    pub writable: bool,
}

impl ShareObject {
    pub fn is_valid(&self) -> bool {
        self.status == Some(ShareStatus::Valid)
    }
}

/// Per-recipient result of a share invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteStatus {
    #[serde(rename = "to")]
    pub address: String,
    pub code: i64,
    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of `share/invite`, split into delivered and failed invitations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteOutcome {
    #[serde(rename = "done", default)]
    pub succeeded: Vec<InviteStatus>,
    #[serde(default)]
    pub failed: Vec<InviteStatus>,
}

/// A body that is either one object or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
