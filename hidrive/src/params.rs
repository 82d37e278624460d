//! Query parameters for HiDrive requests.
//!
//! Every HiDrive operation takes its arguments from the query string. A
//! [`Parameters`] value is an ordered multimap built by value:
//!
//! ```
//! use hidrive::Parameters;
//!
//! let params = Parameters::new()
//!     .path("/public/photos")
//!     .members(&["none"])
//!     .fields(&["path", "size"]);
//!
//! assert_eq!(params.get("members"), Some("none"));
//! assert_eq!(params.get("fields"), Some("path,size"));
//! ```
//!
//! The setters only place values; the service is the one that decides which
//! combinations are valid.

use time::OffsetDateTime;

/// Ordered key/value pairs sent as a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pairs: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to a single `value`, replacing every earlier occurrence.
    ///
    /// The key keeps the position of its first occurrence.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut idx = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = idx <= first || *k != key;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Add another occurrence of `key`.
    #[must_use]
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `path` - path to a filesystem object.
    #[must_use]
    pub fn path(self, path: impl Into<String>) -> Self {
        self.set("path", path)
    }

    /// `pid` - public id of a filesystem object. Combined with `path`, it
    /// addresses the parent directory and `path` becomes relative to it.
    #[must_use]
    pub fn pid(self, pid: impl Into<String>) -> Self {
        self.set("pid", pid)
    }

    /// `members` - member types to include when reading a directory
    /// (`all`, `none`, `dir`, `file`, `symlink`).
    #[must_use]
    pub fn members(self, members: &[&str]) -> Self {
        self.set("members", members.join(","))
    }

    /// `limit` - at most `limit` directory entries starting at `offset`.
    /// A limit of 0 lets the service decide.
    #[must_use]
    pub fn limit(self, limit: u32, offset: u32) -> Self {
        self.set("limit", format!("{offset},{limit}"))
    }

    /// `fields` - response fields to include.
    #[must_use]
    pub fn fields(self, fields: &[&str]) -> Self {
        self.set("fields", fields.join(","))
    }

    /// `sort` - member order, e.g. `name` or `-mtime` for descending.
    #[must_use]
    pub fn sort(self, sort_by: impl Into<String>) -> Self {
        self.set("sort", sort_by)
    }

    /// `sort_lang` - locale used for sorting names.
    #[must_use]
    pub fn sort_lang(self, lang: impl Into<String>) -> Self {
        self.set("sort_lang", lang)
    }

    /// `on_exist` - conflict behavior, e.g. `autoname`.
    #[must_use]
    pub fn on_exist(self, on_exist: impl Into<String>) -> Self {
        self.set("on_exist", on_exist)
    }

    #[must_use]
    pub fn mtime(self, t: OffsetDateTime) -> Self {
        self.set("mtime", t.unix_timestamp().to_string())
    }

    #[must_use]
    pub fn parent_mtime(self, t: OffsetDateTime) -> Self {
        self.set("parent_mtime", t.unix_timestamp().to_string())
    }

    /// `recursive` - delete non-empty directories with their contents.
    #[must_use]
    pub fn recursive(self, recursive: bool) -> Self {
        self.set("recursive", recursive.to_string())
    }

    /// `dir` - target directory of an upload. Must not end with `/`.
    #[must_use]
    pub fn dir(self, dir: impl Into<String>) -> Self {
        self.set("dir", dir)
    }

    #[must_use]
    pub fn dir_id(self, id: impl Into<String>) -> Self {
        self.set("dir_id", id)
    }

    /// `name` - file name of a binary upload.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.set("name", name)
    }

    /// Split `path` at its last separator into `dir` and `name`.
    #[must_use]
    pub fn file_path(self, path: &str) -> Self {
        let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.dir(dir).name(name)
    }

    /// `maxcount` - number of share tokens that may be issued.
    #[must_use]
    pub fn max_count(self, count: i64) -> Self {
        self.set("maxcount", count.to_string())
    }

    /// `password` - share protection. Leave out for encrypted shares.
    #[must_use]
    pub fn password(self, password: impl Into<String>) -> Self {
        self.set("password", password)
    }

    #[must_use]
    pub fn writable(self, writable: bool) -> Self {
        self.set("writable", writable.to_string())
    }

    /// `ttl` - share expiry in seconds from now.
    #[must_use]
    pub fn ttl(self, ttl: u64) -> Self {
        self.set("ttl", ttl.to_string())
    }

    /// `salt` - marks the share as encrypted; `share_access_key` and
    /// `pw_sharekey` have to be present as well.
    #[must_use]
    pub fn salt(self, salt: impl Into<String>) -> Self {
        self.set("salt", salt)
    }

    #[must_use]
    pub fn share_access_key(self, key: impl Into<String>) -> Self {
        self.set("share_access_key", key)
    }

    #[must_use]
    pub fn pw_sharekey(self, key: impl Into<String>) -> Self {
        self.set("pw_sharekey", key)
    }

    /// `id` - share id as returned by the share endpoints.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.set("id", id)
    }

    /// `recipient` - an RFC 822 address. Repeat to invite several people.
    #[must_use]
    pub fn recipient(self, recipient: impl Into<String>) -> Self {
        self.append("recipient", recipient)
    }

    /// `msg` - text included in an invitation mail.
    #[must_use]
    pub fn msg(self, msg: impl Into<String>) -> Self {
        self.set("msg", msg)
    }

    #[must_use]
    pub fn src(self, src: impl Into<String>) -> Self {
        self.set("src", src)
    }

    #[must_use]
    pub fn src_id(self, id: impl Into<String>) -> Self {
        self.set("src_id", id)
    }

    #[must_use]
    pub fn dst(self, dst: impl Into<String>) -> Self {
        self.set("dst", dst)
    }

    /// `dst_id` - always the pid of a parent directory of `dst`.
    #[must_use]
    pub fn dst_id(self, id: impl Into<String>) -> Self {
        self.set("dst_id", id)
    }

    #[must_use]
    pub fn src_parent_mtime(self, t: OffsetDateTime) -> Self {
        self.set("src_parent_mtime", t.unix_timestamp().to_string())
    }

    #[must_use]
    pub fn dst_parent_mtime(self, t: OffsetDateTime) -> Self {
        self.set("dst_parent_mtime", t.unix_timestamp().to_string())
    }

    /// `preserve_mtime` - copy the source mtime onto the target.
    #[must_use]
    pub fn preserve_mtime(self, preserve: bool) -> Self {
        self.set("preserve_mtime", preserve.to_string())
    }

    /// `type` - object type of a share link.
    #[must_use]
    pub fn kind(self, kind: impl Into<String>) -> Self {
        self.set("type", kind)
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
