//! Front-matter parsing and the per-collection schemas

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::ContentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Accepts `2025-01-15`, `2025-01-15 10:30:00` and RFC 3339 timestamps
fn post_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_string(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", raw)))
}

/// Front-matter of a docs page
#[derive(Debug, Clone, Deserialize)]
pub struct DocMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub full: Option<bool>,
}

/// Front-matter of a blog post
#[derive(Debug, Clone, Deserialize)]
pub struct BlogMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub author: String,
    #[serde(deserialize_with = "post_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub full: Option<bool>,
}

/// Front-matter of a command reference page.
///
/// Every field is optional; the title is normally derived from the file name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandMeta {
    pub title: String,
    pub description: String,
    pub synopsis: String,
    pub since: String,
    pub dicedb_since: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub acl_categories: Vec<String>,
    pub icon: Option<String>,
    pub full: Option<bool>,
}

/// Front-matter of a release entry
#[derive(Debug, Clone, Deserialize)]
pub struct VersionMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    pub valkey_version: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub full: Option<bool>,
}

/// Splits a document into its front-matter block and body
pub struct FrontMatter;

impl FrontMatter {
    /// Split content into `(yaml, body)`.
    ///
    /// `yaml` is `None` when the document has no front-matter block, or when the
    /// leading `---` is a markdown thematic break rather than YAML.
    pub fn split(content: &str) -> (Option<&str>, &str) {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return (None, content);
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return (None, content);
        };

        let yaml = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return (Some(""), body);
        }

        if !looks_like_yaml(yaml) {
            return (None, content);
        }

        (Some(yaml), body)
    }

    /// Parse and validate the front-matter of `content` against schema `T`.
    ///
    /// A document without front-matter is validated as an empty mapping, so
    /// schemas with required fields reject it.
    pub fn parse<'c, T: DeserializeOwned>(
        path: &Path,
        content: &'c str,
    ) -> Result<(T, &'c str), ContentError> {
        let (yaml, body) = Self::split(content);
        let yaml = match yaml {
            Some(y) if !y.trim().is_empty() => y,
            _ => "{}",
        };

        let data = serde_yaml::from_str::<T>(yaml).map_err(|e| ContentError::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok((data, body))
    }
}

/// Valid front-matter has at least one `key: value` line
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in the formats content authors actually use
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 timestamps are normalized to UTC
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}
