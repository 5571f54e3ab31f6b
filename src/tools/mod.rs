//! Command metadata tooling
//!
//! Prepares `content/commands` from the JSON command metadata shipped in the
//! DiceDB source tree (`<dicedb-root>/src/commands/<name>.json`).

mod frontmatter;
mod valkey_index;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::helpers::parse_version;

pub use frontmatter::{
    build_frontmatter, build_title, process_file, rewrite_md_links, ProcessOutcome, ATTRIBUTION,
};
pub use valkey_index::{generate_valkey_index, render_valkey_index, IndexRow};

/// Errors raised by the metadata tools
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no Valkey version mapped for DiceDB {0}")]
    NoVersionMapping(String),

    #[error("invalid version {0:?}")]
    InvalidVersion(String),

    #[error("unreadable command metadata {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ToolError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Metadata of one command, the value under the file's single top-level key
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommandMetadata {
    pub summary: String,
    pub since: String,
    pub acl_categories: Vec<String>,
}

/// Path of the metadata file for a command named `name`
pub fn metadata_path(dicedb_root: &Path, name: &str) -> PathBuf {
    dicedb_root
        .join("src")
        .join("commands")
        .join(format!("{}.json", name))
}

/// Load command metadata; `None` when the file holds an empty object
pub fn load_command_meta(path: &Path) -> Result<Option<CommandMetadata>, ToolError> {
    let content = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    let metadata_error = |message: String| ToolError::Metadata {
        path: path.to_path_buf(),
        message,
    };

    let data: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| metadata_error(e.to_string()))?;

    match data.into_iter().next() {
        Some((_, value)) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| metadata_error(e.to_string())),
        None => Ok(None),
    }
}

/// Quote a scalar for YAML output when it contains special characters
pub fn yaml_escape(s: &str) -> String {
    const SPECIAL: &str = ":{}[]&*?|>!%@`#,\"'\\";

    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().any(|c| SPECIAL.contains(c)) {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

fn version(v: &str) -> Result<Vec<u64>, ToolError> {
    parse_version(v).ok_or_else(|| ToolError::InvalidVersion(v.to_string()))
}

/// Mapping between Valkey releases and the DiceDB releases built on them
#[derive(Debug, Clone, PartialEq)]
pub struct VersionMap {
    /// `(valkey, dicedb)` pairs in configured order
    pub entries: Vec<(String, String)>,
    /// The DiceDB release the docs describe
    pub current_dicedb: String,
}

impl VersionMap {
    pub fn new(entries: Vec<(String, String)>, current_dicedb: impl Into<String>) -> Self {
        Self {
            entries,
            current_dicedb: current_dicedb.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config
                .version_map
                .iter()
                .map(|m| (m.valkey.clone(), m.dicedb.clone()))
                .collect(),
            config.current_dicedb_version.clone(),
        )
    }

    /// Greatest Valkey version shipped with a DiceDB release `<= dicedb`
    pub fn max_valkey_for(&self, dicedb: &str) -> Result<Option<String>, ToolError> {
        let target = version(dicedb)?;
        let mut best: Option<(Vec<u64>, &str)> = None;

        for (valkey, mapped) in &self.entries {
            if version(mapped)? > target {
                continue;
            }
            let candidate = version(valkey)?;
            if best.as_ref().map_or(true, |(v, _)| candidate > *v) {
                best = Some((candidate, valkey.as_str()));
            }
        }

        Ok(best.map(|(_, v)| v.to_string()))
    }

    /// [`VersionMap::max_valkey_for`] the current release, which must be mapped
    pub fn current_max_valkey(&self) -> Result<String, ToolError> {
        self.max_valkey_for(&self.current_dicedb)?
            .ok_or_else(|| ToolError::NoVersionMapping(self.current_dicedb.clone()))
    }

    /// First DiceDB release whose Valkey base is `>= valkey_since`.
    ///
    /// Empty for an empty or unmapped version.
    pub fn dicedb_since(&self, valkey_since: &str) -> Result<String, ToolError> {
        if valkey_since.is_empty() {
            return Ok(String::new());
        }

        let since = version(valkey_since)?;
        for (valkey, dicedb) in &self.entries {
            if version(valkey)? >= since {
                return Ok(dicedb.clone());
            }
        }
        Ok(String::new())
    }

    /// Whether a command added in Valkey `since` ships with `max_valkey`
    pub fn is_supported(since: &str, max_valkey: &str) -> Result<bool, ToolError> {
        if since.is_empty() || max_valkey.is_empty() {
            return Ok(true);
        }
        Ok(version(since)? <= version(max_valkey)?)
    }
}

impl Default for VersionMap {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}
