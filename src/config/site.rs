//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

const LOGO_URL: &str = "https://avatars.githubusercontent.com/u/112580013?s=400&u=cc152e1bb504e69a4d3bf28ec39731362a0a03c3&v=4";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub logo: String,
    pub github_url: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Layout
    #[serde(default = "default_nav")]
    pub nav: Vec<NavLink>,
    #[serde(default = "default_features")]
    pub features: Vec<FeatureCard>,

    // Code highlighting
    pub highlight_theme: String,
    pub line_numbers: bool,

    // Command metadata tooling
    pub current_dicedb_version: String,
    #[serde(default = "default_version_map")]
    pub version_map: Vec<VersionMapping>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DiceDB".to_string(),
            description:
                "High-performance key/value datastore built on Valkey with Redis compatibility"
                    .to_string(),
            tagline: "Open-source, low-latency key/value engine built on Valkey with hierarchical storage tiers.".to_string(),
            logo: LOGO_URL.to_string(),
            github_url: "https://github.com/dicedb/dicedb".to_string(),
            language: "en".to_string(),

            url: "https://dicedb.io".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            nav: default_nav(),
            features: default_features(),

            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,

            current_dicedb_version: "1.0.0".to_string(),
            version_map: default_version_map(),

            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Nav links shown inside the docs layout.
    ///
    /// The docs sidebar already covers navigation, so the top-level sections
    /// that live outside `/docs` are dropped.
    pub fn docs_nav(&self) -> Vec<NavLink> {
        self.nav
            .iter()
            .filter(|link| !matches!(link.text.as_str(), "Blog" | "Versions" | "Commands"))
            .cloned()
            .collect()
    }
}

/// A top navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub url: String,
}

impl NavLink {
    fn new(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: url.to_string(),
        }
    }
}

/// A feature card on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCard {
    pub title: String,
    pub body: String,
    /// Accent colour used for the card gradient
    #[serde(default = "default_accent")]
    pub accent: String,
}

/// One `(valkey_version, dicedb_version)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMapping {
    pub valkey: String,
    pub dicedb: String,
}

fn default_nav() -> Vec<NavLink> {
    vec![
        NavLink::new("Docs", "/docs"),
        NavLink::new("Commands", "/commands"),
        NavLink::new("Blog", "/blog"),
        NavLink::new("Versions", "/versions"),
    ]
}

fn default_accent() -> String {
    "yellow".to_string()
}

fn default_features() -> Vec<FeatureCard> {
    let card = |title: &str, body: &str, accent: &str| FeatureCard {
        title: title.to_string(),
        body: body.to_string(),
        accent: accent.to_string(),
    };
    vec![
        card(
            "Multi-tiered",
            "Automatically spills evicted keys to disk and restores them on cache misses.",
            "yellow",
        ),
        card(
            "Rich Data Structures",
            "Supports strings, hashes, lists, sets, sorted sets, and advanced data structures like HyperLogLog.",
            "blue",
        ),
        card(
            "High Performance",
            "High-performance key/value datastore supporting caching, message queues, and diverse workloads.",
            "green",
        ),
        card(
            "Built on Valkey",
            "Extends Valkey with Redis-compatible capabilities. Works seamlessly with all Redis and Valkey SDKs.",
            "red",
        ),
        card(
            "Open Source",
            "Free and open source under BSD-3 Clause License.",
            "purple",
        ),
    ]
}

fn default_version_map() -> Vec<VersionMapping> {
    vec![VersionMapping {
        valkey: "8.0.6".to_string(),
        dicedb: "1.0.0".to_string(),
    }]
}
