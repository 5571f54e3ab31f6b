//! Page model and content collections

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::TocItem;

/// A content collection under `content/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Docs,
    Blog,
    Commands,
    Versions,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Docs,
        Collection::Blog,
        Collection::Commands,
        Collection::Versions,
    ];

    /// Directory name under the content dir
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Docs => "docs",
            Collection::Blog => "blog",
            Collection::Commands => "commands",
            Collection::Versions => "versions",
        }
    }

    /// URL prefix of the collection's pages
    pub fn url_prefix(&self) -> &'static str {
        match self {
            Collection::Docs => "/docs",
            Collection::Blog => "/blog",
            Collection::Commands => "/commands",
            Collection::Versions => "/versions",
        }
    }

    /// Build the URL of a page from its slugs
    pub fn page_url(&self, slugs: &[String]) -> String {
        if slugs.is_empty() {
            self.url_prefix().to_string()
        } else {
            format!("{}/{}", self.url_prefix(), slugs.join("/"))
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docs" | "doc" => Ok(Collection::Docs),
            "blog" | "post" | "posts" => Ok(Collection::Blog),
            "commands" | "command" => Ok(Collection::Commands),
            "versions" | "version" => Ok(Collection::Versions),
            other => Err(format!("unknown collection: {}", other)),
        }
    }
}

/// A parsed content page with typed front-matter `T`
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Collection the page belongs to
    pub collection: Collection,

    /// Path segments below the collection root
    pub slugs: Vec<String>,

    /// Site-relative URL
    pub url: String,

    /// Validated front-matter
    pub data: T,

    /// Rendered HTML body
    pub body: String,

    /// Headings of the body
    pub toc: Vec<TocItem>,

    /// Raw markdown body
    pub raw: String,

    /// Source path relative to the collection dir
    pub source: PathBuf,
}

impl<T> Page<T> {
    /// First slug segment, or `""` for a collection root page
    pub fn slug(&self) -> &str {
        self.slugs.first().map(String::as_str).unwrap_or("")
    }

    /// Slug of a page addressed by exactly one URL segment.
    ///
    /// Blog posts and commands live at `/<section>/<slug>`, so nested files
    /// and a collection `index.md` have no route.
    pub fn route_slug(&self) -> Option<&str> {
        match self.slugs.as_slice() {
            [slug] => Some(slug.as_str()),
            _ => None,
        }
    }

    /// Whether the page is a folder index (`index.md`)
    pub fn is_index(&self) -> bool {
        self.source.file_stem().and_then(|s| s.to_str()) == Some("index")
    }
}

/// Slugs for a source path relative to its collection dir.
///
/// `guides/setup.md` becomes `["guides", "setup"]`; a trailing `index` segment
/// maps to its folder.
pub fn slugs_from_path(relative: &Path) -> Vec<String> {
    let without_ext = relative.with_extension("");
    let mut slugs: Vec<String> = without_ext
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_string)
        .collect();

    if slugs.last().map(String::as_str) == Some("index") {
        slugs.pop();
    }

    slugs
}
