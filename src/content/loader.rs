//! Content loader - loads collections from the content directory

use anyhow::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::page::slugs_from_path;
use super::{Collection, ContentError, FolderMeta, FrontMatter, MarkdownRenderer, Page};
use crate::Site;

/// Loads content collections from `content/<collection>/`
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &site.config.highlight_theme,
            site.config.line_numbers,
        );
        Self { site, renderer }
    }

    /// Load every page of a collection.
    ///
    /// Pages that fail schema validation are logged and skipped.
    pub fn load_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<Page<T>>> {
        let root = self.site.content_dir.join(collection.dir_name());
        if !root.exists() {
            tracing::debug!("No {} collection at {:?}", collection, root);
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_page(collection, &root, path) {
                    Ok(page) => pages.push(page),
                    Err(e) => tracing::warn!("Skipping {}: {}", collection, e),
                }
            }
        }

        tracing::debug!("Loaded {} {} pages", pages.len(), collection);
        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page<T: DeserializeOwned>(
        &self,
        collection: Collection,
        root: &Path,
        path: &Path,
    ) -> Result<Page<T>, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (data, body) = FrontMatter::parse::<T>(path, &content)?;

        let source = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let slugs = slugs_from_path(&source);
        let url = collection.page_url(&slugs);
        let rendered = self.renderer.render(body);

        Ok(Page {
            collection,
            slugs,
            url,
            data,
            body: rendered.html,
            toc: rendered.toc,
            raw: body.to_string(),
            source,
        })
    }

    /// Load every `meta.json` under the docs collection, keyed by folder slugs
    pub fn load_folder_metas(&self) -> Result<HashMap<Vec<String>, FolderMeta>> {
        let root = self.site.content_dir.join(Collection::Docs.dir_name());
        let mut metas = HashMap::new();
        if !root.exists() {
            return Ok(metas);
        }

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.file_name().and_then(|n| n.to_str()) != Some("meta.json")
            {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
            let meta: FolderMeta =
                serde_json::from_str(&content).map_err(|source| ContentError::Meta {
                    path: path.to_path_buf(),
                    source,
                })?;

            let folder: Vec<String> = path
                .parent()
                .and_then(|p| p.strip_prefix(&root).ok())
                .map(|rel| {
                    rel.components()
                        .filter_map(|c| c.as_os_str().to_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            metas.insert(folder, meta);
        }

        Ok(metas)
    }
}

/// Check if a file is a markdown or MDX file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}
