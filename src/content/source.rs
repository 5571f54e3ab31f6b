//! Content source - typed access to the loaded collections

use anyhow::Result;
use std::collections::HashMap;

use super::loader::ContentLoader;
use super::{
    BlogMeta, Collection, CommandMeta, DocMeta, FolderMeta, Page, PageTree, VersionMeta,
};
use crate::Site;

/// Read access to the parsed content collections
pub trait ContentSource {
    fn docs(&self) -> &[Page<DocMeta>];
    fn blog(&self) -> &[Page<BlogMeta>];
    fn commands(&self) -> &[Page<CommandMeta>];
    fn versions(&self) -> &[Page<VersionMeta>];

    /// Docs navigation tree
    fn page_tree(&self) -> &PageTree;

    /// Docs page by its slugs (empty for the docs root)
    fn doc(&self, slugs: &[String]) -> Option<&Page<DocMeta>> {
        find_page(self.docs(), slugs)
    }

    fn blog_post(&self, slug: &str) -> Option<&Page<BlogMeta>> {
        find_page(self.blog(), &[slug.to_string()])
    }

    fn command(&self, slug: &str) -> Option<&Page<CommandMeta>> {
        find_page(self.commands(), &[slug.to_string()])
    }

    /// URLs of every routable page in a collection, in source order
    fn urls(&self, collection: Collection) -> Vec<String> {
        match collection {
            Collection::Docs => self.docs().iter().map(|p| p.url.clone()).collect(),
            Collection::Blog => routable_urls(self.blog()),
            Collection::Commands => routable_urls(self.commands()),
            Collection::Versions => self.versions().iter().map(|p| p.url.clone()).collect(),
        }
    }
}

fn routable_urls<T>(pages: &[Page<T>]) -> Vec<String> {
    pages
        .iter()
        .filter(|p| p.route_slug().is_some())
        .map(|p| p.url.clone())
        .collect()
}

/// Find a page by its full slug path
pub fn find_page<'p, T>(pages: &'p [Page<T>], slugs: &[String]) -> Option<&'p Page<T>> {
    pages.iter().find(|p| p.slugs == slugs)
}

/// In-memory content source
#[derive(Debug, Clone, Default)]
pub struct Source {
    docs: Vec<Page<DocMeta>>,
    blog: Vec<Page<BlogMeta>>,
    commands: Vec<Page<CommandMeta>>,
    versions: Vec<Page<VersionMeta>>,
    tree: PageTree,
}

impl Source {
    /// Load every collection of a site
    pub fn load(site: &Site) -> Result<Self> {
        let loader = ContentLoader::new(site);

        let docs = loader.load_collection::<DocMeta>(Collection::Docs)?;
        let blog = loader.load_collection::<BlogMeta>(Collection::Blog)?;
        let commands = loader.load_collection::<CommandMeta>(Collection::Commands)?;
        let versions = loader.load_collection::<VersionMeta>(Collection::Versions)?;
        let metas = loader.load_folder_metas()?;

        tracing::info!(
            "Loaded {} docs, {} posts, {} commands and {} versions",
            docs.len(),
            blog.len(),
            commands.len(),
            versions.len()
        );

        Ok(Self::with_metas(docs, blog, commands, versions, &metas))
    }

    /// Build a source from already parsed pages
    pub fn new(
        docs: Vec<Page<DocMeta>>,
        blog: Vec<Page<BlogMeta>>,
        commands: Vec<Page<CommandMeta>>,
        versions: Vec<Page<VersionMeta>>,
    ) -> Self {
        Self::with_metas(docs, blog, commands, versions, &HashMap::new())
    }

    fn with_metas(
        docs: Vec<Page<DocMeta>>,
        blog: Vec<Page<BlogMeta>>,
        commands: Vec<Page<CommandMeta>>,
        versions: Vec<Page<VersionMeta>>,
        metas: &HashMap<Vec<String>, FolderMeta>,
    ) -> Self {
        let tree = PageTree::build(&docs, metas);
        Self {
            docs,
            blog,
            commands,
            versions,
            tree,
        }
    }
}

impl ContentSource for Source {
    fn docs(&self) -> &[Page<DocMeta>] {
        &self.docs
    }

    fn blog(&self) -> &[Page<BlogMeta>] {
        &self.blog
    }

    fn commands(&self) -> &[Page<CommandMeta>] {
        &self.commands
    }

    fn versions(&self) -> &[Page<VersionMeta>] {
        &self.versions
    }

    fn page_tree(&self) -> &PageTree {
        &self.tree
    }
}
