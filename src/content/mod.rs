//! Content module - collections, front-matter schemas and the content source

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod page;
mod source;
mod tree;

pub use error::ContentError;
pub use frontmatter::{BlogMeta, CommandMeta, DocMeta, FrontMatter, VersionMeta};
pub use markdown::{MarkdownRenderer, RenderedBody, TocItem};
pub use page::{slugs_from_path, Collection, Page};
pub use source::{find_page, ContentSource, Source};
pub use tree::{FolderMeta, PageTree, TreeNode};
