//! Docs navigation tree, ordered by `meta.json` files

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{DocMeta, Page};

/// Folder settings read from `meta.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FolderMeta {
    pub title: Option<String>,
    /// Explicit child order. `...` expands to the remaining children sorted by
    /// name, and `---Label---` inserts a separator.
    pub pages: Vec<String>,
    pub default_open: bool,
}

/// A node of the docs sidebar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Page {
        name: String,
        url: String,
    },
    Folder {
        name: String,
        /// URL of the folder's `index.md`, if any
        index: Option<String>,
        default_open: bool,
        children: Vec<TreeNode>,
    },
    Separator {
        name: String,
    },
}

/// Root of the docs sidebar
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageTree {
    pub name: String,
    pub children: Vec<TreeNode>,
}

#[derive(Default)]
struct Dir<'a> {
    index: Option<&'a Page<DocMeta>>,
    files: BTreeMap<String, &'a Page<DocMeta>>,
    dirs: BTreeMap<String, Dir<'a>>,
}

impl PageTree {
    /// Build the tree from docs pages and per-folder meta, keyed by folder slugs
    pub fn build(pages: &[Page<DocMeta>], metas: &HashMap<Vec<String>, FolderMeta>) -> Self {
        let mut root = Dir::default();

        for page in pages {
            let (folder, file) = if page.is_index() {
                (page.slugs.as_slice(), None)
            } else {
                match page.slugs.split_last() {
                    Some((last, parent)) => (parent, Some(last)),
                    None => (page.slugs.as_slice(), None),
                }
            };

            let mut dir = &mut root;
            for segment in folder {
                dir = dir.dirs.entry(segment.clone()).or_default();
            }
            match file {
                Some(name) => {
                    dir.files.insert(name.clone(), page);
                }
                None => dir.index = Some(page),
            }
        }

        let root_meta = metas.get(&Vec::<String>::new()).cloned().unwrap_or_default();
        let mut children = Vec::new();
        // The docs root index is listed as an ordinary page
        if let Some(index) = root.index.take() {
            root.files.insert("index".to_string(), index);
        }
        build_children(&mut root, &root_meta, &mut Vec::new(), metas, &mut children);

        PageTree {
            name: root_meta.title.unwrap_or_else(|| "Docs".to_string()),
            children,
        }
    }
}

fn build_children(
    dir: &mut Dir<'_>,
    meta: &FolderMeta,
    path: &mut Vec<String>,
    metas: &HashMap<Vec<String>, FolderMeta>,
    out: &mut Vec<TreeNode>,
) {
    let mut nodes: BTreeMap<String, TreeNode> = BTreeMap::new();

    for (name, page) in &dir.files {
        nodes.insert(
            name.clone(),
            TreeNode::Page {
                name: page.data.title.clone(),
                url: page.url.clone(),
            },
        );
    }

    for (name, sub) in dir.dirs.iter_mut() {
        path.push(name.clone());
        let sub_meta = metas.get(&*path).cloned().unwrap_or_default();
        let mut children = Vec::new();
        build_children(sub, &sub_meta, path, metas, &mut children);
        path.pop();

        let title = sub_meta
            .title
            .clone()
            .or_else(|| sub.index.map(|p| p.data.title.clone()))
            .unwrap_or_else(|| title_case(name));

        nodes.insert(
            name.clone(),
            TreeNode::Folder {
                name: title,
                index: sub.index.map(|p| p.url.clone()),
                default_open: sub_meta.default_open,
                children,
            },
        );
    }

    if meta.pages.is_empty() {
        out.extend(nodes.into_values());
        return;
    }

    // Resolve the explicit order first so `...` only expands to unlisted items
    let mut listed: Vec<Option<TreeNode>> = Vec::new();
    let mut rest_at = None;
    for entry in &meta.pages {
        if entry == "..." {
            rest_at = Some(listed.len());
        } else if let Some(label) = entry
            .strip_prefix("---")
            .and_then(|e| e.strip_suffix("---"))
        {
            listed.push(Some(TreeNode::Separator {
                name: label.to_string(),
            }));
        } else if let Some(node) = nodes.remove(entry.as_str()) {
            listed.push(Some(node));
        } else {
            tracing::warn!("meta.json lists unknown page {:?} in /{}", entry, path.join("/"));
        }
    }

    for (i, node) in listed.into_iter().enumerate() {
        if rest_at == Some(i) {
            out.extend(std::mem::take(&mut nodes).into_values());
        }
        out.extend(node);
    }
    if rest_at.is_some() {
        out.extend(nodes.into_values());
    }
}

fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Collection;
    use std::path::PathBuf;

    fn doc(source: &str, title: &str) -> Page<DocMeta> {
        let source = PathBuf::from(source);
        let slugs = crate::content::page::slugs_from_path(&source);
        Page {
            collection: Collection::Docs,
            url: Collection::Docs.page_url(&slugs),
            slugs,
            data: DocMeta {
                title: title.to_string(),
                description: None,
                icon: None,
                full: None,
            },
            body: String::new(),
            toc: Vec::new(),
            raw: String::new(),
            source,
        }
    }

    fn names(nodes: &[TreeNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                TreeNode::Page { name, .. }
                | TreeNode::Folder { name, .. }
                | TreeNode::Separator { name } => name.clone(),
            })
            .collect()
    }

    #[test]
    fn test_tree_default_order() {
        let pages = vec![
            doc("index.md", "Introduction"),
            doc("install.md", "Install"),
            doc("get-started/index.md", "Get Started"),
            doc("get-started/hello.md", "Hello"),
        ];
        let tree = PageTree::build(&pages, &HashMap::new());
        assert_eq!(tree.name, "Docs");
        assert_eq!(names(&tree.children), vec!["Get Started", "Introduction", "Install"]);

        match &tree.children[0] {
            TreeNode::Folder {
                index, children, ..
            } => {
                assert_eq!(index.as_deref(), Some("/docs/get-started"));
                assert_eq!(names(children), vec!["Hello"]);
            }
            other => panic!("expected folder, got {:?}", other),
        }
    }

    #[test]
    fn test_tree_meta_order_and_rest() {
        let pages = vec![
            doc("index.md", "Introduction"),
            doc("install.md", "Install"),
            doc("faq.md", "FAQ"),
            doc("tiers/index.md", "Tiers"),
        ];
        let mut metas = HashMap::new();
        metas.insert(
            Vec::new(),
            FolderMeta {
                title: Some("DiceDB".into()),
                pages: vec![
                    "index".into(),
                    "---Guides---".into(),
                    "...".into(),
                    "faq".into(),
                ],
                default_open: false,
            },
        );

        let tree = PageTree::build(&pages, &metas);
        assert_eq!(tree.name, "DiceDB");
        assert_eq!(
            names(&tree.children),
            vec!["Introduction", "Guides", "Install", "Tiers", "FAQ"]
        );
    }

    #[test]
    fn test_tree_meta_without_rest_omits_unlisted() {
        let pages = vec![doc("a.md", "A"), doc("b.md", "B")];
        let mut metas = HashMap::new();
        metas.insert(
            Vec::new(),
            FolderMeta {
                pages: vec!["b".into()],
                ..Default::default()
            },
        );
        let tree = PageTree::build(&pages, &metas);
        assert_eq!(names(&tree.children), vec!["B"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("data-types"), "Data Types");
    }
}
