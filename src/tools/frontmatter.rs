//! Adds frontmatter to command markdown files

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

use super::{load_command_meta, metadata_path, yaml_escape, CommandMetadata, ToolError, VersionMap};

/// Blockquote placed above the imported command docs
pub const ATTRIBUTION: &str = "> This content is taken from the Valkey documentation and may retain some Valkey-specific references. Given that DiceDB extends Valkey the references will be compatible. Also, DiceDB-specific features or comments, if present, are included at the end of this doc.";

lazy_static! {
    static ref COMMAND_LINK: Regex = Regex::new(r"(/commands/[^/\s]+)\.md").unwrap();
    static ref RELATIVE_LINK: Regex = Regex::new(r"\(([^()\s]+)\.md\)").unwrap();
}

/// What [`process_file`] did with a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Frontmatter and attribution were prepended
    Updated,
    /// Left untouched
    Skipped,
    /// Removed because the command is unknown or not yet supported
    Deleted(String),
}

impl ProcessOutcome {
    pub fn changed(&self) -> bool {
        *self == ProcessOutcome::Updated
    }
}

/// `acl-cat.md` -> `ACL CAT`
pub fn build_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_uppercase()
        .replace('-', " ")
}

/// The `---` delimited YAML block for a command
pub fn build_frontmatter(
    meta: &CommandMetadata,
    title: &str,
    versions: &VersionMap,
) -> Result<String, ToolError> {
    let dicedb_since = versions.dicedb_since(&meta.since)?;

    let mut lines = vec![
        "---".to_string(),
        format!("title: {}", yaml_escape(title)),
        format!("synopsis: {}", yaml_escape(&meta.summary)),
        format!("since: \"{}\"", meta.since),
        format!("dicedb_since: \"{}\"", dicedb_since),
    ];

    if meta.acl_categories.is_empty() {
        lines.push("acl_categories: []".to_string());
    } else {
        lines.push("acl_categories:".to_string());
        lines.extend(
            meta.acl_categories
                .iter()
                .map(|cat| format!("  - \"@{}\"", cat.to_lowercase())),
        );
    }

    lines.push("---".to_string());
    Ok(lines.join("\n"))
}

/// Drop the `.md` extension from links to other command docs
pub fn rewrite_md_links(content: &str) -> String {
    let content = COMMAND_LINK.replace_all(content, "$1");
    RELATIVE_LINK.replace_all(&content, "($1)").into_owned()
}

/// Prepend frontmatter to one command file.
///
/// Files without metadata, or for commands newer than `max_valkey`, are
/// deleted. Files that already start with `---` are left alone.
pub fn process_file(
    md_path: &Path,
    dicedb_root: &Path,
    max_valkey: &str,
    versions: &VersionMap,
) -> Result<ProcessOutcome, ToolError> {
    let name = md_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let json_path = metadata_path(dicedb_root, name);

    if !json_path.exists() {
        fs::remove_file(md_path).map_err(|e| ToolError::io(md_path, e))?;
        return Ok(ProcessOutcome::Deleted(format!(
            "no metadata at {}",
            json_path.display()
        )));
    }

    let Some(meta) = load_command_meta(&json_path)? else {
        return Ok(ProcessOutcome::Skipped);
    };

    if !VersionMap::is_supported(&meta.since, max_valkey)? {
        fs::remove_file(md_path).map_err(|e| ToolError::io(md_path, e))?;
        return Ok(ProcessOutcome::Deleted(format!(
            "since {} > max valkey {}",
            meta.since, max_valkey
        )));
    }

    let content = fs::read_to_string(md_path).map_err(|e| ToolError::io(md_path, e))?;
    if content.starts_with("---") {
        return Ok(ProcessOutcome::Skipped);
    }

    let frontmatter = build_frontmatter(&meta, &build_title(&json_path), versions)?;
    let new_content = format!(
        "{}\n\n{}\n\n{}",
        frontmatter,
        ATTRIBUTION,
        rewrite_md_links(&content)
    );
    fs::write(md_path, new_content).map_err(|e| ToolError::io(md_path, e))?;

    Ok(ProcessOutcome::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn meta(summary: &str, since: &str, acl: &[&str]) -> CommandMetadata {
        CommandMetadata {
            summary: summary.to_string(),
            since: since.to_string(),
            acl_categories: acl.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_title() {
        assert_eq!(build_title(Path::new("content/commands/acl-cat.md")), "ACL CAT");
        assert_eq!(build_title(Path::new("append.json")), "APPEND");
    }

    #[test]
    fn test_build_frontmatter() {
        let fm = build_frontmatter(
            &meta("Returns the string value of a key.", "1.0.0", &["READ", "STRING"]),
            "GET",
            &VersionMap::default(),
        )
        .unwrap();

        assert_eq!(
            fm,
            "---\n\
             title: GET\n\
             synopsis: Returns the string value of a key.\n\
             since: \"1.0.0\"\n\
             dicedb_since: \"1.0.0\"\n\
             acl_categories:\n  - \"@read\"\n  - \"@string\"\n\
             ---"
        );
    }

    #[test]
    fn test_build_frontmatter_without_categories() {
        let fm = build_frontmatter(&meta("", "", &[]), "PING", &VersionMap::default()).unwrap();
        assert!(fm.contains("synopsis: ''\n"));
        assert!(fm.contains("dicedb_since: \"\"\n"));
        assert!(fm.contains("acl_categories: []\n"));
    }

    #[test]
    fn test_rewrite_md_links() {
        assert_eq!(
            rewrite_md_links("See [SET](/commands/set.md) and [GET](get.md)."),
            "See [SET](/commands/set) and [GET](get)."
        );
        assert_eq!(
            rewrite_md_links("Keep [readme](https://example.com/a b.md)"),
            "Keep [readme](https://example.com/a b.md)"
        );
    }

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir_all(dir.path().join("dicedb/src/commands")).unwrap();
            fs::create_dir_all(dir.path().join("content/commands")).unwrap();
            Self { dir }
        }

        fn root(&self) -> std::path::PathBuf {
            self.dir.path().join("dicedb")
        }

        fn metadata(&self, name: &str, json: &str) {
            fs::write(metadata_path(&self.root(), name), json).unwrap();
        }

        fn doc(&self, name: &str, content: &str) -> std::path::PathBuf {
            let path = self.dir.path().join("content/commands").join(format!("{}.md", name));
            fs::write(&path, content).unwrap();
            path
        }
    }

    #[test]
    fn test_process_file_adds_frontmatter() {
        let fx = Fixture::new();
        fx.metadata(
            "acl-cat",
            r#"{"CAT": {"summary": "Lists the ACL categories.", "since": "6.0.0", "acl_categories": ["SLOWCONNECTION"]}}"#,
        );
        let md = fx.doc("acl-cat", "Lists categories. See [ACL](/commands/acl-list.md).\n");

        let outcome = process_file(&md, &fx.root(), "8.0.6", &VersionMap::default()).unwrap();
        assert_eq!(outcome, ProcessOutcome::Updated);
        assert!(outcome.changed());

        let content = fs::read_to_string(&md).unwrap();
        assert!(content.starts_with("---\ntitle: ACL CAT\n"));
        assert!(content.contains("  - \"@slowconnection\"\n---\n\n> This content is taken"));
        assert!(content.ends_with("See [ACL](/commands/acl-list).\n"));
    }

    #[test]
    fn test_process_file_skips_existing_frontmatter() {
        let fx = Fixture::new();
        fx.metadata("get", r#"{"GET": {"since": "1.0.0"}}"#);
        let md = fx.doc("get", "---\ntitle: GET\n---\nBody");

        let outcome = process_file(&md, &fx.root(), "8.0.6", &VersionMap::default()).unwrap();
        assert_eq!(outcome, ProcessOutcome::Skipped);
        assert_eq!(fs::read_to_string(&md).unwrap(), "---\ntitle: GET\n---\nBody");
    }

    #[test]
    fn test_process_file_deletes_unknown_command() {
        let fx = Fixture::new();
        let md = fx.doc("mystery", "Body");

        let outcome = process_file(&md, &fx.root(), "8.0.6", &VersionMap::default()).unwrap();
        assert!(matches!(outcome, ProcessOutcome::Deleted(_)));
        assert!(!md.exists());
    }

    #[test]
    fn test_process_file_deletes_unsupported_command() {
        let fx = Fixture::new();
        fx.metadata("hgetex", r#"{"HGETEX": {"since": "9.0.0"}}"#);
        let md = fx.doc("hgetex", "Body");

        let outcome = process_file(&md, &fx.root(), "8.0.6", &VersionMap::default()).unwrap();
        assert_eq!(
            outcome,
            ProcessOutcome::Deleted("since 9.0.0 > max valkey 8.0.6".to_string())
        );
        assert!(!md.exists());
    }
}
