//! MDX table of every Valkey command DiceDB supports

use std::fs;
use std::path::Path;

use super::{build_title, load_command_meta, ToolError, VersionMap};

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub title: String,
    pub summary: String,
    pub dicedb_since: String,
    pub since: String,
}

impl IndexRow {
    /// `ACL CAT` -> `https://valkey.io/commands/acl-cat`
    pub fn doc_url(&self) -> String {
        format!(
            "https://valkey.io/commands/{}",
            self.title.to_lowercase().replace(' ', "-")
        )
    }
}

/// Render the index page for `rows`, sorted by title
pub fn render_valkey_index(rows: &[IndexRow]) -> String {
    let mut rows = rows.to_vec();
    rows.sort_by(|a, b| a.title.cmp(&b.title));

    let mut lines = vec![
        "---".to_string(),
        "title: Inherited from Valkey".to_string(),
        "description: List of commands supported in DiceDB that are inherited from Valkey."
            .to_string(),
        "---".to_string(),
        String::new(),
        "| Command | Doc | Synopsis | Min DiceDB | Min Valkey |".to_string(),
        "| ------- | ---- | -------- | ------------------ | -------------------------- |"
            .to_string(),
    ];

    for row in &rows {
        lines.push(format!(
            "| {} | [doc]({}) | {} | {} | {} |",
            row.title,
            row.doc_url(),
            row.summary.replace('|', "\\|"),
            row.dicedb_since,
            row.since
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Scan `<dicedb_root>/src/commands/*.json` and write the index to `output`.
///
/// Returns the number of commands listed.
pub fn generate_valkey_index(
    dicedb_root: &Path,
    output: &Path,
    versions: &VersionMap,
) -> Result<usize, ToolError> {
    let max_valkey = versions.current_max_valkey()?;

    let pattern = dicedb_root.join("src").join("commands").join("*.json");
    let mut paths: Vec<_> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    let mut rows = Vec::new();
    for json_path in paths {
        let meta = match load_command_meta(&json_path) {
            Ok(Some(meta)) => meta,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Skipping {}", e);
                continue;
            }
        };

        if !VersionMap::is_supported(&meta.since, &max_valkey)? {
            tracing::debug!("Skipping {:?}, since {}", json_path, meta.since);
            continue;
        }

        rows.push(IndexRow {
            title: build_title(&json_path),
            dicedb_since: versions.dicedb_since(&meta.since)?,
            summary: meta.summary,
            since: meta.since,
        });
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| ToolError::io(parent, e))?;
    }
    fs::write(output, render_valkey_index(&rows)).map_err(|e| ToolError::io(output, e))?;

    tracing::info!("Generated {:?} with {} commands", output, rows.len());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(title: &str, summary: &str) -> IndexRow {
        IndexRow {
            title: title.to_string(),
            summary: summary.to_string(),
            dicedb_since: "1.0.0".to_string(),
            since: "2.0.0".to_string(),
        }
    }

    #[test]
    fn test_render_valkey_index() {
        let out = render_valkey_index(&[row("SET", "Sets a key."), row("ACL CAT", "a|b")]);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[1], "title: Inherited from Valkey");
        assert_eq!(lines[5], "| Command | Doc | Synopsis | Min DiceDB | Min Valkey |");
        assert_eq!(
            lines[7],
            r"| ACL CAT | [doc](https://valkey.io/commands/acl-cat) | a\|b | 1.0.0 | 2.0.0 |"
        );
        assert!(lines[8].starts_with("| SET |"));
        assert!(out.ends_with("|\n"));
    }

    #[test]
    fn test_generate_valkey_index() {
        let dir = TempDir::new().unwrap();
        let commands = dir.path().join("src/commands");
        fs::create_dir_all(&commands).unwrap();
        fs::write(
            commands.join("get.json"),
            r#"{"GET": {"summary": "Returns the string value of a key.", "since": "1.0.0"}}"#,
        )
        .unwrap();
        fs::write(
            commands.join("append.json"),
            r#"{"APPEND": {"summary": "Appends a string.", "since": "2.0.0"}}"#,
        )
        .unwrap();
        fs::write(
            commands.join("hgetex.json"),
            r#"{"HGETEX": {"summary": "Too new.", "since": "9.0.0"}}"#,
        )
        .unwrap();
        fs::write(commands.join("broken.json"), "{").unwrap();

        let output = dir.path().join("out/valkey.mdx");
        let count = generate_valkey_index(dir.path(), &output, &VersionMap::default()).unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(&output).unwrap();
        let append = content.find("| APPEND |").unwrap();
        let get = content.find("| GET |").unwrap();
        assert!(append < get);
        assert!(!content.contains("HGETEX"));
    }

    #[test]
    fn test_generate_requires_mapping() {
        let dir = TempDir::new().unwrap();
        let versions = VersionMap::new(Vec::new(), "1.0.0");
        let result = generate_valkey_index(dir.path(), &dir.path().join("out.mdx"), &versions);
        assert!(matches!(result, Err(ToolError::NoVersionMapping(_))));
    }
}
