//! Command metadata tooling feeding the generated site

use std::fs;
use std::path::Path;

use dicedocs::commands;
use dicedocs::Site;
use tempfile::TempDir;

fn write(base: &Path, relative: &str, content: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn dicedb_root(dir: &Path) -> std::path::PathBuf {
    let root = dir.join("dicedb");
    write(
        &root,
        "src/commands/getdel.json",
        r#"{"GETDEL": {"summary": "Returns the string value of a key after deleting the key.", "since": "6.2.0", "acl_categories": ["WRITE", "STRING", "FAST"]}}"#,
    );
    write(
        &root,
        "src/commands/acl-cat.json",
        r#"{"CAT": {"summary": "Lists the ACL categories, or the commands inside a category.", "since": "6.0.0", "container": "ACL"}}"#,
    );
    write(
        &root,
        "src/commands/hgetex.json",
        r#"{"HGETEX": {"summary": "Gets hash fields and sets their expiry.", "since": "9.0.0"}}"#,
    );
    root
}

#[test]
fn test_frontmatter_then_generate() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("site");
    let root = dicedb_root(dir.path());

    write(&base, "content/commands/getdel.md", "Get the value and delete the key. See [GET](get.md).\n");
    write(&base, "content/commands/acl-cat.md", "Lists categories.\n");
    write(&base, "content/commands/hgetex.md", "Not supported yet.\n");
    write(&base, "content/commands/unknown.md", "No metadata.\n");

    let site = Site::new(&base).unwrap();
    let files: Vec<_> = ["getdel", "acl-cat", "hgetex", "unknown", "missing"]
        .iter()
        .map(|name| base.join(format!("content/commands/{}.md", name)))
        .collect();

    let modified = commands::frontmatter::run(&site, &root, &files).unwrap();
    assert_eq!(modified, 2);
    assert!(!base.join("content/commands/hgetex.md").exists());
    assert!(!base.join("content/commands/unknown.md").exists());

    // A second pass leaves processed files alone
    let again = commands::frontmatter::run(&site, &root, &files[..2]).unwrap();
    assert_eq!(again, 0);

    site.generate().unwrap();

    let getdel = fs::read_to_string(site.public_dir.join("commands/getdel/index.html")).unwrap();
    assert!(getdel.contains("<title>GETDEL - DiceDB Commands</title>"));
    assert!(getdel.contains(r#"<li class="chip">@write</li>"#));
    assert!(getdel.contains("Valkey 6.2.0"));
    assert!(getdel.contains(r#"href="get""#));

    let index = fs::read_to_string(site.public_dir.join("commands/index.html")).unwrap();
    assert!(index.contains("<code>ACL CAT</code>"));
    assert!(!index.contains("HGETEX"));
}

#[test]
fn test_valkey_index_is_a_docs_page() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("site");
    let root = dicedb_root(dir.path());
    write(&base, "content/docs/index.md", "---\ntitle: Introduction\n---\nHi\n");

    let site = Site::new(&base).unwrap();
    let output = base.join("content/docs/commands/valkey.mdx");
    commands::valkey_index::run(&site, &root, &output).unwrap();

    let mdx = fs::read_to_string(&output).unwrap();
    assert!(mdx.contains("| ACL CAT | [doc](https://valkey.io/commands/acl-cat) |"));
    assert!(mdx.contains("| GETDEL |"));
    assert!(!mdx.contains("HGETEX"));

    site.generate().unwrap();
    let page = fs::read_to_string(site.public_dir.join("docs/commands/valkey/index.html")).unwrap();
    assert!(page.contains("<title>Inherited from Valkey</title>"));
    assert!(page.contains("<table>"));
}
