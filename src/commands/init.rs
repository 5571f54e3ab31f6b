//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const SITE_CONFIG: &str = r#"# Site
title: DiceDB
description: High-performance key/value datastore built on Valkey with Redis compatibility
tagline: A high-performance key/value datastore built on Valkey
github_url: https://github.com/dicedb/dicedb
language: en

# URL
url: https://dicedb.io
root: /

# Directory
content_dir: content
static_dir: static
public_dir: public

# Writing
highlight_theme: base16-ocean.dark
line_numbers: false

# Releases
current_dicedb_version: 1.0.0
version_map:
  - valkey: 8.0.6
    dicedb: 1.0.0
"#;

const DOCS_INDEX: &str = r#"---
title: Introduction
description: What DiceDB is and how to get started
---

DiceDB is a high-performance key/value datastore built on Valkey.

## Quick Start

```bash
$ dicedocs server
```
"#;

const DOCS_META: &str = r#"{
  "title": "Docs",
  "pages": ["index", "..."]
}
"#;

const COMMAND_GET: &str = r#"---
title: GET
description: Returns the string value of a key.
synopsis: GET key
since: "1.0.0"
dicedb_since: "1.0.0"
acl_categories:
  - "@read"
  - "@string"
  - "@fast"
---

Returns the string value of `key`. If the key does not exist, `nil` is returned.

```bash
GET greeting
```
"#;

const VERSION_1_0_0: &str = r#"---
version: 1.0.0
valkey_version: 8.0.6
---

First release of DiceDB, based on Valkey 8.0.6.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        bail!(
            "{} already contains a {}",
            target_dir.display(),
            CONFIG_FILE
        );
    }

    // Create directory structure
    for dir in [
        "content/docs",
        "content/blog",
        "content/commands",
        "content/versions",
        "static",
    ] {
        fs::create_dir_all(target_dir.join(dir))?;
    }

    fs::write(target_dir.join(CONFIG_FILE), SITE_CONFIG)?;
    fs::write(target_dir.join("content/docs/index.md"), DOCS_INDEX)?;
    fs::write(target_dir.join("content/docs/meta.json"), DOCS_META)?;
    fs::write(target_dir.join("content/commands/get.md"), COMMAND_GET)?;
    fs::write(target_dir.join("content/versions/v1-0-0.md"), VERSION_1_0_0)?;

    // Create a sample post
    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on the DiceDB blog
author: DiceDB
date: {}
---

Welcome to the DiceDB blog.
"#,
        today
    );
    fs::write(target_dir.join("content/blog/hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert!(dir.path().join("content/docs/index.md").is_file());
        assert!(dir.path().join("content/blog/hello-world.md").is_file());
        assert!(dir.path().join("static").is_dir());

        let config = crate::config::SiteConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.title, "DiceDB");
        assert_eq!(config.version_map.len(), 1);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
