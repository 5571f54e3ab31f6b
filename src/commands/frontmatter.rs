//! Add frontmatter to command markdown files

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::tools::{process_file, ProcessOutcome, VersionMap};
use crate::Site;

/// Process each file, returning how many were updated
pub fn run(site: &Site, dicedb_root: &Path, files: &[PathBuf]) -> Result<usize> {
    let versions = VersionMap::from_config(&site.config);
    let max_valkey = versions.current_max_valkey()?;
    println!(
        "DiceDB {} -> max Valkey {}",
        versions.current_dicedb, max_valkey
    );

    let mut modified = 0;
    for file in files {
        if !file.exists() {
            tracing::warn!("{} does not exist, skipping", file.display());
            continue;
        }

        tracing::debug!("Processing {}", file.display());
        match process_file(file, dicedb_root, &max_valkey, &versions) {
            Ok(ProcessOutcome::Updated) => modified += 1,
            Ok(ProcessOutcome::Deleted(reason)) => {
                println!("deleted {} ({})", file.display(), reason);
            }
            Ok(ProcessOutcome::Skipped) => {}
            Err(e) => tracing::warn!("Skipping {}: {}", file.display(), e),
        }
    }

    println!("Added frontmatter to {} file(s)", modified);
    Ok(modified)
}
