//! Generate the Valkey commands index page

use anyhow::Result;
use std::path::Path;

use crate::tools::{generate_valkey_index, VersionMap};
use crate::Site;

pub fn run(site: &Site, dicedb_root: &Path, output: &Path) -> Result<()> {
    let versions = VersionMap::from_config(&site.config);
    let count = generate_valkey_index(dicedb_root, output, &versions)?;
    println!("Generated {} with {} commands", output.display(), count);
    Ok(())
}
