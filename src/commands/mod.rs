//! CLI command implementations

pub mod clean;
pub mod frontmatter;
pub mod generate;
pub mod init;
pub mod list;
pub mod valkey_index;
