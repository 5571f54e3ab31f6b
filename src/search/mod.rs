//! Command search and letter grouping for the commands index
//!
//! [`derive_view`] is a pure function of the command list and the search term.
//! The generated page calls it with an empty term, the dev server calls it for
//! `?q=` requests, and the page script mirrors the same rules in the browser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::{CommandMeta, Page};

/// The projection of a command page the search view works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub slug: String,
    pub url: String,
    pub description: String,
}

impl CommandRecord {
    pub fn from_page(page: &Page<CommandMeta>) -> Self {
        Self {
            slug: page.slug().to_string(),
            url: page.url.clone(),
            description: page.data.description.clone(),
        }
    }

    /// `acl-cat` is shown as `ACL CAT`
    pub fn display_name(&self) -> String {
        display_name(&self.slug)
    }
}

/// Display form of a command slug
pub fn display_name(slug: &str) -> String {
    slug.to_uppercase().replace('-', " ")
}

/// Commands sharing a group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandGroup {
    pub letter: String,
    pub commands: Vec<CommandRecord>,
}

/// Everything the commands index shows for one search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    pub search: String,
    /// Matching records in their original order
    pub filtered: Vec<CommandRecord>,
    /// Groups in ascending key order
    pub groups: Vec<CommandGroup>,
    pub count: usize,
    /// `"N results"`, only while a search term is set
    pub result_label: Option<String>,
    /// Replaces the groups when nothing matches
    pub empty_message: Option<String>,
}

/// Records whose slug or description contains `search`, ignoring case.
///
/// An empty term matches everything.
pub fn filter_commands(commands: &[CommandRecord], search: &str) -> Vec<CommandRecord> {
    if search.is_empty() {
        return commands.to_vec();
    }

    let needle = search.to_lowercase();
    commands
        .iter()
        .filter(|cmd| {
            cmd.slug.to_lowercase().contains(&needle)
                || cmd.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Group key of a slug: its first character, uppercased.
///
/// Non-letters are kept as their own key and an empty slug maps to `""`.
pub fn group_key(slug: &str) -> String {
    slug.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Partition records by [`group_key`], keeping their relative order
pub fn group_commands(commands: &[CommandRecord]) -> Vec<CommandGroup> {
    let mut groups: BTreeMap<String, Vec<CommandRecord>> = BTreeMap::new();
    for cmd in commands {
        groups
            .entry(group_key(&cmd.slug))
            .or_default()
            .push(cmd.clone());
    }

    groups
        .into_iter()
        .map(|(letter, commands)| CommandGroup { letter, commands })
        .collect()
}

/// `1 result`, `0 results`, `12 results`
pub fn result_label(count: usize) -> String {
    format!("{} result{}", count, if count == 1 { "" } else { "s" })
}

/// Filter, group and summarize `commands` for `search`
pub fn derive_view(commands: &[CommandRecord], search: &str) -> CommandView {
    let filtered = filter_commands(commands, search);
    let count = filtered.len();

    let (groups, empty_message) = if filtered.is_empty() {
        (
            Vec::new(),
            Some(format!("No commands found matching \"{}\"", search)),
        )
    } else {
        (group_commands(&filtered), None)
    };

    CommandView {
        search: search.to_string(),
        result_label: (!search.is_empty()).then(|| result_label(count)),
        filtered,
        groups,
        count,
        empty_message,
    }
}
