//! List site content

use anyhow::{bail, Result};

use crate::content::{Collection, ContentSource, Source};
use crate::pages::{command_name, sorted_versions};
use crate::routes::static_routes;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let source = Source::load(site)?;
    for line in lines(&source, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// The listing as printed lines
pub fn lines(source: &dyn ContentSource, content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();

    if matches!(content_type, "route" | "routes") {
        let routes = static_routes(source);
        out.push(format!("Routes ({}):", routes.len()));
        out.extend(routes.iter().map(|r| format!("  {}", r)));
        return Ok(out);
    }

    let collection: Collection = match content_type.parse() {
        Ok(collection) => collection,
        Err(_) => bail!(
            "Unknown type: {}. Use: docs, blog, commands, versions, routes",
            content_type
        ),
    };

    match collection {
        Collection::Docs => {
            out.push(format!("Docs ({}):", source.docs().len()));
            for page in source.docs() {
                out.push(format!(
                    "  {} - {} [{}]",
                    page.url,
                    page.data.title,
                    page.source.display()
                ));
            }
        }
        Collection::Blog => {
            let mut posts: Vec<_> = source.blog().iter().collect();
            posts.sort_by(|a, b| b.data.date.cmp(&a.data.date));
            out.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                out.push(format!(
                    "  {} - {} by {} [{}]",
                    post.data.date.format("%Y-%m-%d"),
                    post.data.title,
                    post.data.author,
                    post.source.display()
                ));
            }
        }
        Collection::Commands => {
            let mut commands: Vec<_> = source.commands().iter().collect();
            commands.sort_by(|a, b| a.slug().cmp(b.slug()));
            out.push(format!("Commands ({}):", commands.len()));
            for page in commands {
                let since = if page.data.dicedb_since.is_empty() {
                    String::new()
                } else {
                    format!(" (since {})", page.data.dicedb_since)
                };
                out.push(format!("  {}{}", command_name(page), since));
            }
        }
        Collection::Versions => {
            let versions = sorted_versions(source);
            out.push(format!("Versions ({}):", versions.len()));
            for page in versions {
                out.push(format!(
                    "  {} (Valkey {})",
                    page.data.version, page.data.valkey_version
                ));
            }
        }
    }

    Ok(out)
}
