//! Commands index with search, and command detail pages

use super::{layout, RenderContext, RenderError, Rendered};
use crate::content::{Collection, CommandMeta, ContentSource, Page};
use crate::search::{derive_view, display_name, CommandRecord};
use crate::templates::{CommandData, Metadata};

/// Records of every routable command, sorted by slug ignoring case
pub fn command_records(source: &dyn ContentSource) -> Vec<CommandRecord> {
    let mut pages: Vec<&Page<CommandMeta>> = source
        .commands()
        .iter()
        .filter(|p| p.route_slug().is_some())
        .collect();
    pages.sort_by(|a, b| {
        a.slug()
            .to_lowercase()
            .cmp(&b.slug().to_lowercase())
            .then_with(|| a.slug().cmp(b.slug()))
    });
    pages.into_iter().map(CommandRecord::from_page).collect()
}

pub(super) fn render_index(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
    search: &str,
) -> Result<Rendered, RenderError> {
    render_command_list(ctx, &command_records(source), search)
}

/// Render the commands index from records alone.
///
/// The dev server calls this with the records of `commands.json`.
pub fn render_command_list(
    ctx: &RenderContext<'_>,
    records: &[CommandRecord],
    search: &str,
) -> Result<Rendered, RenderError> {
    let view = derive_view(records, search);
    // `</` would end the inline script early
    let records_json = serde_json::to_string(records)
        .map_err(tera::Error::json)?
        .replace("</", "<\\/");

    let meta = ctx.site_metadata();
    let mut context = layout::base_context(ctx, "/commands", &meta, ctx.config.nav.clone());
    context.insert("view", &view);
    context.insert("records_json", &records_json);

    let html = ctx.templates.render("commands_index.html", &context)?;
    Ok(Rendered { html, meta })
}

/// Title, or the slug in display form
pub fn command_name(page: &Page<CommandMeta>) -> String {
    if page.data.title.is_empty() {
        display_name(page.slug())
    } else {
        page.data.title.clone()
    }
}

/// `<title>` and description of a command page
pub fn command_metadata(page: &Page<CommandMeta>) -> Metadata {
    let name = command_name(page);
    let description = [&page.data.synopsis, &page.data.description]
        .into_iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Documentation for the {} command in DiceDB", name));

    Metadata {
        title: format!("{} - DiceDB Commands", name),
        description,
    }
}

pub(super) fn render_command(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
    slug: &str,
) -> Result<Rendered, RenderError> {
    let page = source.command(slug).ok_or_else(|| RenderError::NotFound {
        collection: Collection::Commands,
        slug: slug.to_string(),
    })?;

    let meta = command_metadata(page);
    let command = CommandData {
        name: command_name(page),
        synopsis: page.data.synopsis.clone(),
        since: page.data.since.clone(),
        dicedb_since: page.data.dicedb_since.clone(),
        acl_categories: page.data.acl_categories.clone(),
        body: page.body.clone(),
    };

    let mut context = layout::base_context(ctx, &page.url, &meta, ctx.config.nav.clone());
    context.insert("command", &command);

    let html = ctx.templates.render("command.html", &context)?;
    Ok(Rendered { html, meta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::test_support;
    use crate::templates::TemplateRenderer;

    fn squash(html: &str) -> String {
        html.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_records_sorted_by_slug() {
        let source = test_support::source();
        let slugs: Vec<_> = command_records(&source)
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["client-list", "get", "set"]);
    }

    #[test]
    fn test_records_ignore_case_and_nested_pages() {
        use crate::content::Source;
        use crate::pages::test_support::page;

        let commands: Vec<Page<CommandMeta>> = vec![
            page(Collection::Commands, "get.md", "---\ntitle: GET\n---\nGet"),
            page(Collection::Commands, "Hset.md", "---\ntitle: HSET\n---\nHset"),
            page(Collection::Commands, "acl/cat.md", "---\ntitle: ACL CAT\n---\nCat"),
            page(Collection::Commands, "append.md", "---\ntitle: APPEND\n---\nAppend"),
        ];
        let source = Source::new(Vec::new(), Vec::new(), commands, Vec::new());

        let slugs: Vec<_> = command_records(&source)
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["append", "get", "Hset"]);
    }

    #[test]
    fn test_index_groups_commands() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let html = render_index(&ctx, &source, "").unwrap().html;
        assert!(html.contains(r#"<h2 class="command-letter">C</h2>"#));
        assert!(html.contains(r#"<h2 class="command-letter">G</h2>"#));
        assert!(html.contains("<code>CLIENT LIST</code>"));
        assert!(!html.contains("results</p>"));
        assert!(html.contains(r#"id="commands-data""#));
    }

    #[test]
    fn test_index_with_search() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let html = render_index(&ctx, &source, "string value").unwrap().html;
        assert!(html.contains(r#"<p class="result-count">2 results</p>"#));
        assert!(!html.contains("<code>CLIENT LIST</code>"));

        let html = render_index(&ctx, &source, "zzz").unwrap().html;
        assert!(html.contains("No commands found matching &quot;zzz&quot;"));
    }

    #[test]
    fn test_script_cannot_be_closed_by_content() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let records = vec![CommandRecord {
            slug: "evil".to_string(),
            url: "/commands/evil".to_string(),
            description: "</script><script>alert(1)</script>".to_string(),
        }];

        let html = render_command_list(&ctx, &records, "").unwrap().html;
        assert!(html.contains(r#"<\/script><script>alert(1)<\/script>"#));
    }

    #[test]
    fn test_command_page() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let rendered = render_command(&ctx, &source, "get").unwrap();
        assert_eq!(rendered.meta.title, "GET - DiceDB Commands");
        assert_eq!(rendered.meta.description, "GET key");

        let html = squash(&rendered.html);
        assert!(html.contains("Since DiceDB 1.0.0 and Valkey 1.0.0"));
        assert!(html.contains(r#"<li class="chip">@read</li>"#));
        assert!(html.contains(r#"<a href="/commands">Commands</a>"#));
    }

    #[test]
    fn test_command_metadata_fallbacks() {
        let source = test_support::source();

        let set = source.command("set").unwrap();
        assert_eq!(
            command_metadata(set).description,
            "Sets the string value of a key."
        );

        let client_list = source.command("client-list").unwrap();
        assert_eq!(command_name(client_list), "CLIENT LIST");
        assert_eq!(
            command_metadata(client_list).title,
            "CLIENT LIST - DiceDB Commands"
        );

        let mut bare = client_list.clone();
        bare.data.description.clear();
        assert_eq!(
            command_metadata(&bare).description,
            "Documentation for the CLIENT LIST command in DiceDB"
        );
    }

    #[test]
    fn test_missing_command() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        assert!(matches!(
            render_command(&ctx, &source, "nope"),
            Err(RenderError::NotFound {
                collection: Collection::Commands,
                ..
            })
        ));
    }
}
