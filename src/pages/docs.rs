//! Docs pages with the sidebar tree

use super::{layout, RenderContext, RenderError, Rendered};
use crate::content::{Collection, ContentSource};
use crate::templates::{DocData, Metadata};

pub(super) fn render(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
    slugs: &[String],
) -> Result<Rendered, RenderError> {
    let page = source.doc(slugs).ok_or_else(|| RenderError::NotFound {
        collection: Collection::Docs,
        slug: slugs.join("/"),
    })?;

    let meta = Metadata {
        title: page.data.title.clone(),
        description: page.data.description.clone().unwrap_or_default(),
    };

    let doc = DocData {
        title: page.data.title.clone(),
        description: page.data.description.clone(),
        url: page.url.clone(),
        body: page.body.clone(),
        toc: page.toc.clone(),
        full: page.data.full.unwrap_or(false),
    };

    let mut context = layout::base_context(ctx, &page.url, &meta, ctx.config.docs_nav());
    context.insert("doc", &doc);
    context.insert("tree", source.page_tree());

    let html = ctx.templates.render("docs.html", &context)?;
    Ok(Rendered { html, meta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::test_support;
    use crate::templates::TemplateRenderer;

    #[test]
    fn test_docs_page() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let slugs = vec!["get-started".to_string(), "installation".to_string()];
        let rendered = render(&ctx, &source, &slugs).unwrap();
        assert_eq!(rendered.meta.title, "Installation");
        assert!(rendered.html.contains("<h1>Installation</h1>"));
        // Sidebar links to the other docs page
        assert!(rendered.html.contains(r#"href="/docs""#));
        // Only Docs stays in the docs nav
        assert!(!rendered.html.contains(r#"<a href="/blog""#));
    }

    #[test]
    fn test_docs_root() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let rendered = render(&ctx, &source, &[]).unwrap();
        assert_eq!(rendered.meta.title, "Introduction");
        assert_eq!(rendered.meta.description, "What DiceDB is");
    }

    #[test]
    fn test_missing_doc() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let err = render(&ctx, &source, &["nope".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::NotFound {
                collection: Collection::Docs,
                ..
            }
        ));
    }
}
