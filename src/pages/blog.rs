//! Blog index and posts

use super::{layout, RenderContext, RenderError, Rendered};
use crate::content::{BlogMeta, Collection, ContentSource, Page};
use crate::helpers::{iso_date, long_date};
use crate::templates::{BlogCard, Metadata, PostData};

const GRADIENTS: [&str; 5] = [
    "gradient-yellow",
    "gradient-blue",
    "gradient-green",
    "gradient-red",
    "gradient-purple",
];

/// Banner class of the `index`-th card
pub fn gradient_class(index: usize) -> &'static str {
    GRADIENTS[index % GRADIENTS.len()]
}

/// Routable posts, newest first
fn sorted_posts(source: &dyn ContentSource) -> Vec<&Page<BlogMeta>> {
    let mut posts: Vec<_> = source
        .blog()
        .iter()
        .filter(|p| p.route_slug().is_some())
        .collect();
    posts.sort_by(|a, b| b.data.date.cmp(&a.data.date));
    posts
}

pub(super) fn render_index(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
) -> Result<Rendered, RenderError> {
    let posts: Vec<BlogCard> = sorted_posts(source)
        .into_iter()
        .enumerate()
        .map(|(i, post)| BlogCard {
            title: post.data.title.clone(),
            url: post.url.clone(),
            date: iso_date(&post.data.date),
            author: post.data.author.clone(),
            description: post.data.description.clone(),
            gradient: gradient_class(i).to_string(),
        })
        .collect();

    let meta = ctx.site_metadata();
    let mut context = layout::base_context(ctx, "/blog", &meta, ctx.config.nav.clone());
    context.insert("posts", &posts);

    let html = ctx.templates.render("blog_index.html", &context)?;
    Ok(Rendered { html, meta })
}

pub(super) fn render_post(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
    slug: &str,
) -> Result<Rendered, RenderError> {
    let page = source
        .blog_post(slug)
        .ok_or_else(|| RenderError::NotFound {
            collection: Collection::Blog,
            slug: slug.to_string(),
        })?;

    let meta = Metadata {
        title: page.data.title.clone(),
        description: page.data.description.clone().unwrap_or_default(),
    };

    let post = PostData {
        title: page.data.title.clone(),
        description: page.data.description.clone(),
        author: page.data.author.clone(),
        date: iso_date(&page.data.date),
        date_long: long_date(&page.data.date),
        toc: page.toc.clone(),
        body: page.body.clone(),
    };

    let mut context = layout::base_context(ctx, &page.url, &meta, ctx.config.nav.clone());
    context.insert("post", &post);

    let html = ctx.templates.render("blog_post.html", &context)?;
    Ok(Rendered { html, meta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::test_support;
    use crate::templates::TemplateRenderer;

    #[test]
    fn test_gradient_cycles() {
        assert_eq!(gradient_class(0), "gradient-yellow");
        assert_eq!(gradient_class(4), "gradient-purple");
        assert_eq!(gradient_class(5), "gradient-yellow");
        assert_eq!(gradient_class(7), "gradient-green");
    }

    #[test]
    fn test_index_sorted_newest_first() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let rendered = render_index(&ctx, &source).unwrap();
        let html = &rendered.html;
        let newer = html.find("DiceDB 1.0").unwrap();
        let older = html.find("Older Post").unwrap();
        assert!(newer < older);
        assert!(html.contains("October 5, 2025 &middot; Jyotinder"));
        assert!(html.contains("gradient-yellow"));
        assert!(html.contains("gradient-blue"));
    }

    #[test]
    fn test_post() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        let rendered = render_post(&ctx, &source, "release").unwrap();
        assert_eq!(rendered.meta.title, "DiceDB 1.0");
        assert_eq!(rendered.meta.description, "The first release");
        assert!(rendered
            .html
            .contains(r#"<time datetime="2025-10-05">October 5, 2025</time>"#));
    }

    #[test]
    fn test_missing_post() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);
        let source = test_support::source();

        assert!(matches!(
            render_post(&ctx, &source, "nope"),
            Err(RenderError::NotFound {
                collection: Collection::Blog,
                ..
            })
        ));
    }
}
