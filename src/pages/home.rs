//! Landing page

use super::{layout, RenderContext, RenderError, Rendered};

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
    let meta = ctx.site_metadata();
    let mut context = layout::base_context(ctx, "/", &meta, ctx.config.nav.clone());
    context.insert("features", &ctx.config.features);

    let html = ctx.templates.render("home.html", &context)?;
    Ok(Rendered { html, meta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::templates::TemplateRenderer;

    #[test]
    fn test_home_has_hero_and_features() {
        let config = SiteConfig::default();
        let templates = TemplateRenderer::new().unwrap();
        let ctx = RenderContext::new(&config, &templates);

        let rendered = render(&ctx).unwrap();
        assert_eq!(rendered.meta.title, "DiceDB");
        assert!(rendered.html.contains(r#"href="/docs">Get Started"#));
        assert!(rendered.html.contains(&config.github_url));
        assert_eq!(rendered.html.matches("feature-card").count(), 5);
    }
}
