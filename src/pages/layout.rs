//! Shared layout context: site data, nav and head tags

use tera::Context;

use super::RenderContext;
use crate::config::NavLink;
use crate::helpers::{full_url_for, meta_generator, open_graph};
use crate::templates::{LayoutData, Metadata, SiteData};

/// Build the context every template extending `layout.html` needs
pub(crate) fn base_context(
    ctx: &RenderContext<'_>,
    path: &str,
    meta: &Metadata,
    nav: Vec<NavLink>,
) -> Context {
    let config = ctx.config;

    let site = SiteData {
        title: config.title.clone(),
        description: config.description.clone(),
        tagline: config.tagline.clone(),
        logo: config.logo.clone(),
        github_url: config.github_url.clone(),
        language: config.language.clone(),
        url: config.url.clone(),
        root: config.root.clone(),
    };

    let layout = LayoutData {
        nav,
        current_path: path.to_string(),
        section: section_of(path),
        current_year: chrono::Local::now().format("%Y").to_string(),
        open_graph: open_graph(
            &meta.title,
            &meta.description,
            &full_url_for(config, path),
            Some(&config.logo),
            &config.title,
        ),
        generator: meta_generator(),
    };

    let mut context = Context::new();
    context.insert("site", &site);
    context.insert("layout", &layout);
    context.insert("meta", meta);
    context
}

/// `/docs/get-started` -> `/docs`
fn section_of(path: &str) -> String {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    format!("/{}", first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_of() {
        assert_eq!(section_of("/docs/get-started/installation"), "/docs");
        assert_eq!(section_of("/commands"), "/commands");
        assert_eq!(section_of("/"), "/");
    }
}
