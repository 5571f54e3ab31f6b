//! Page renderers, one per route

mod blog;
mod commands;
mod docs;
mod home;
mod layout;
mod versions;

use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{Collection, ContentSource};
use crate::routes::Route;
use crate::templates::{Metadata, TemplateRenderer};

pub use blog::gradient_class;
pub use commands::{command_metadata, command_name, command_records, render_command_list};
pub use versions::sorted_versions;

/// Errors raised while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no {collection} page named {slug:?}")]
    NotFound { collection: Collection, slug: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// What every renderer needs besides the content
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub templates: &'a TemplateRenderer,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, templates: &'a TemplateRenderer) -> Self {
        Self { config, templates }
    }

    /// Site-wide title and description
    pub fn site_metadata(&self) -> Metadata {
        Metadata {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
        }
    }
}

/// A rendered HTML document and its metadata
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub meta: Metadata,
}

/// Render one route
pub fn render(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
    route: &Route,
) -> Result<Rendered, RenderError> {
    match route {
        Route::Home => home::render(ctx),
        Route::Docs(slugs) => docs::render(ctx, source, slugs),
        Route::BlogIndex => blog::render_index(ctx, source),
        Route::BlogPost(slug) => blog::render_post(ctx, source, slug),
        Route::CommandsIndex => commands::render_index(ctx, source, ""),
        Route::Command(slug) => commands::render_command(ctx, source, slug),
        Route::Versions => versions::render(ctx, source),
    }
}

/// The 404 page
pub fn render_not_found(ctx: &RenderContext<'_>) -> Result<Rendered, RenderError> {
    let meta = Metadata {
        title: format!("Page Not Found - {}", ctx.config.title),
        description: ctx.config.description.clone(),
    };
    let context = layout::base_context(ctx, "/404.html", &meta, ctx.config.nav.clone());
    let html = ctx.templates.render("not_found.html", &context)?;
    Ok(Rendered { html, meta })
}
