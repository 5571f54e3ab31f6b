//! Release history table

use super::{layout, RenderContext, RenderError, Rendered};
use crate::content::{ContentSource, Page, VersionMeta};
use crate::helpers::compare_versions;
use crate::templates::VersionRow;

/// Versions, newest first (`1.10.0` sorts above `1.9.0`)
pub fn sorted_versions(source: &dyn ContentSource) -> Vec<&Page<VersionMeta>> {
    let mut versions: Vec<_> = source.versions().iter().collect();
    versions.sort_by(|a, b| compare_versions(&b.data.version, &a.data.version));
    versions
}

pub(super) fn render(
    ctx: &RenderContext<'_>,
    source: &dyn ContentSource,
) -> Result<Rendered, RenderError> {
    let versions: Vec<VersionRow> = sorted_versions(source)
        .into_iter()
        .map(|page| VersionRow {
            version: page.data.version.clone(),
            valkey_version: page.data.valkey_version.clone(),
            body: page.body.clone(),
        })
        .collect();

    let meta = ctx.site_metadata();
    let mut context = layout::base_context(ctx, "/versions", &meta, ctx.config.nav.clone());
    context.insert("versions", &versions);

    let html = ctx.templates.render("versions.html", &context)?;
    Ok(Rendered { html, meta })
}
