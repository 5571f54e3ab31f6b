//! Built-in site templates using the Tera template engine
//!
//! All templates and the stylesheet are embedded directly in the binary.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::NavLink;
use crate::content::TocItem;
use crate::helpers::{moment_to_chrono_format, strip_html, truncate};

/// Stylesheet written to `css/site.css`
pub const STYLESHEET: &str = include_str!("site/site.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        // Bodies are pre-rendered HTML; fields that need escaping use `| escape`
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("docs.html", include_str!("site/docs.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("commands_index.html", include_str!("site/commands_index.html")),
            ("command.html", include_str!("site/command.html")),
            ("versions.html", include_str!("site/versions.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/commands_list.html",
                include_str!("site/partials/commands_list.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("command_name", command_name_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template_name, context)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(omission.as_str()))))
}

/// Tera filter: reformat a `YYYY-MM-DD` date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    match chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        Ok(date) => Ok(tera::Value::String(
            date.format(&moment_to_chrono_format(&format)).to_string(),
        )),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: `acl-cat` -> `ACL CAT`
fn command_name_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("command_name", "value", String, value);
    Ok(tera::Value::String(crate::search::display_name(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub logo: String,
    pub github_url: String,
    pub language: String,
    pub url: String,
    pub root: String,
}

/// Page `<title>` and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub nav: Vec<NavLink>,
    pub current_path: String,
    /// First path segment, used to highlight the active nav link
    pub section: String,
    pub current_year: String,
    pub open_graph: String,
    pub generator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocData {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub body: String,
    pub toc: Vec<TocItem>,
    pub full: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogCard {
    pub title: String,
    pub url: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub author: String,
    pub description: Option<String>,
    pub gradient: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub date: String,
    pub date_long: String,
    pub toc: Vec<TocItem>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandData {
    pub name: String,
    pub synopsis: String,
    pub since: String,
    pub dicedb_since: String,
    pub acl_categories: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionRow {
    pub version: String,
    pub valkey_version: String,
    pub body: String,
}
