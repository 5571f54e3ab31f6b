//! Route surface of the site

use std::fmt;
use std::path::PathBuf;

use crate::content::{Collection, ContentSource, Page};
use crate::helpers::decode_segment;

/// Every kind of page the site serves
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    /// Docs page by slugs; empty for `/docs`
    Docs(Vec<String>),
    BlogIndex,
    BlogPost(String),
    CommandsIndex,
    Command(String),
    Versions,
}

impl Route {
    /// Map a URL path to a route.
    ///
    /// Tolerates a trailing slash, a trailing `index.html`, a query string and
    /// percent-encoded segments.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut decoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();
        if decoded.last().map(String::as_str) == Some("index.html") {
            decoded.pop();
        }

        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["docs", rest @ ..] => Route::Docs(rest.iter().map(|s| s.to_string()).collect()),
            ["blog"] => Route::BlogIndex,
            ["blog", slug] => Route::BlogPost(slug.to_string()),
            ["commands"] => Route::CommandsIndex,
            ["commands", slug] => Route::Command(slug.to_string()),
            ["versions"] => Route::Versions,
            _ => return None,
        };
        Some(route)
    }

    /// URL path of the route, the inverse of [`Route::parse`]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Docs(slugs) => Collection::Docs.page_url(slugs),
            Route::BlogIndex => "/blog".to_string(),
            Route::BlogPost(slug) => Collection::Blog.page_url(std::slice::from_ref(slug)),
            Route::CommandsIndex => "/commands".to_string(),
            Route::Command(slug) => Collection::Commands.page_url(std::slice::from_ref(slug)),
            Route::Versions => "/versions".to_string(),
        }
    }

    /// File the route is written to, relative to the public directory
    pub fn output_file(&self) -> PathBuf {
        let path = self.path();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            PathBuf::from("index.html")
        } else {
            PathBuf::from(trimmed).join("index.html")
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Every route that is pre-rendered, section indexes first
pub fn static_routes(source: &dyn ContentSource) -> Vec<Route> {
    let mut routes = vec![
        Route::Home,
        Route::BlogIndex,
        Route::CommandsIndex,
        Route::Versions,
    ];

    routes.extend(source.docs().iter().map(|p| Route::Docs(p.slugs.clone())));
    routes.extend(
        route_slugs(source.blog(), Collection::Blog)
            .map(|slug| Route::BlogPost(slug.to_string())),
    );
    routes.extend(
        route_slugs(source.commands(), Collection::Commands)
            .map(|slug| Route::Command(slug.to_string())),
    );

    routes
}

/// Single-segment slugs of a collection, warning about pages without a route
fn route_slugs<T>(pages: &[Page<T>], collection: Collection) -> impl Iterator<Item = &str> {
    pages.iter().filter_map(move |page| {
        let slug = page.route_slug();
        if slug.is_none() {
            tracing::warn!(
                "Skipping {} page {:?}: it has no /{}/<slug> route",
                collection,
                page.source,
                collection
            );
        }
        slug
    })
}
