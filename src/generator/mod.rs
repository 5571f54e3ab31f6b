//! Generator module - renders every static route into the public directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::ContentSource;
use crate::pages::{self, command_records, RenderContext};
use crate::routes::static_routes;
use crate::sitemap;
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::Site;

/// File the dev server reads command records from
pub const COMMANDS_JSON: &str = "commands.json";

/// Static site generator using the embedded Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, source: &dyn ContentSource) -> Result<()> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)?;

        // Generated pages overwrite static files with the same path
        self.copy_static_assets()?;
        self.write_file(Path::new("css/site.css"), STYLESHEET)?;

        let ctx = RenderContext::new(&self.site.config, &self.renderer);

        let routes = static_routes(source);
        for route in &routes {
            let rendered = pages::render(&ctx, source, route)
                .with_context(|| format!("Failed to render {}", route))?;
            self.write_file(&route.output_file(), &rendered.html)?;
        }
        tracing::info!("Rendered {} pages", routes.len());

        let not_found = pages::render_not_found(&ctx)?;
        self.write_file(Path::new("404.html"), &not_found.html)?;

        self.generate_sitemap(source)?;
        self.generate_commands_json(source)?;

        Ok(())
    }

    /// Generate sitemap.xml
    fn generate_sitemap(&self, source: &dyn ContentSource) -> Result<()> {
        let entries = sitemap::entries(&self.site.config, source, chrono::Utc::now());
        self.write_file(Path::new("sitemap.xml"), &sitemap::to_xml(&entries))?;
        tracing::info!("Generated sitemap.xml with {} urls", entries.len());
        Ok(())
    }

    /// Generate commands.json for server-side search
    fn generate_commands_json(&self, source: &dyn ContentSource) -> Result<()> {
        let records = command_records(source);
        let json = serde_json::to_string_pretty(&records)?;
        self.write_file(Path::new(COMMANDS_JSON), &json)?;
        tracing::debug!("Generated {} with {} commands", COMMANDS_JSON, records.len());
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {}", path.display()))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }

    /// Write a file below the public directory, creating parents
    fn write_file(&self, relative: &Path, contents: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}
