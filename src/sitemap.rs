//! `sitemap.xml` generation

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use crate::config::SiteConfig;
use crate::content::{Collection, ContentSource};
use crate::helpers::{escape_xml, full_url_for};

/// `<changefreq>` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFrequency::Weekly => f.write_str("weekly"),
            ChangeFrequency::Monthly => f.write_str("monthly"),
        }
    }
}

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// The site root followed by every docs, blog and command page
pub fn entries(
    config: &SiteConfig,
    source: &dyn ContentSource,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut entries = vec![SitemapEntry {
        url: config.url.trim_end_matches('/').to_string(),
        last_modified: now,
        change_frequency: ChangeFrequency::Monthly,
        priority: 1.0,
    }];

    for collection in [Collection::Docs, Collection::Blog, Collection::Commands] {
        entries.extend(
            source
                .urls(collection)
                .into_iter()
                .map(|url| SitemapEntry {
                    url: full_url_for(config, &url),
                    last_modified: now,
                    change_frequency: ChangeFrequency::Weekly,
                    priority: 0.8,
                }),
        );
    }

    entries
}

/// Serialize entries as a `urlset` document
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        xml.push_str("<url>\n");
        xml.push_str(&format!("<loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "<lastmod>{}</lastmod>\n",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        xml.push_str(&format!(
            "<changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("<priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_entries() {
        let config = SiteConfig::default();
        let source = test_support::source();

        let entries = entries(&config, &source, now());
        let urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://dicedb.io",
                "https://dicedb.io/docs",
                "https://dicedb.io/docs/get-started/installation",
                "https://dicedb.io/blog/older",
                "https://dicedb.io/blog/release",
                "https://dicedb.io/commands/set",
                "https://dicedb.io/commands/get",
                "https://dicedb.io/commands/client-list",
            ]
        );

        assert_eq!(entries[0].change_frequency, ChangeFrequency::Monthly);
        assert_eq!(entries[0].priority, 1.0);
        assert!(entries[1..]
            .iter()
            .all(|e| e.change_frequency == ChangeFrequency::Weekly && e.priority == 0.8));
        assert!(entries.iter().all(|e| e.last_modified == now()));
    }

    #[test]
    fn test_versions_are_not_listed() {
        let config = SiteConfig::default();
        let source = test_support::source();

        let entries = entries(&config, &source, now());
        assert!(entries.iter().all(|e| !e.url.contains("/versions")));
    }

    #[test]
    fn test_to_xml() {
        let entries = vec![SitemapEntry {
            url: "https://dicedb.io/docs?a=1&b=2".to_string(),
            last_modified: now(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.8,
        }];

        let xml = to_xml(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://dicedb.io/docs?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2025-10-05T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
