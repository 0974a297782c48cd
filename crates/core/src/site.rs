//! # Site Metadata
//!
//! Crawler-facing documents: `robots.txt` and `sitemap.xml`. Both are
//! generated on request and stamped with the generation time.

use chrono::{DateTime, SecondsFormat, Utc};

/// One `<url>` entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
}

/// Normalize a base URL so it always ends with a single `/`
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}

/// Allow-all robots policy pointing at the sitemap
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}sitemap.xml\n",
        normalize_base_url(base_url)
    )
}

/// The home page and the menu anchor
pub fn sitemap_entries(base_url: &str, generated_at: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = normalize_base_url(base_url);
    vec![
        SitemapEntry {
            url: base.clone(),
            last_modified: generated_at,
        },
        SitemapEntry {
            url: format!("{}#menu", base),
            last_modified: generated_at,
        },
    ]
}

pub fn sitemap_xml(base_url: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in sitemap_entries(base_url, generated_at) {
        out.push_str("<url>\n");
        out.push_str(&format!("<loc>{}</loc>\n", xml_escape(&entry.url)));
        out.push_str(&format!(
            "<lastmod>{}</lastmod>\n",
            entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        out.push_str("</url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BASE: &str = "https://gourimenon-portfolio.vercel.app/";

    #[test]
    fn test_robots_allows_all_and_points_to_sitemap() {
        let robots = robots_txt(BASE);
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.contains("Sitemap: https://gourimenon-portfolio.vercel.app/sitemap.xml"));
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(normalize_base_url("https://cafe.dev"), "https://cafe.dev/");
        assert_eq!(normalize_base_url("https://cafe.dev///"), "https://cafe.dev/");
    }

    #[test]
    fn test_sitemap_lists_home_and_menu() {
        let at = Utc.with_ymd_and_hms(2025, 11, 14, 9, 30, 0).unwrap();
        let xml = sitemap_xml(BASE, at);
        assert!(xml.contains("<loc>https://gourimenon-portfolio.vercel.app/</loc>"));
        assert!(xml.contains("<loc>https://gourimenon-portfolio.vercel.app/#menu</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-11-14T09:30:00.000Z</lastmod>").count(), 2);
    }

    #[test]
    fn test_sitemap_entries_share_timestamp() {
        let now = Utc::now();
        let entries = sitemap_entries("https://cafe.dev", now);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.last_modified == now));
        assert_eq!(entries[1].url, "https://cafe.dev/#menu");
    }
}
