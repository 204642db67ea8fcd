//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/about/</loc>
//!   </url>
//! </urlset>
//! ```

use std::path::Path;

use crate::audit::PermalinkAudit;
use crate::builder::{write_file, BuildError};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::page::PageIndex;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Full URL of a permalink under `base_url`.
pub fn page_url(base_url: &str, permalink: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), permalink)
}

/// Build the sitemap document for a list of URLs.
pub fn sitemap_xml<'a>(urls: impl IntoIterator<Item = &'a str>) -> String {
    let mut xml = String::new();

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, SITEMAP_NS));
    xml.push('\n');

    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url)));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write the sitemap for every page that is neither excluded nor shadowed.
///
/// Returns the number of URLs written.
pub fn write_sitemap(
    index: &PageIndex,
    audit: &PermalinkAudit,
    base_url: &str,
    path: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<usize, BuildError> {
    let urls: Vec<String> = index
        .iter()
        .enumerate()
        .filter(|(position, page)| !page.pages_exclude && !audit.is_shadowed(*position))
        .map(|(_, page)| page_url(base_url, &page.permalink))
        .collect();

    write_file(path, sitemap_xml(urls.iter().map(String::as_str)))?;

    sink.report(Diagnostic::SitemapWritten { urls: urls.len() });

    Ok(urls.len())
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
