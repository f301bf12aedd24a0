//! Sitemap rendering for static prerendering and crawlers.

use std::collections::HashSet;
use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::expand::PathEntry;

/// XML namespace of the sitemaps.org protocol.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Unique resolvable paths, in expansion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sitemap {
    paths: Vec<String>,
}

impl Sitemap {
    /// Collect paths from expanded entries.
    ///
    /// Several routes can resolve to the same path (e.g. a section and its
    /// index child); only the first occurrence is kept.
    #[must_use]
    pub fn from_entries<T>(entries: &[PathEntry<T>]) -> Self {
        let mut seen = HashSet::new();
        let paths = entries
            .iter()
            .filter(|entry| seen.insert(entry.path.as_str()))
            .map(|entry| entry.path.clone())
            .collect();
        Self { paths }
    }

    /// Unique paths.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// One path per line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for path in &self.paths {
            out.push_str(path);
            out.push('\n');
        }
        out
    }

    /// Render a sitemaps.org `urlset` with locations under `base_url`.
    #[must_use]
    pub fn render_xml(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(out, "<urlset xmlns=\"{SITEMAP_NS}\">");
        for path in &self.paths {
            let loc = format!("{base}{path}");
            let _ = writeln!(out, "  <url><loc>{}</loc></url>", escape(loc.as_str()));
        }
        out.push_str("</urlset>\n");
        out
    }
}
