use serde::{Deserialize, Serialize};

/// A parsed sitemap document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "locations", rename_all = "camelCase")]
pub enum Sitemap {
    /// `<urlset>`: page locations in document order.
    UrlSet(Vec<String>),
    /// `<sitemapindex>`: child sitemap locations in document order.
    Index(Vec<String>),
}

impl Sitemap {
    pub fn locations(&self) -> &[String] {
        match self {
            Sitemap::UrlSet(locs) | Sitemap::Index(locs) => locs,
        }
    }
}
