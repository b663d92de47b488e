use thiserror::Error;

pub type Result<T> = std::result::Result<T, SitellmsError>;

#[derive(Debug, Error)]
pub enum SitellmsError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /* Fatal: abort the whole run */
    #[error("sitemap unreachable: {url}: {reason}")]
    SitemapUnreachable { url: String, reason: String },
    #[error("invalid sitemap: {0}")]
    InvalidSitemap(String),
    #[error("no sitemap url matched the supplied patterns")]
    NoMatchingUrls,

    /* Per-item: logged and dropped inside the fetch stage */
    #[error("page fetch failed: {url}: {reason}")]
    PageFetchFailed { url: String, reason: String },
    #[error("extraction failed: {url}: {reason}")]
    ExtractionFailed { url: String, reason: String },

    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SitellmsError {
    /// True for the failures that only ever affect a single page.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            SitellmsError::PageFetchFailed { .. } | SitellmsError::ExtractionFailed { .. }
        )
    }
}
