//! Pipeline Engine

use crate::config::Config;
use crate::error::{Result, SitellmsError};
use crate::tools::aggregate::aggregate;
use crate::tools::classify::{classify_compiled, compile_patterns, PatternSet};
use crate::tools::extract::Extractor;
use crate::tools::fetch::{fetch_all_with, FetchOptions, HttpClient, ReqwestClient};
use crate::tools::sitemap::fetch_sitemap;
use crate::types::{Category, ClassifiedRequest, ExtractedRecord, FetchOutcome, ResultSet};
use std::sync::Arc;
use std::time::Instant;

/// Runs sitemap → classify → fetch → extract → aggregate for one site.
///
/// The engine holds no per-run state; `run` can be called repeatedly.
pub struct Engine {
    client: Arc<dyn HttpClient>,
    config: Config,
    extractor: Arc<Extractor>,
}

impl Engine {
    /// Build an engine over any transport. Fails on an invalid config.
    pub fn new(client: Arc<dyn HttpClient>, config: Config) -> Result<Self> {
        config.validate()?;
        let extractor = Arc::new(Extractor::from_config(&config));
        Ok(Self {
            client,
            config,
            extractor,
        })
    }

    /// Build an engine over the default reqwest transport.
    pub fn with_reqwest(config: Config) -> Result<Self> {
        let client = ReqwestClient::new().map_err(SitellmsError::Config)?;
        Self::new(Arc::new(client), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce the grouped records for the site behind `sitemap_url`.
    ///
    /// # Errors
    /// - `InvalidUrl`, `SitemapUnreachable`, `InvalidSitemap` from the sitemap stage
    /// - `NoMatchingUrls` when no location matches any enabled pattern; no
    ///   page is requested in that case
    ///
    /// Page fetch and extraction failures never surface here: the page is
    /// logged and left out of the result.
    pub async fn run(&self, sitemap_url: &str, patterns: &PatternSet) -> Result<ResultSet> {
        let started = Instant::now();

        let urls = fetch_sitemap(
            self.client.as_ref(),
            sitemap_url,
            self.config.sitemap_timeout(),
        )
        .await?;

        let compiled = compile_patterns(patterns);
        let requests = classify_compiled(&urls, &compiled);
        tracing::info!(
            sitemap = sitemap_url,
            locations = urls.len(),
            matched = requests.len(),
            "sitemap classified"
        );
        if requests.is_empty() {
            return Err(SitellmsError::NoMatchingUrls);
        }

        let requested = requests.len();
        let extractor = Arc::clone(&self.extractor);
        let items = fetch_all_with(
            Arc::clone(&self.client),
            requests,
            &FetchOptions::from(&self.config),
            move |outcome| extract_outcome(Arc::clone(&extractor), outcome),
        )
        .await;

        let set = aggregate(sitemap_url, items);
        tracing::info!(
            sitemap = sitemap_url,
            requested,
            extracted = set.len(),
            products = set.get(Category::Product).len(),
            categories = set.get(Category::Category).len(),
            useful = set.get(Category::Useful).len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run finished"
        );
        Ok(set)
    }
}

/// Extract a fetched page off the async workers.
///
/// A panicking extraction only loses its own page.
async fn extract_outcome(
    extractor: Arc<Extractor>,
    outcome: FetchOutcome,
) -> (ClassifiedRequest, Option<ExtractedRecord>) {
    let FetchOutcome { request, body, .. } = outcome;
    let Some(html) = body else {
        return (request, None);
    };

    let category = request.category;
    let url = request.url.clone();
    let task = tokio::task::spawn_blocking(move || extractor.extract(category, &html, &url));

    match task.await {
        Ok(record) => (request, Some(record)),
        Err(e) => {
            let error = SitellmsError::ExtractionFailed {
                url: request.url.clone(),
                reason: e.to_string(),
            };
            tracing::error!(url = %request.url, %category, error = %error, "page dropped");
            (request, None)
        }
    }
}
