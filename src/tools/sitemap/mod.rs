//! Sitemap Tools

mod utils;

pub mod types;

pub use types::*;

use crate::error::{Result, SitellmsError};
use crate::tools::fetch::{fetch_page, HttpClient};
use std::time::Duration;
use url::Url;

/// Parse sitemap XML without touching the network.
pub fn parse_sitemap(xml: &str) -> Result<Sitemap> {
    utils::parse_sitemap_xml(xml)
}

/// Fetch a sitemap and return its page locations in document order.
///
/// One GET for a `<urlset>`. A `<sitemapindex>` is expanded one level deep:
/// each child sitemap is fetched in turn and its locations appended; a child
/// that fails to load or parse is logged and skipped.
///
/// # Errors
/// - `InvalidUrl` if `url` is not an absolute http(s) URL
/// - `SitemapUnreachable` on transport failure or non-2xx status
/// - `InvalidSitemap` on malformed XML or an unexpected root element
pub async fn fetch_sitemap(
    client: &dyn HttpClient,
    url: &str,
    timeout: Duration,
) -> Result<Vec<String>> {
    validate_sitemap_url(url)?;

    let body = fetch_page(client, url, timeout)
        .await
        .map_err(|reason| SitellmsError::SitemapUnreachable {
            url: url.to_string(),
            reason,
        })?;

    match parse_sitemap(&body)? {
        Sitemap::UrlSet(locations) => {
            tracing::debug!(url, count = locations.len(), "sitemap parsed");
            Ok(locations)
        }
        Sitemap::Index(children) => {
            tracing::debug!(url, children = children.len(), "sitemap index parsed");
            Ok(expand_index(client, &children, timeout).await)
        }
    }
}

async fn expand_index(client: &dyn HttpClient, children: &[String], timeout: Duration) -> Vec<String> {
    let mut locations = Vec::new();

    for child in children {
        let body = match fetch_page(client, child, timeout).await {
            Ok(body) => body,
            Err(reason) => {
                tracing::warn!(url = %child, error = %reason, "child sitemap unreachable");
                continue;
            }
        };
        match parse_sitemap(&body) {
            Ok(Sitemap::UrlSet(locs)) => locations.extend(locs),
            Ok(Sitemap::Index(_)) => {
                tracing::warn!(url = %child, "nested sitemap index skipped");
            }
            Err(e) => {
                tracing::warn!(url = %child, error = %e, "child sitemap invalid");
            }
        }
    }

    locations
}

fn validate_sitemap_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url.trim()).map_err(|_| SitellmsError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(SitellmsError::InvalidUrl(url.to_string()));
    }
    Ok(())
}
