mod client;
mod headers;
mod tests;
mod utils;

pub mod types;

// Re-export types for public use
pub use client::ReqwestClient;
pub use types::*;

use crate::error::SitellmsError;
use crate::tools::batch::{batch, InFlightGauge};
use crate::types::{ClassifiedRequest, FetchOutcome};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use utils::validate_status;

/// Fetch one URL with a single attempt.
///
/// Returns the body of a 2xx response; transport failures and any other
/// status come back as `Err(reason)`.
///
/// # Examples
/// ```no_run
/// use sitellms::tools::fetch::{fetch_page, ReqwestClient};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), String> {
/// let client = ReqwestClient::new()?;
/// let html = fetch_page(&client, "https://example.com", Duration::from_secs(30)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page(
    client: &dyn HttpClient,
    url: &str,
    timeout: Duration,
) -> Result<String, String> {
    let response = client.get(url, timeout).await?;
    validate_status(response.status)?;
    Ok(response.body)
}

/// Fetch every request with bounded concurrency.
///
/// Each item gets exactly one attempt and exactly one `FetchOutcome`; a
/// failed item never affects its siblings. Returns once every item has
/// finished, in completion order.
pub async fn fetch_all(
    client: Arc<dyn HttpClient>,
    items: Vec<ClassifiedRequest>,
    options: &FetchOptions,
) -> Vec<FetchOutcome> {
    fetch_all_with(client, items, options, |outcome| async move { outcome }).await
}

/// Like [`fetch_all`], but runs `on_complete` on each outcome inside the
/// same concurrency slot as its request.
pub async fn fetch_all_with<H, Fut, R>(
    client: Arc<dyn HttpClient>,
    items: Vec<ClassifiedRequest>,
    options: &FetchOptions,
    on_complete: H,
) -> Vec<R>
where
    H: Fn(FetchOutcome) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let total = items.len();
    let timeout = options.timeout;
    let deadline = options.deadline.map(|d| Instant::now() + d);
    let gauge = InFlightGauge::new();
    let gauge_handle = Arc::clone(&gauge);
    let on_complete = Arc::new(on_complete);

    let results = batch(items, options.concurrency, move |request| {
        let client = Arc::clone(&client);
        let gauge = Arc::clone(&gauge_handle);
        let on_complete = Arc::clone(&on_complete);
        async move {
            let outcome = {
                let _guard = gauge.enter();
                fetch_outcome(client.as_ref(), request, timeout, deadline).await
            };
            on_complete(outcome).await
        }
    })
    .await;

    tracing::debug!(total, peak_in_flight = gauge.peak(), "page batch finished");
    results
}

async fn fetch_outcome(
    client: &dyn HttpClient,
    request: ClassifiedRequest,
    timeout: Duration,
    deadline: Option<Instant>,
) -> FetchOutcome {
    let attempt = fetch_page(client, &request.url, timeout);
    let result = match deadline {
        Some(at) => tokio::time::timeout_at(at, attempt)
            .await
            .unwrap_or_else(|_| Err("batch deadline exceeded".to_string())),
        None => attempt.await,
    };

    match result {
        Ok(body) => FetchOutcome::success(request, body),
        Err(reason) => {
            let error = SitellmsError::PageFetchFailed {
                url: request.url.clone(),
                reason,
            };
            tracing::warn!(
                url = %request.url,
                category = %request.category,
                error = %error,
                "page fetch failed"
            );
            FetchOutcome::failure(request, error.to_string())
        }
    }
}
