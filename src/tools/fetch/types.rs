use async_trait::async_trait;
use std::time::Duration;

/// Raw HTTP response as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// HTTP GET capability injected into the pipeline.
///
/// Transport errors (DNS, connect, timeout) are returned as `Err(reason)`;
/// any response that arrives, whatever its status, is `Ok`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, String>;
}

/// Knobs for a page batch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub concurrency: usize,
    pub timeout: Duration,
    /// Items still fetching when this elapses fail with a deadline error.
    pub deadline: Option<Duration>,
}

impl FetchOptions {
    pub fn new(concurrency: usize, timeout: Duration) -> Self {
        Self {
            concurrency,
            timeout,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

impl From<&crate::config::Config> for FetchOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self::new(config.concurrency, config.page_timeout()).with_deadline(config.batch_deadline())
    }
}
