use super::headers::default_headers;
use super::types::{HttpClient, HttpResponse};
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;
const POOL_MAX_IDLE_PER_HOST: usize = 32;

/// `HttpClient` backed by one shared reqwest connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn build_client() -> Result<Client, String> {
    Client::builder()
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .default_headers(default_headers())
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| format!("Failed to build client: {}", e))
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| describe(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| describe(e, timeout))?;

        Ok(HttpResponse { status, body })
    }
}

fn describe(error: reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        format!("timed out after {}ms", timeout.as_millis())
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        format!("HTTP request failed: {}", error)
    }
}
