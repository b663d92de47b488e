//! Test Doubles

use crate::tools::batch::InFlightGauge;
use crate::tools::fetch::{HttpClient, HttpResponse};
use crate::types::{Category, ClassifiedRequest};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Route {
    Respond { status: u16, body: String },
    Fail(String),
    Hang,
}

/// Scripted transport: canned responses per URL, call log, in-flight gauge.
///
/// Unknown URLs answer 404.
pub(crate) struct ScriptedClient {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<String>>,
    gauge: Arc<InFlightGauge>,
    latency: Duration,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            gauge: InFlightGauge::new(),
            latency: Duration::ZERO,
        }
    }

    pub fn page(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.routes
            .insert(url.to_string(), Route::Fail(reason.to_string()));
        self
    }

    /// Never answers before the request timeout.
    pub fn hang(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Hang);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.gauge.peak()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, String> {
        let _guard = self.gauge.enter();
        self.calls.lock().expect("calls lock").push(url.to_string());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.routes.get(url).cloned() {
            Some(Route::Respond { status, body }) => Ok(HttpResponse::new(status, body)),
            Some(Route::Fail(reason)) => Err(reason),
            Some(Route::Hang) => {
                tokio::time::sleep(timeout).await;
                Err(format!("timed out after {}ms", timeout.as_millis()))
            }
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

pub(crate) fn request(position: usize, category: Category, url: &str) -> ClassifiedRequest {
    ClassifiedRequest {
        position,
        category,
        url: url.to_string(),
    }
}
