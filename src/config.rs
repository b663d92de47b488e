//! Run Configuration

use crate::error::{Result, SitellmsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONCURRENCY: usize = 20;
const DEFAULT_SITEMAP_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_PAGE_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_TITLE_MAX_CHARS: usize = 350;
const DEFAULT_SITE_NAME: &str = "Loja Virtual";

/// Vocabulary URI → display label tables for availability and condition.
///
/// Lookups never drop a value: unknown URIs come back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelTable {
    pub availability: BTreeMap<String, String>,
    pub condition: BTreeMap<String, String>,
}

impl Default for LabelTable {
    fn default() -> Self {
        let availability = [
            ("https://schema.org/InStock", "Em estoque"),
            ("https://schema.org/OutOfStock", "Indisponível"),
            ("https://schema.org/PreOrder", "Pré-venda"),
            ("https://schema.org/SoldOut", "Esgotado"),
            ("https://schema.org/Discontinued", "Descontinuado"),
        ];
        let condition = [
            ("https://schema.org/NewCondition", "Novo"),
            ("https://schema.org/UsedCondition", "Usado"),
            ("https://schema.org/RefurbishedCondition", "Recondicionado"),
            ("https://schema.org/DamagedCondition", "Com avarias"),
        ];
        Self {
            availability: to_map(&availability),
            condition: to_map(&condition),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl LabelTable {
    /// Empty tables (every value passes through).
    pub fn identity() -> Self {
        Self {
            availability: BTreeMap::new(),
            condition: BTreeMap::new(),
        }
    }

    pub fn availability_label(&self, raw: Option<String>) -> Option<String> {
        raw.map(|value| lookup(&self.availability, value))
    }

    pub fn condition_label(&self, raw: Option<String>) -> Option<String> {
        raw.map(|value| lookup(&self.condition, value))
    }
}

/// Exact match first, then the https form of an http schema.org URI.
fn lookup(table: &BTreeMap<String, String>, value: String) -> String {
    if let Some(label) = table.get(&value) {
        return label.clone();
    }
    if let Some(rest) = value.strip_prefix("http://") {
        if let Some(label) = table.get(&format!("https://{rest}")) {
            return label.clone();
        }
    }
    value
}

/// Pipeline configuration, read-only once an engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum page requests in flight.
    pub concurrency: usize,
    pub sitemap_timeout_ms: u64,
    pub page_timeout_ms: u64,
    pub title_max_chars: usize,
    /// Optional deadline for the whole page batch.
    pub batch_deadline_ms: Option<u64>,
    pub site_name: String,
    pub labels: LabelTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            sitemap_timeout_ms: DEFAULT_SITEMAP_TIMEOUT_MS,
            page_timeout_ms: DEFAULT_PAGE_TIMEOUT_MS,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            batch_deadline_ms: None,
            site_name: DEFAULT_SITE_NAME.to_string(),
            labels: LabelTable::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(SitellmsError::Config("concurrency must be at least 1".into()));
        }
        if self.sitemap_timeout_ms == 0 || self.page_timeout_ms == 0 {
            return Err(SitellmsError::Config("timeouts must be non-zero".into()));
        }
        if self.batch_deadline_ms == Some(0) {
            return Err(SitellmsError::Config("batch deadline must be non-zero".into()));
        }
        Ok(())
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_sitemap_timeout(mut self, timeout: Duration) -> Self {
        self.sitemap_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_batch_deadline(mut self, deadline: Duration) -> Self {
        self.batch_deadline_ms = Some(deadline.as_millis() as u64);
        self
    }

    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }

    pub fn sitemap_timeout(&self) -> Duration {
        Duration::from_millis(self.sitemap_timeout_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_deadline_ms.map(Duration::from_millis)
    }
}
