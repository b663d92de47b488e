use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Page category, ordered by classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Product,
    Category,
    Useful,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Category; 3] = [Category::Product, Category::Category, Category::Useful];

    /// Section heading used by the rendered document.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Product => "Produtos",
            Category::Category => "Categorias",
            Category::Useful => "Links Úteis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Product => "product",
            Category::Category => "category",
            Category::Useful => "useful",
        };
        f.write_str(s)
    }
}

/// A sitemap URL that matched one of the category patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRequest {
    /// Index of the URL in the sitemap's `<loc>` sequence.
    pub position: usize,
    pub category: Category,
    pub url: String,
}

/// Terminal state of a single page request.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub request: ClassifiedRequest,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn success(request: ClassifiedRequest, body: String) -> Self {
        Self {
            request,
            body: Some(body),
            error: None,
        }
    }

    pub fn failure(request: ClassifiedRequest, error: impl Into<String>) -> Self {
        Self {
            request,
            body: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.body.is_some()
    }
}

/// Commerce attributes of a product page.
///
/// Optional fields stay `None` when neither the microdata nor the JSON-LD
/// source carried them, so renderers can omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    pub url: String,
    /// Decimal text exactly as published by the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Category listing or miscellaneous page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Product(ProductRecord),
    Page(PageRecord),
}

impl ExtractedRecord {
    pub fn url(&self) -> &str {
        match self {
            ExtractedRecord::Product(p) => &p.url,
            ExtractedRecord::Page(p) => &p.url,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ExtractedRecord::Product(p) => &p.title,
            ExtractedRecord::Page(p) => &p.title,
        }
    }

    pub fn meta_description(&self) -> Option<&str> {
        match self {
            ExtractedRecord::Product(p) => p.meta_description.as_deref(),
            ExtractedRecord::Page(p) => p.meta_description.as_deref(),
        }
    }

    pub fn as_product(&self) -> Option<&ProductRecord> {
        match self {
            ExtractedRecord::Product(p) => Some(p),
            ExtractedRecord::Page(_) => None,
        }
    }
}

/// Extracted records grouped by category.
///
/// All three buckets are always present. Within a bucket records follow
/// sitemap order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub results: BTreeMap<Category, Vec<ExtractedRecord>>,
}

impl ResultSet {
    pub fn new(source: impl Into<String>) -> Self {
        let results = Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            results,
        }
    }

    pub fn push(&mut self, category: Category, record: ExtractedRecord) {
        self.results.entry(category).or_default().push(record);
    }

    pub fn get(&self, category: Category) -> &[ExtractedRecord] {
        self.results
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty buckets in priority order.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[ExtractedRecord])> {
        self.results
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(category, records)| (*category, records.as_slice()))
    }
}
