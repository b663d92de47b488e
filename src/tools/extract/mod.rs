//! Extract Tools

mod utils;

pub mod types;

pub use types::*;

use crate::config::{Config, LabelTable};
use crate::types::{Category, ExtractedRecord, PageRecord, ProductRecord};
use scraper::Html;

/// Reconcile two partial offers: `primary` wins wherever it has a value,
/// `fallback` only fills the gaps.
pub fn merge_offer(primary: OfferFields, fallback: OfferFields) -> OfferFields {
    OfferFields {
        name: primary.name.or(fallback.name),
        price: primary.price.or(fallback.price),
        currency: primary.currency.or(fallback.currency),
        availability: primary.availability.or(fallback.availability),
        condition: primary.condition.or(fallback.condition),
        return_days: primary.return_days.or(fallback.return_days),
        return_fees: primary.return_fees.or(fallback.return_fees),
        return_method: primary.return_method.or(fallback.return_method),
    }
}

/// Read the first schema.org Offer microdata scope of a page.
pub fn extract_microdata(html: &str) -> OfferFields {
    utils::microdata_offer(&Html::parse_document(html))
}

/// Scan the JSON-LD blocks of a page for a Product with offers.
pub fn extract_jsonld_product(html: &str) -> JsonldScan {
    utils::scan_jsonld(&Html::parse_document(html))
}

/// Turns fetched HTML into an [`ExtractedRecord`].
#[derive(Debug, Clone)]
pub struct Extractor {
    labels: LabelTable,
    title_max_chars: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Extractor {
    pub fn new(labels: LabelTable, title_max_chars: usize) -> Self {
        Self {
            labels,
            title_max_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.labels.clone(), config.title_max_chars)
    }

    /// Extract one page.
    ///
    /// Every page gets its title and meta description. Product pages also
    /// get commerce fields: microdata first, then JSON-LD for whatever
    /// price, currency or availability is still missing.
    pub fn extract(&self, category: Category, html: &str, url: &str) -> ExtractedRecord {
        let doc = Html::parse_document(html);
        let title = utils::page_title(&doc, self.title_max_chars);
        let meta_description = utils::meta_description(&doc);

        match category {
            Category::Product => {
                ExtractedRecord::Product(self.product(&doc, url, title, meta_description))
            }
            Category::Category | Category::Useful => ExtractedRecord::Page(PageRecord {
                title,
                url: url.to_string(),
                meta_description,
            }),
        }
    }

    fn product(
        &self,
        doc: &Html,
        url: &str,
        title: String,
        meta_description: Option<String>,
    ) -> ProductRecord {
        let mut offer = utils::microdata_offer(doc);

        if offer.needs_fallback() {
            let scan = utils::scan_jsonld(doc);
            for failure in &scan.failures {
                tracing::warn!(url, error = %failure, "invalid json-ld block");
            }
            match scan.product {
                Some(fallback) => offer = merge_offer(offer, fallback),
                None if scan.blocks == 0 => tracing::debug!(url, "json-ld not found"),
                None => tracing::debug!(url, blocks = scan.blocks, "no json-ld product with offers"),
            }
        }

        let title = offer
            .name
            .take()
            .map(|name| utils::truncate_chars(name, self.title_max_chars))
            .unwrap_or(title);

        ProductRecord {
            title,
            url: url.to_string(),
            price: offer.price,
            currency: offer.currency,
            availability: self.labels.availability_label(offer.availability),
            condition: self.labels.condition_label(offer.condition),
            return_days: offer.return_days,
            return_fees: offer.return_fees,
            return_method: offer.return_method,
            meta_description,
        }
    }
}
