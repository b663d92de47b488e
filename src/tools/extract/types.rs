use serde::{Deserialize, Serialize};

/// Commerce attributes read from one data source.
///
/// Both the microdata tier and the JSON-LD tier produce one of these;
/// [`merge_offer`](super::merge_offer) reconciles them.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfferFields {
    /// Product name (JSON-LD only); replaces the page title when present.
    pub name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    /// Raw vocabulary URI, before label translation.
    pub availability: Option<String>,
    /// Raw vocabulary URI, before label translation.
    pub condition: Option<String>,
    pub return_days: Option<u32>,
    pub return_fees: Option<String>,
    pub return_method: Option<String>,
}

impl OfferFields {
    /// True while price, currency or availability is still missing.
    pub fn needs_fallback(&self) -> bool {
        self.price.is_none() || self.currency.is_none() || self.availability.is_none()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of scanning every JSON-LD block on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonldScan {
    /// Number of `application/ld+json` blocks found.
    pub blocks: usize,
    /// Parse error per block that could not be read.
    pub failures: Vec<String>,
    /// Fields of the first Product with offers.
    pub product: Option<OfferFields>,
}
