use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::types::{JsonldScan, OfferFields};
use crate::selectors::*;
use crate::tools::types::Jsonld;

// Lazy static regex patterns
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Trimmed, whitespace-collapsed value, or `None` when blank.
pub(super) fn clean_value(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_REGEX.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// Cut `text` to at most `max` characters.
pub(super) fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text,
    }
}

pub(super) fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Text of the first `<title>`, cleaned and capped at `max_chars`.
pub(super) fn page_title(doc: &Html, max_chars: usize) -> String {
    doc.select(&TITLE_SELECTOR)
        .next()
        .and_then(|el| clean_value(&el.text().collect::<String>()))
        .map(|title| truncate_chars(title, max_chars))
        .unwrap_or_default()
}

/// `content` of `<meta name="description">`, tags stripped.
pub(super) fn meta_description(doc: &Html) -> Option<String> {
    doc.select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(|content| clean_value(&strip_tags(content)))
}

/* ---------- Microdata ---------- */

/// Value of an itemprop element: `content`, then `href`, then text.
fn itemprop_value(scope: &ElementRef, selector: &Selector) -> Option<String> {
    let el = scope.select(selector).next()?;
    let value = el.value();
    value
        .attr("content")
        .and_then(clean_value)
        .or_else(|| value.attr("href").and_then(clean_value))
        .or_else(|| clean_value(&el.text().collect::<String>()))
}

/// Read the first schema.org Offer scope on the page.
pub(super) fn microdata_offer(doc: &Html) -> OfferFields {
    let Some(offer) = doc.select(&OFFER_SELECTOR).next() else {
        return OfferFields::default();
    };

    OfferFields {
        name: None,
        price: itemprop_value(&offer, &PRICE_SELECTOR)
            .or_else(|| itemprop_value(&offer, &LOW_PRICE_SELECTOR)),
        currency: itemprop_value(&offer, &CURRENCY_SELECTOR),
        availability: itemprop_value(&offer, &AVAILABILITY_SELECTOR),
        condition: itemprop_value(&offer, &CONDITION_SELECTOR),
        return_days: itemprop_value(&offer, &RETURN_DAYS_SELECTOR).and_then(|d| parse_days(&d)),
        return_fees: None,
        return_method: None,
    }
}

fn parse_days(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/* ---------- JSON-LD ---------- */

/// Drop control characters; they are never valid inside JSON strings and
/// only ever whitespace between tokens.
pub(super) fn strip_control_chars(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

/// Drop everything outside printable ASCII.
pub(super) fn strip_non_ascii(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Parse one script block. A block that fails as-is is retried with
/// non-ASCII bytes stripped.
pub(super) fn parse_jsonld_block(raw: &str) -> Result<Value, String> {
    let sanitized = strip_control_chars(raw);
    let sanitized = sanitized.trim();
    match serde_json::from_str(sanitized) {
        Ok(value) => Ok(value),
        Err(first) => serde_json::from_str(strip_non_ascii(sanitized).trim())
            .map_err(|_| first.to_string()),
    }
}

/// Flatten arrays and `@graph` containers into a list of nodes.
pub(super) fn flatten_jsonld(value: Value) -> Jsonld {
    match value {
        Value::Array(arr) => arr.into_iter().flat_map(flatten_jsonld).collect(),
        Value::Object(mut obj) => {
            if let Some(Value::Array(arr)) = obj.remove("@graph") {
                return arr.into_iter().flat_map(flatten_jsonld).collect();
            }
            vec![Value::Object(obj)]
        }
        _ => Vec::new(),
    }
}

/// `@type` equals `type_name`, or contains it when `@type` is a list.
pub(super) fn has_type(node: &Value, type_name: &str) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == type_name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(type_name)),
        _ => false,
    }
}

/// Scalar text of a JSON-LD value.
///
/// Strings are cleaned, numbers keep their exact source text, `{"@id": ..}`
/// references resolve to the id, and lists yield their first usable entry.
pub(super) fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean_value(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj.get("@id").and_then(json_text),
        Value::Array(items) => items.iter().find_map(json_text),
        _ => None,
    }
}

fn json_days(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        Value::String(s) => parse_days(s),
        _ => None,
    }
}

/// Object itself, or the first object of a list.
fn first_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.iter().find(|v| v.is_object()),
        _ => None,
    }
}

fn field<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| !v.is_null())
}

/// Commerce fields of a Product node, or `None` when it has no offers.
pub(super) fn product_offer(product: &Value) -> Option<OfferFields> {
    let offers = field(product, "offers").and_then(first_object)?;
    let spec = field(offers, "priceSpecification").and_then(first_object);
    let policy = field(offers, "hasMerchantReturnPolicy").and_then(first_object);

    let from_spec = |key: &str| spec.and_then(|s| field(s, key)).and_then(json_text);
    let from_policy = |key: &str| policy.and_then(|p| field(p, key));

    Some(OfferFields {
        name: field(product, "name").and_then(json_text),
        price: field(offers, "price")
            .and_then(json_text)
            .or_else(|| field(offers, "lowPrice").and_then(json_text))
            .or_else(|| from_spec("price")),
        currency: field(offers, "priceCurrency")
            .and_then(json_text)
            .or_else(|| from_spec("priceCurrency")),
        availability: field(offers, "availability").and_then(json_text),
        condition: field(offers, "itemCondition")
            .and_then(json_text)
            .or_else(|| field(product, "itemCondition").and_then(json_text)),
        return_days: from_policy("merchantReturnDays").and_then(json_days),
        return_fees: from_policy("returnFees").and_then(json_text),
        return_method: from_policy("returnMethod").and_then(json_text),
    })
}

/// Scan every JSON-LD block in order for the first Product with offers.
pub(super) fn scan_jsonld(doc: &Html) -> JsonldScan {
    let mut scan = JsonldScan::default();

    for el in doc.select(&JSONLD_SELECTOR) {
        scan.blocks += 1;
        let raw = el.text().collect::<String>();
        let value = match parse_jsonld_block(&raw) {
            Ok(value) => value,
            Err(e) => {
                scan.failures.push(e);
                continue;
            }
        };

        let found = flatten_jsonld(value)
            .iter()
            .filter(|node| has_type(node, "Product"))
            .find_map(product_offer);
        if let Some(fields) = found {
            scan.product = Some(fields);
            break;
        }
    }

    scan
}
