//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for JSON-LD script tags.
pub static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("valid jsonld selector")
});

/// Selector for `<title>` tags.
pub static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Selector for `<meta name="description">`.
pub static META_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description'], meta[name='Description']")
        .expect("valid meta description selector")
});

/// Selector for schema.org Offer microdata scopes (http and https).
pub static OFFER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        "[itemtype='https://schema.org/Offer'], [itemtype='http://schema.org/Offer'], \
         [itemtype='https://schema.org/AggregateOffer'], [itemtype='http://schema.org/AggregateOffer']",
    )
    .expect("valid offer selector")
});

macro_rules! itemprop {
    ($name:ident, $prop:literal) => {
        #[doc = concat!("Selector for `itemprop=\"", $prop, "\"`.")]
        pub static $name: Lazy<Selector> = Lazy::new(|| {
            Selector::parse(concat!("[itemprop='", $prop, "']")).expect("valid itemprop selector")
        });
    };
}

itemprop!(PRICE_SELECTOR, "price");
itemprop!(LOW_PRICE_SELECTOR, "lowPrice");
itemprop!(CURRENCY_SELECTOR, "priceCurrency");
itemprop!(AVAILABILITY_SELECTOR, "availability");
itemprop!(CONDITION_SELECTOR, "itemCondition");
itemprop!(RETURN_DAYS_SELECTOR, "merchantReturnDays");
