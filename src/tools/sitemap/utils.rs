use super::types::Sitemap;
use crate::error::{Result, SitellmsError};
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    Index,
}

impl Root {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "urlset" => Some(Root::UrlSet),
            "sitemapindex" => Some(Root::Index),
            _ => None,
        }
    }

    /// Element that wraps one `<loc>` under this root.
    fn entry(&self) -> &'static str {
        match self {
            Root::UrlSet => "url",
            Root::Index => "sitemap",
        }
    }
}

/// Parse a `<urlset>` or `<sitemapindex>` document.
///
/// Collects the `<loc>` of every entry in document order; entries without a
/// location are skipped. Malformed XML or any other root is an error.
pub(super) fn parse_sitemap_xml(xml: &str) -> Result<Sitemap> {
    let xml = xml.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Root> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut current_loc = String::new();
    let mut locations = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            SitellmsError::InvalidSitemap(format!(
                "XML parse error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if stack.is_empty() {
                    root = Some(open_root(root, &name)?);
                } else if stack.len() == 1 {
                    current_loc.clear();
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if stack.is_empty() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    root = Some(open_root(root, &name)?);
                }
            }
            Event::Text(e) => {
                if in_loc(root, &stack) {
                    let text = e.unescape().map_err(|err| {
                        SitellmsError::InvalidSitemap(format!("bad text in <loc>: {err}"))
                    })?;
                    current_loc.push_str(text.trim());
                }
            }
            Event::CData(e) => {
                if in_loc(root, &stack) {
                    current_loc.push_str(String::from_utf8_lossy(&e).trim());
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if let (Some(root), Some(closed)) = (root, closed) {
                    if stack.len() == 1 && closed == root.entry() && !current_loc.is_empty() {
                        locations.push(std::mem::take(&mut current_loc));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SitellmsError::InvalidSitemap(format!(
            "unexpected end of document inside <{}>",
            stack.join("><")
        )));
    }

    match root {
        Some(Root::UrlSet) => Ok(Sitemap::UrlSet(locations)),
        Some(Root::Index) => Ok(Sitemap::Index(locations)),
        None => Err(SitellmsError::InvalidSitemap(
            "missing <urlset> or <sitemapindex> root".into(),
        )),
    }
}

fn open_root(existing: Option<Root>, name: &str) -> Result<Root> {
    if existing.is_some() {
        return Err(SitellmsError::InvalidSitemap(
            "more than one root element".into(),
        ));
    }
    Root::from_name(name).ok_or_else(|| {
        SitellmsError::InvalidSitemap(format!("unexpected root element <{name}>"))
    })
}

/// Inside `<root><entry><loc>`.
fn in_loc(root: Option<Root>, stack: &[String]) -> bool {
    match (root, stack) {
        (Some(root), [_, entry, loc]) => entry == root.entry() && loc == "loc",
        _ => false,
    }
}
