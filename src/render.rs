//! Output Rendering

use crate::error::Result;
use crate::types::{ExtractedRecord, ProductRecord, ResultSet};
use std::fmt::Write;

/// Render an llms.txt-style Markdown document.
///
/// One `##` section per non-empty bucket in priority order, one bullet per
/// record. Empty buckets are omitted.
pub fn render_markdown(set: &ResultSet, site_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {site_name}\n");
    let _ = writeln!(out, "> Gerado automaticamente a partir de {}\n", set.source);

    for (category, records) in set.sections() {
        let _ = writeln!(out, "## {}", category.heading());
        for record in records {
            write_record(&mut out, record);
        }
        out.push('\n');
    }

    out
}

/// Pretty JSON of the whole result set.
pub fn render_json(set: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(set)?)
}

fn write_record(out: &mut String, record: &ExtractedRecord) {
    let label = match record {
        ExtractedRecord::Product(p) => product_label(p),
        ExtractedRecord::Page(p) => escape_label(&p.title),
    };
    let _ = write!(out, "- [{label}]({})", record.url());
    if let Some(description) = record.meta_description() {
        let _ = write!(out, ": {description}");
    }
    out.push('\n');

    if let ExtractedRecord::Product(p) = record {
        write_details(out, p);
    }
}

/// `title - <currency> <price>`; just the title when there is no price.
fn product_label(p: &ProductRecord) -> String {
    let title = escape_label(&p.title);
    match (&p.price, &p.currency) {
        (Some(price), Some(currency)) => format!("{title} - {currency} {price}"),
        (Some(price), None) => format!("{title} - {price}"),
        _ => title,
    }
}

fn write_details(out: &mut String, p: &ProductRecord) {
    if let Some(availability) = &p.availability {
        let _ = writeln!(out, "  - Disponibilidade: {availability}");
    }
    if let Some(condition) = &p.condition {
        let _ = writeln!(out, "  - Condição: {condition}");
    }

    let mut policy = Vec::new();
    if let Some(days) = p.return_days {
        policy.push(format!("{days} dias"));
    }
    policy.extend(p.return_fees.iter().cloned());
    policy.extend(p.return_method.iter().cloned());
    if !policy.is_empty() {
        let _ = writeln!(out, "  - Devolução: {}", policy.join(", "));
    }
}

fn escape_label(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
