//! Classify Tools

mod tests;
mod utils;

pub mod types;

pub use types::*;

use crate::types::{Category, ClassifiedRequest};
use regex::Regex;

/// Compile a pattern set once for a run.
///
/// A blank pattern disables its category. A pattern that fails to compile
/// disables its category for the run and is logged here, once.
pub fn compile_patterns(patterns: &PatternSet) -> CompiledPatterns {
    let mut rules = Vec::new();

    for category in Category::ALL {
        let Some(source) = patterns.get(category).and_then(utils::normalize_pattern) else {
            continue;
        };
        match Regex::new(&source) {
            Ok(re) => rules.push((category, re)),
            Err(e) => {
                tracing::warn!(
                    %category,
                    pattern = %source,
                    error = %e,
                    "invalid pattern, category disabled for this run"
                );
            }
        }
    }

    CompiledPatterns { rules }
}

/// Classify URLs against raw patterns.
///
/// See [`classify_compiled`].
pub fn classify(urls: &[String], patterns: &PatternSet) -> Vec<ClassifiedRequest> {
    classify_compiled(urls, &compile_patterns(patterns))
}

/// Classify URLs in priority order Product > Category > Useful.
///
/// The first matching category wins; URLs matching nothing are dropped.
/// `position` records each URL's index in `urls`.
pub fn classify_compiled(urls: &[String], patterns: &CompiledPatterns) -> Vec<ClassifiedRequest> {
    urls.iter()
        .enumerate()
        .filter_map(|(position, url)| {
            patterns.category_of(url).map(|category| ClassifiedRequest {
                position,
                category,
                url: url.clone(),
            })
        })
        .collect()
}
