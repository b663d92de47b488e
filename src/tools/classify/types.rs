use crate::types::Category;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw per-category patterns as supplied by the caller.
///
/// `None` or a blank string disables the category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSet {
    pub product: Option<String>,
    pub category: Option<String>,
    pub useful: Option<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, pattern: impl Into<String>) -> Self {
        let pattern = Some(pattern.into());
        match category {
            Category::Product => self.product = pattern,
            Category::Category => self.category = pattern,
            Category::Useful => self.useful = pattern,
        }
        self
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Product => self.product.as_deref(),
            Category::Category => self.category.as_deref(),
            Category::Useful => self.useful.as_deref(),
        }
    }
}

/// Patterns compiled once per run, in priority order.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatterns {
    pub(super) rules: Vec<(Category, Regex)>,
}

impl CompiledPatterns {
    /// Categories that can still match.
    pub fn enabled(&self) -> Vec<Category> {
        self.rules.iter().map(|(c, _)| *c).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First category whose pattern matches `url`.
    pub fn category_of(&self, url: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(c, _)| *c)
    }
}
