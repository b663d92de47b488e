#[cfg(test)]
mod tests {
    use crate::tools::classify::utils::normalize_pattern;
    use crate::tools::classify::*;
    use crate::types::{Category, ClassifiedRequest};

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_drops_unmatched() {
        let urls = urls(&[
            "https://shop.test/a/p",
            "https://shop.test/b/c",
            "https://shop.test/unmatched",
        ]);
        let patterns = PatternSet::new()
            .with(Category::Product, r".*\/p$")
            .with(Category::Category, r".*\/c$")
            .with(Category::Useful, "");

        let items = classify(&urls, &patterns);

        assert_eq!(
            items,
            vec![
                ClassifiedRequest {
                    position: 0,
                    category: Category::Product,
                    url: "https://shop.test/a/p".into(),
                },
                ClassifiedRequest {
                    position: 1,
                    category: Category::Category,
                    url: "https://shop.test/b/c".into(),
                },
            ]
        );
    }

    #[test]
    fn test_classify_first_match_wins() {
        let urls = urls(&["https://shop.test/produto/tenis"]);
        let patterns = PatternSet::new()
            .with(Category::Product, "produto")
            .with(Category::Category, "shop")
            .with(Category::Useful, ".*");

        let items = classify(&urls, &patterns);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, Category::Product);
    }

    #[test]
    fn test_classify_lower_priority_when_higher_misses() {
        let urls = urls(&["https://shop.test/sobre", "https://shop.test/contato"]);
        let patterns = PatternSet::new()
            .with(Category::Product, "produto")
            .with(Category::Useful, "sobre|contato");

        let items = classify(&urls, &patterns);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.category == Category::Useful));
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_classify_keeps_duplicates() {
        let urls = urls(&["https://shop.test/x/p", "https://shop.test/x/p"]);
        let patterns = PatternSet::new().with(Category::Product, "/p$");

        let items = classify(&urls, &patterns);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].position, 0);
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_invalid_pattern_disables_only_its_category() {
        let urls = urls(&["https://shop.test/a/p", "https://shop.test/b/c"]);
        let patterns = PatternSet::new()
            .with(Category::Product, "(unclosed")
            .with(Category::Category, "/c$");

        let compiled = compile_patterns(&patterns);
        assert_eq!(compiled.enabled(), vec![Category::Category]);

        let items = classify_compiled(&urls, &compiled);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://shop.test/b/c");
    }

    #[test]
    fn test_all_disabled_classifies_nothing() {
        let urls = urls(&["https://shop.test/a"]);
        let compiled = compile_patterns(&PatternSet::new().with(Category::Useful, "   "));
        assert!(compiled.is_empty());
        assert!(classify_compiled(&urls, &compiled).is_empty());
    }

    #[test]
    fn test_delimited_patterns() {
        let urls = urls(&["https://shop.test/Produto/1", "https://shop.test/b/c"]);
        let patterns = PatternSet::new()
            .with(Category::Product, "/produto/i")
            .with(Category::Category, r"#/c$#");

        let items = classify(&urls, &patterns);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Product);
        assert_eq!(items[1].category, Category::Category);
    }

    #[test]
    fn test_normalize_pattern() {
        assert_eq!(normalize_pattern(""), None);
        assert_eq!(normalize_pattern("  "), None);
        assert_eq!(normalize_pattern(r".*\/p$"), Some(r".*\/p$".to_string()));
        assert_eq!(normalize_pattern(r"/.*\/p$/"), Some(r".*\/p$".to_string()));
        assert_eq!(normalize_pattern("/produto/iu"), Some("(?i)produto".to_string()));
        // Trailing text that is not a flag set: not delimited
        assert_eq!(
            normalize_pattern("/produtos/.*"),
            Some("/produtos/.*".to_string())
        );
        assert_eq!(normalize_pattern("/"), Some("/".to_string()));
    }
}
