//! Top-level `tokenize`/`tokenize_with_order` entry points (spec §4.2).

use crate::analysis::analyzer::Analyzer;
use crate::analysis::morph::MorphAnalyzer;
use crate::analysis::sanitize::sanitize;
use crate::analysis::script::is_indexable;

/// `sanitize(doc)` then the analyzer's morphs ∪ whitespace-split, script
/// filtered, deduplicated. This is the set stored alongside a document.
pub fn tokenize(analyzer: &Analyzer, doc: &str) -> Vec<String> {
    let sanitized = sanitize(doc);
    analyzer.analyze(&sanitized).into_iter().map(|t| t.text).collect()
}

/// Morph-analyzer output only, in order, without deduping and without the
/// whitespace union — used solely to check phrase ordering (spec §4.3).
pub fn tokenize_with_order(morph: &dyn MorphAnalyzer, doc: &str) -> Vec<String> {
    let sanitized = sanitize(doc);
    morph
        .morphs(&sanitized)
        .into_iter()
        .filter(|t| is_indexable(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::morph::WhitespaceMorphAnalyzer;
    use std::sync::Arc;

    #[test]
    fn tokenize_unions_and_dedupes() {
        let analyzer = Analyzer::korean(Arc::new(WhitespaceMorphAnalyzer));
        let tokens = tokenize(&analyzer, "그 비스크 돌은 사랑을 한다");
        assert!(tokens.contains(&"비스크".to_string()));
        assert!(tokens.contains(&"사랑을".to_string()));
    }

    #[test]
    fn tokenize_with_order_preserves_duplicates_and_order() {
        let ordered = tokenize_with_order(&WhitespaceMorphAnalyzer, "마법 특별 마법");
        assert_eq!(ordered, vec!["마법", "특별", "마법"]);
    }
}
