use crate::analysis::filter::TokenFilter;
use crate::analysis::script::is_indexable;
use crate::analysis::token::Token;

/// Drops tokens that aren't pure-Latin or pure-Hangul (spec §4.2).
pub struct IndexableFilter;

impl TokenFilter for IndexableFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter().filter(|t| is_indexable(&t.text)).collect()
    }

    fn name(&self) -> &str {
        "indexable"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(IndexableFilter)
    }
}
