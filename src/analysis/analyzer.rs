use std::sync::Arc;

use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::indexable::IndexableFilter;
use crate::analysis::korean::KoreanTokenizer;
use crate::analysis::morph::MorphAnalyzer;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;

/// Text analysis pipeline: one tokenizer, then a chain of filters.
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer { tokenizer, filters: Vec::new(), name }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// The pipeline used by every index: morph-analyzer tokenizer plus the
    /// script filter that rejects mixed/numeric tokens.
    pub fn korean(morph: Arc<dyn MorphAnalyzer>) -> Self {
        Analyzer::new("korean".to_string(), Box::new(KoreanTokenizer::new(morph)))
            .add_filter(Box::new(IndexableFilter))
    }
}
