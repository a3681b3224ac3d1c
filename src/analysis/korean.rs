//! The tokenizer for indexed content: the union of the morphological
//! analyzer's output with a whitespace split, deduplicated in that order
//! (spec §4.2). Modeled directly on the teacher's `VietnameseTokenizer`
//! pattern — a thin `Tokenizer` wrapping an injected analysis step,
//! swappable the same way.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::morph::MorphAnalyzer;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;

pub struct KoreanTokenizer {
    morph: Arc<dyn MorphAnalyzer>,
}

impl KoreanTokenizer {
    pub fn new(morph: Arc<dyn MorphAnalyzer>) -> Self {
        KoreanTokenizer { morph }
    }
}

impl Tokenizer for KoreanTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        let mut position = 0u32;

        for morph in self.morph.morphs(text) {
            if seen.insert(morph.clone()) {
                tokens.push(Token::new(morph, position));
                position += 1;
            }
        }
        for word in text.split_whitespace() {
            if seen.insert(word.to_string()) {
                tokens.push(Token::new(word.to_string(), position));
                position += 1;
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "korean"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(KoreanTokenizer { morph: self.morph.clone() })
    }
}
