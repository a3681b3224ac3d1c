pub mod analyzer;
pub mod filter;
pub mod filters {
    pub mod indexable;
}
pub mod jamo;
pub mod korean;
pub mod morph;
pub mod pipeline;
pub mod sanitize;
pub mod script;
pub mod token;
pub mod tokenizer;

pub use pipeline::{tokenize, tokenize_with_order};
