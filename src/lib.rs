//! Embedded full-text search engine for short Korean/Latin-script
//! documents, built on a sorted key-value store with column families,
//! write batches, and prefix iteration.
//!
//! ```text
//! document ──► sanitize ──► tokenize (morphs ∪ whitespace, script-filtered)
//!          │                 │
//!          │                 └─► tokens (set)
//!          │
//!          ├─► xxh128 hash ──► hash→id dedup lookup
//!          │
//!          └─► forward writer: allocate id, store doc + tokens, bump length
//!                              │
//!                              ├─► inverted writer: token → add id
//!                              └─► trie writer: jamo-decomposed paths
//! ```

pub mod analysis;
pub mod batch;
pub mod containers;
pub mod core;
pub mod engine;
pub mod forward;
pub mod hash;
pub mod inverted;
pub mod lock;
pub mod log;
pub mod store;
pub mod suggest;
pub mod trie;

pub use batch::BatchWriter;
pub use core::config::{EngineConfig, OpenMode};
pub use core::error::{Error, ErrorKind, Result};
pub use core::types::{BoolMode, Condition, DocRecord, IndexOutcome, QueryNode, SearchMode, TokenSearchMode};
pub use engine::Engine;
pub use forward::Index;
pub use log::SearchLog;
pub use suggest::TrieSuggestions;
