//! Forward index (spec §4.3): document id allocation, content storage,
//! hash dedup, length counters, and the boolean/phrase/complex search
//! entry points layered on the inverted index.

use rocksdb::{BoundColumnFamily, Direction, IteratorMode, Snapshot, WriteBatch};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::morph::{MorphAnalyzer, WhitespaceMorphAnalyzer};
use crate::analysis::{tokenize, tokenize_with_order};
use crate::batch::BatchWriter;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{BoolMode, Condition, DocRecord, IndexOutcome, QueryNode, SearchMode, TokenSearchMode};
use crate::hash::content_hash;
use crate::inverted::InvertedIndex;
use crate::lock::StripedLock;
use crate::store::keys::{decode_id, encode_hash, encode_id};
use crate::store::Store;

pub struct Index<'a> {
    pub(crate) store: &'a Store,
    locks: &'a StripedLock,
    pub(crate) name: String,
    pub(crate) analyzer: Analyzer,
    pub(crate) morph: Arc<dyn MorphAnalyzer>,
    pub(crate) inverted: InvertedIndex<'a>,
}

impl<'a> Index<'a> {
    pub fn open(store: &'a Store, locks: &'a StripedLock, name: &str) -> Self {
        let morph: Arc<dyn MorphAnalyzer> = Arc::new(WhitespaceMorphAnalyzer);
        let analyzer = Analyzer::korean(morph.clone());
        let inverted = InvertedIndex::new(store, name);
        Index { store, locks, name: name.to_string(), analyzer, morph, inverted }
    }

    /// Swaps in a real morphological analyzer (the default is whitespace-only).
    pub fn with_morph_analyzer(mut self, morph: Arc<dyn MorphAnalyzer>) -> Self {
        self.analyzer = Analyzer::korean(morph.clone());
        self.morph = morph;
        self
    }

    pub(crate) fn cf(&self) -> Result<Arc<BoundColumnFamily<'a>>> {
        self.store.cf(&self.name)
    }

    pub(crate) fn document_key(&self, id: u64) -> String {
        format!("{}:document:{}", self.name, encode_id(id))
    }

    fn document_prefix(&self) -> String {
        format!("{}:document:", self.name)
    }

    pub(crate) fn tokens_key(&self, id: u64) -> String {
        format!("{id}:tokens")
    }

    pub(crate) fn len_key(&self) -> String {
        format!("{}:__len__:document", self.name)
    }

    pub(crate) fn hash_key(&self, hash: u128) -> String {
        format!("{}:hash:dict:{}", self.name, encode_hash(hash))
    }

    pub(crate) fn next_document_id(&self) -> Result<u64> {
        let cf = self.cf()?;
        let current = match self.store.raw().get_cf(&cf, "last_document_id")? {
            Some(v) => std::str::from_utf8(&v)?.parse().unwrap_or(0),
            None => 0,
        };
        Ok(current + 1)
    }

    pub fn len(&self) -> Result<u64> {
        let cf = self.cf()?;
        match self.store.raw().get_cf(&cf, self.len_key())? {
            Some(v) => Ok(std::str::from_utf8(&v)?.parse().unwrap_or(0)),
            None => Ok(0),
        }
    }

    pub fn index(&self, doc: &str) -> Result<IndexOutcome> {
        let _guard = self.locks.lock(&self.name);
        let cf = self.cf()?;

        let hash = content_hash(doc);
        let hash_key = self.hash_key(hash);
        if let Some(existing) = self.store.raw().get_cf(&cf, &hash_key)? {
            let existing_id: u64 = std::str::from_utf8(&existing)?.parse().unwrap_or(0);
            return Ok(IndexOutcome::Conflict(existing_id));
        }

        let tokens = tokenize(&self.analyzer, doc);
        let id = self.next_document_id()?;
        let len = self.len()?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf, "last_document_id", id.to_string());
        batch.put_cf(&cf, self.document_key(id), doc);
        batch.put_cf(&cf, self.tokens_key(id), bincode::serialize(&tokens)?);
        batch.put_cf(&cf, self.len_key(), (len + 1).to_string());
        self.inverted.index_batch(&mut batch, id, &tokens)?;
        batch.put_cf(&cf, &hash_key, id.to_string());

        self.store.raw().write(batch)?;
        debug!(index = %self.name, id, "indexed document");
        Ok(IndexOutcome::Success(id))
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.locks.lock(&self.name);
        let cf = self.cf()?;

        let doc = self
            .store
            .raw()
            .get_cf(&cf, self.document_key(id))?
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("document {id} not found in index '{}'", self.name)))?;
        let doc = String::from_utf8(doc)?;
        let tokens = self.get_tokens(id)?;
        let hash = content_hash(&doc);
        let len = self.len()?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf, self.hash_key(hash));
        self.inverted.delete_batch(&mut batch, id, &tokens)?;
        batch.delete_cf(&cf, self.tokens_key(id));
        batch.delete_cf(&cf, self.document_key(id));
        batch.put_cf(&cf, self.len_key(), len.saturating_sub(1).to_string());

        self.store.raw().write(batch)?;
        debug!(index = %self.name, id, "deleted document");
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<Option<DocRecord>> {
        let cf = self.cf()?;
        match self.store.raw().get_cf(&cf, self.document_key(id))? {
            Some(v) => Ok(Some(DocRecord { id, doc: String::from_utf8(v)? })),
            None => Ok(None),
        }
    }

    pub fn get_tokens(&self, id: u64) -> Result<Vec<String>> {
        let cf = self.cf()?;
        match self.store.raw().get_cf(&cf, self.tokens_key(id))? {
            Some(v) => Ok(bincode::deserialize(&v)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_range(&self, start: u64, end: u64) -> Result<Vec<DocRecord>> {
        let cf = self.cf()?;
        let prefix = self.document_prefix();
        let start_key = self.document_key(start);
        let end_key = self.document_key(end);
        let mut out = Vec::new();

        let iter = self.store.raw().iterator_cf(&cf, IteratorMode::From(start_key.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, v) = entry?;
            let k = String::from_utf8_lossy(&k);
            if !k.starts_with(&prefix) || k.as_ref() >= end_key.as_str() {
                break;
            }
            let Some(id) = decode_id(&k[prefix.len()..]) else { continue };
            out.push(DocRecord { id, doc: String::from_utf8_lossy(&v).to_string() });
        }
        Ok(out)
    }

    pub fn get_all(&self) -> Result<Vec<DocRecord>> {
        self.get_range(1, u64::MAX)
    }

    pub fn get_multi(&self, ids: &[u64]) -> Result<Vec<DocRecord>> {
        let cf = self.cf()?;
        let keys: Vec<(Arc<BoundColumnFamily<'a>>, Vec<u8>)> =
            ids.iter().map(|id| (cf.clone(), self.document_key(*id).into_bytes())).collect();
        let results = self.store.raw().multi_get_cf(keys.iter().map(|(cf, k)| (cf, k.as_slice())));

        let mut out = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            if let Ok(Some(v)) = result {
                out.push(DocRecord { id: *id, doc: String::from_utf8_lossy(&v).to_string() });
            }
        }
        Ok(out)
    }

    pub fn search(&self, tokens: &[String], mode: SearchMode) -> Result<Vec<u64>> {
        let snapshot = self.store.raw().snapshot();
        match mode {
            SearchMode::Or => self.inverted.search(tokens, TokenSearchMode::Or, &snapshot),
            SearchMode::And => self.inverted.search(tokens, TokenSearchMode::And, &snapshot),
            SearchMode::Phrase => self.search_phrase(tokens, &snapshot),
        }
    }

    fn search_phrase(&self, tokens: &[String], snapshot: &Snapshot<'a>) -> Result<Vec<u64>> {
        let candidates = self.inverted.search(tokens, TokenSearchMode::And, snapshot)?;
        let query_order = tokenize_with_order(self.morph.as_ref(), &tokens.join(" "));

        let mut matched = Vec::new();
        for id in candidates {
            if let Some(doc) = self.get(id)? {
                let doc_order = tokenize_with_order(self.morph.as_ref(), &doc.doc);
                if positions_non_decreasing(&query_order, &doc_order) {
                    matched.push(id);
                }
            }
        }
        matched.sort_unstable();
        Ok(matched)
    }

    pub fn search_complex(&self, node: &QueryNode) -> Result<Vec<u64>> {
        let snapshot = self.store.raw().snapshot();
        let result = self.eval_node(node, &snapshot)?;
        let mut ids: Vec<u64> = result.into_iter().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn eval_node(&self, node: &QueryNode, snapshot: &Snapshot<'a>) -> Result<BTreeSet<u64>> {
        match node {
            QueryNode::Leaf(Condition { tokens, mode }) => {
                Ok(self.inverted.search(tokens, *mode, snapshot)?.into_iter().collect())
            }
            QueryNode::Branch { condition1, condition2, mode } => {
                let a = self.eval_node(condition1, snapshot)?;
                let b = self.eval_node(condition2, snapshot)?;
                Ok(match mode {
                    BoolMode::And => a.intersection(&b).cloned().collect(),
                    BoolMode::Or => a.union(&b).cloned().collect(),
                })
            }
        }
    }

    pub fn search_suggestions(&self, prefix: &str) -> Result<Vec<String>> {
        self.inverted.search_suggestions(prefix)
    }

    pub fn to_batch(&self) -> Result<BatchWriter<'_, 'a>> {
        BatchWriter::new(self)
    }

    pub fn close(self) {
        debug!(index = %self.name, "closed index handle");
    }
}

/// Checks that the ordered query tokens appear in non-decreasing position
/// order within the candidate document's ordered tokenization (spec §4.3
/// PHRASE).
fn positions_non_decreasing(query: &[String], doc: &[String]) -> bool {
    if query.is_empty() {
        return false;
    }
    let mut last = 0usize;
    for (i, q) in query.iter().enumerate() {
        let search_from = if i == 0 { 0 } else { last };
        match doc.iter().skip(search_from).position(|t| t == q) {
            Some(offset) => last = search_from + offset,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_order_rejects_reversed_tokens() {
        let doc: Vec<String> = ["마법", "특별"].into_iter().map(String::from).collect();
        let ordered: Vec<String> = ["마법", "특별"].into_iter().map(String::from).collect();
        let reversed: Vec<String> = ["특별", "마법"].into_iter().map(String::from).collect();
        assert!(positions_non_decreasing(&ordered, &doc));
        assert!(!positions_non_decreasing(&reversed, &doc));
    }
}
