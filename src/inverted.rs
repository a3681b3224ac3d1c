//! Inverted index (spec §4.4): owns the `<name>_inverted_index` column
//! family. Token → sorted set of document ids, plus the trie that every
//! indexed token is also pushed into.

use rocksdb::{BoundColumnFamily, Snapshot, WriteBatch};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::containers::set::{PrefixedSetBatch, PrefixedSetView, PrefixedSetWriter};
use crate::core::error::Result;
use crate::core::types::TokenSearchMode;
use crate::store::Store;
use crate::trie::Trie;

pub struct InvertedIndex<'a> {
    store: &'a Store,
    cf_name: String,
    trie: Trie<'a>,
}

impl<'a> InvertedIndex<'a> {
    pub fn new(store: &'a Store, index_name: &str) -> Self {
        InvertedIndex {
            store,
            cf_name: format!("{index_name}_inverted_index"),
            trie: Trie::new(store, index_name),
        }
    }

    fn cf(&self) -> Result<Arc<BoundColumnFamily<'a>>> {
        self.store.cf(&self.cf_name)
    }

    pub fn trie(&self) -> &Trie<'a> {
        &self.trie
    }

    pub fn index(&self, doc_id: u64, tokens: &[String]) -> Result<()> {
        let cf = self.cf()?;
        let member = doc_id.to_string();
        for token in tokens {
            let set = PrefixedSetWriter::new(self.store.raw(), cf.clone(), token.clone());
            set.add(&member)?;
            self.trie.insert(token)?;
        }
        Ok(())
    }

    pub fn index_batch(&self, batch: &mut WriteBatch, doc_id: u64, tokens: &[String]) -> Result<()> {
        let cf = self.cf()?;
        let member = doc_id.to_string();
        for token in tokens {
            let mut set = PrefixedSetBatch::new(batch, cf.clone(), token.clone());
            set.add(&member);
            self.trie.insert_batch(batch, token)?;
        }
        Ok(())
    }

    pub fn delete(&self, doc_id: u64, tokens: &[String]) -> Result<()> {
        let cf = self.cf()?;
        let member = doc_id.to_string();
        for token in tokens {
            let set = PrefixedSetWriter::new(self.store.raw(), cf.clone(), token.clone());
            set.remove(&member)?;
            if set.len()? == 0 {
                self.trie.delete(token)?;
            }
        }
        Ok(())
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, doc_id: u64, tokens: &[String]) -> Result<()> {
        let cf = self.cf()?;
        let member = doc_id.to_string();
        for token in tokens {
            let live = PrefixedSetWriter::new(self.store.raw(), cf.clone(), token.clone());
            let remaining = live.items()?.into_iter().filter(|m| m != &member).count();

            let mut set = PrefixedSetBatch::new(batch, cf.clone(), token.clone());
            set.remove(&member);
            if remaining == 0 {
                self.trie.delete_batch(batch, token)?;
            }
        }
        Ok(())
    }

    /// Shares one snapshot across every token in the query, per spec §5.
    pub fn search(&self, tokens: &[String], mode: TokenSearchMode, snapshot: &Snapshot<'a>) -> Result<Vec<u64>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let cf = self.cf()?;
        let mut sets: Vec<BTreeSet<u64>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let view = PrefixedSetView::new(snapshot, cf.clone(), token.clone());
            let ids: BTreeSet<u64> = view.items()?.into_iter().filter_map(|s| s.parse().ok()).collect();
            sets.push(ids);
        }

        let mut iter = sets.into_iter();
        let mut result = iter.next().unwrap_or_default();
        match mode {
            TokenSearchMode::Or => {
                for s in iter {
                    result.extend(s);
                }
            }
            TokenSearchMode::And => {
                for s in iter {
                    result = result.intersection(&s).cloned().collect();
                }
            }
        }
        Ok(result.into_iter().collect())
    }

    pub fn search_suggestions(&self, prefix: &str) -> Result<Vec<String>> {
        self.trie.suggest(prefix)
    }
}
