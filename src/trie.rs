//! Korean-aware suggestion trie (spec §4.5), grounded directly on
//! `konlsearch/trie.py`. Every known token is decomposed to jamo; prefixes
//! of the decomposed form become edges in a set-backed trie so an
//! incomplete Hangul syllable is a true string prefix of a complete token.

use rocksdb::{BoundColumnFamily, WriteBatch};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::analysis::jamo::decompose;
use crate::containers::map::{PrefixedMapBatch, PrefixedMapWriter};
use crate::containers::set::{PrefixedSetBatch, PrefixedSetWriter};
use crate::core::error::Result;
use crate::store::{Db, Store};

const TOKEN_DICT: &str = "token_dict";
const TOKEN_REVERSE_DICT: &str = "token_reverse_dict";

pub struct Trie<'a> {
    store: &'a Store,
    cf_name: String,
}

impl<'a> Trie<'a> {
    pub fn new(store: &'a Store, index_name: &str) -> Self {
        Trie { store, cf_name: format!("{index_name}_trie") }
    }

    pub fn cf(&self) -> Result<Arc<BoundColumnFamily<'a>>> {
        self.store.cf(&self.cf_name)
    }

    fn db(&self) -> &'a Db {
        self.store.raw()
    }

    /// Idempotent: returns immediately if the token is already known.
    pub fn insert(&self, token: &str) -> Result<()> {
        let cf = self.cf()?;
        let token_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_DICT.to_string());
        if token_dict.contains(token)? {
            return Ok(());
        }
        let decomposed = decompose(token);
        token_dict.set(token, &decomposed)?;

        let reverse_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_REVERSE_DICT.to_string());
        reverse_dict.set(&decomposed, token)?;

        let chars: Vec<char> = decomposed.chars().collect();
        for i in 1..chars.len() {
            let parent: String = chars[..i].iter().collect();
            let child: String = chars[..=i].iter().collect();
            let edges = PrefixedSetWriter::new(self.db(), cf.clone(), parent);
            edges.add(&child)?;
        }
        Ok(())
    }

    pub fn insert_batch(&self, batch: &mut WriteBatch, token: &str) -> Result<()> {
        let cf = self.cf()?;
        // Existence check reads the live store; fine for the common case of
        // one BatchWriter call per token within a single uncommitted batch.
        let token_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_DICT.to_string());
        if token_dict.contains(token)? {
            return Ok(());
        }
        let decomposed = decompose(token);

        let mut token_dict_batch = PrefixedMapBatch::new(batch, cf.clone(), TOKEN_DICT.to_string());
        token_dict_batch.set(token, &decomposed);
        let mut reverse_dict_batch = PrefixedMapBatch::new(batch, cf.clone(), TOKEN_REVERSE_DICT.to_string());
        reverse_dict_batch.set(&decomposed, token);

        let chars: Vec<char> = decomposed.chars().collect();
        for i in 1..chars.len() {
            let parent: String = chars[..i].iter().collect();
            let child: String = chars[..=i].iter().collect();
            let mut edges = PrefixedSetBatch::new(batch, cf.clone(), parent);
            edges.add(&child);
        }
        Ok(())
    }

    /// Tail-only edge removal (spec §4.5): edges are removed only for `i`
    /// from `len(decomposed)-1` down to `2`, so prefixes shared with other
    /// tokens remain. This leaves some orphaned interior edges — the
    /// reference behavior, not a bug (DESIGN NOTES §9).
    pub fn delete(&self, token: &str) -> Result<()> {
        let cf = self.cf()?;
        let token_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_DICT.to_string());
        let Some(decomposed) = token_dict.get(token)? else { return Ok(()) };

        let chars: Vec<char> = decomposed.chars().collect();
        for i in (2..chars.len()).rev() {
            let parent: String = chars[..i].iter().collect();
            let child: String = chars[..=i].iter().collect();
            let edges = PrefixedSetWriter::new(self.db(), cf.clone(), parent);
            edges.remove(&child)?;
        }

        token_dict.delete(token)?;
        let reverse_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_REVERSE_DICT.to_string());
        reverse_dict.delete(&decomposed)?;
        debug!(token, "removed token from trie");
        Ok(())
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, token: &str) -> Result<()> {
        let cf = self.cf()?;
        let token_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_DICT.to_string());
        let Some(decomposed) = token_dict.get(token)? else { return Ok(()) };

        let chars: Vec<char> = decomposed.chars().collect();
        for i in (2..chars.len()).rev() {
            let parent: String = chars[..i].iter().collect();
            let child: String = chars[..=i].iter().collect();
            let mut edges = PrefixedSetBatch::new(batch, cf.clone(), parent);
            edges.remove(&child);
        }

        let mut token_dict_batch = PrefixedMapBatch::new(batch, cf.clone(), TOKEN_DICT.to_string());
        token_dict_batch.delete(token);
        let mut reverse_dict_batch = PrefixedMapBatch::new(batch, cf.clone(), TOKEN_REVERSE_DICT.to_string());
        reverse_dict_batch.delete(&decomposed);
        Ok(())
    }

    /// Returns all tokens whose decomposed form starts with `decompose(prefix)`,
    /// sorted lexicographically and deduplicated.
    pub fn suggest(&self, prefix: &str) -> Result<Vec<String>> {
        let cf = self.cf()?;
        let dp = decompose(prefix);
        let reverse_dict = PrefixedMapWriter::new(self.db(), cf.clone(), TOKEN_REVERSE_DICT.to_string());
        let mut results = BTreeSet::new();
        self.collect(&cf, &reverse_dict, &dp, &mut results)?;
        Ok(results.into_iter().collect())
    }

    fn collect(
        &self,
        cf: &Arc<BoundColumnFamily<'a>>,
        reverse_dict: &PrefixedMapWriter<'a>,
        dp: &str,
        results: &mut BTreeSet<String>,
    ) -> Result<()> {
        if let Some(token) = reverse_dict.get(dp)? {
            results.insert(token);
        }
        let edges = PrefixedSetWriter::new(self.db(), cf.clone(), dp.to_string());
        for child in edges.items()? {
            self.collect(cf, reverse_dict, &child, results)?;
        }
        Ok(())
    }
}
