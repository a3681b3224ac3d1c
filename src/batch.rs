//! Batched writer (spec §4.6): buffers multiple `index`/`delete` calls
//! into one write batch, with in-memory shadow state so intra-batch
//! reads stay consistent before `commit()`.

use rocksdb::WriteBatch;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::analysis::tokenize;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::IndexOutcome;
use crate::forward::Index;
use crate::hash::content_hash;

pub struct BatchWriter<'b, 'a> {
    index: &'b Index<'a>,
    batch: WriteBatch,
    last_document_id: u64,
    indexing_count: i64,
    deleting_count: i64,
    indexed_documents: HashMap<u128, u64>,
    deleted_document_ids: HashSet<u64>,
}

impl<'b, 'a> BatchWriter<'b, 'a> {
    pub fn new(index: &'b Index<'a>) -> Result<Self> {
        let last_document_id = index.next_document_id()?.saturating_sub(1);
        Ok(BatchWriter {
            index,
            batch: WriteBatch::default(),
            last_document_id,
            indexing_count: 0,
            deleting_count: 0,
            indexed_documents: HashMap::new(),
            deleted_document_ids: HashSet::new(),
        })
    }

    pub fn index(&mut self, doc: &str) -> Result<IndexOutcome> {
        let cf = self.index.cf()?;
        let hash = content_hash(doc);

        if let Some(&existing) = self.indexed_documents.get(&hash) {
            return Ok(IndexOutcome::Conflict(existing));
        }
        let hash_key = self.index.hash_key(hash);
        if let Some(existing) = self.index.store.raw().get_cf(&cf, &hash_key)? {
            let existing_id: u64 = std::str::from_utf8(&existing)?.parse().unwrap_or(0);
            return Ok(IndexOutcome::Conflict(existing_id));
        }

        let tokens = tokenize(&self.index.analyzer, doc);
        self.last_document_id += 1;
        let id = self.last_document_id;

        self.batch.put_cf(&cf, "last_document_id", id.to_string());
        self.batch.put_cf(&cf, self.index.document_key(id), doc);
        self.batch.put_cf(&cf, self.index.tokens_key(id), bincode::serialize(&tokens)?);
        self.index.inverted.index_batch(&mut self.batch, id, &tokens)?;
        self.batch.put_cf(&cf, &hash_key, id.to_string());

        self.indexed_documents.insert(hash, id);
        self.indexing_count += 1;
        Ok(IndexOutcome::Success(id))
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        if self.deleted_document_ids.contains(&id) {
            return Ok(());
        }
        let cf = self.index.cf()?;
        let doc = self
            .index
            .store
            .raw()
            .get_cf(&cf, self.index.document_key(id))?
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("document {id} not found in index '{}'", self.index.name)))?;
        let doc = String::from_utf8(doc)?;
        let tokens = self.index.get_tokens(id)?;
        let hash = content_hash(&doc);

        self.batch.delete_cf(&cf, self.index.hash_key(hash));
        self.index.inverted.delete_batch(&mut self.batch, id, &tokens)?;
        self.batch.delete_cf(&cf, self.index.tokens_key(id));
        self.batch.delete_cf(&cf, self.index.document_key(id));

        self.deleted_document_ids.insert(id);
        self.indexed_documents.retain(|_, &mut shadow_id| shadow_id != id);
        self.deleting_count += 1;
        Ok(())
    }

    pub fn commit(mut self) -> Result<()> {
        let cf = self.index.cf()?;
        let stored_len = self.index.len()? as i64;
        let new_len = (stored_len + self.indexing_count - self.deleting_count).max(0);
        self.batch.put_cf(&cf, self.index.len_key(), new_len.to_string());

        self.index.store.raw().write(self.batch)?;
        debug!(
            index = %self.index.name,
            indexed = self.indexing_count,
            deleted = self.deleting_count,
            "committed batch"
        );
        Ok(())
    }

    pub fn rollback(self) {
        debug!(index = %self.index.name, "rolled back batch");
    }
}
