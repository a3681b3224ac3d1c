//! Prefixed set primitive (spec §4.1): `add/remove/contains/items`, three
//! flavors over the same key shape `<prefix>:set:<member>`.

use rocksdb::{BoundColumnFamily, Direction, IteratorMode, Snapshot, WriteBatch};
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::Db;

fn member_key(prefix: &str, member: &str) -> String {
    format!("{prefix}:set:{member}")
}

fn len_key(prefix: &str) -> String {
    format!("{prefix}:__len__:dict")
}

/// Direct writer: mutations apply immediately against the live column family.
pub struct PrefixedSetWriter<'a> {
    db: &'a Db,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a> PrefixedSetWriter<'a> {
    pub fn new(db: &'a Db, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedSetWriter { db, cf, prefix }
    }

    pub fn contains(&self, member: &str) -> Result<bool> {
        Ok(self.db.get_cf(&self.cf, member_key(&self.prefix, member))?.is_some())
    }

    pub fn len(&self) -> Result<usize> {
        match self.db.get_cf(&self.cf, len_key(&self.prefix))? {
            Some(v) => Ok(String::from_utf8_lossy(&v).parse().unwrap_or(0)),
            None => Ok(0),
        }
    }

    pub fn add(&self, member: &str) -> Result<()> {
        if !self.contains(member)? {
            self.db.put_cf(&self.cf, member_key(&self.prefix, member), b"1")?;
            let len = self.len()?;
            self.db.put_cf(&self.cf, len_key(&self.prefix), (len + 1).to_string())?;
        }
        Ok(())
    }

    pub fn remove(&self, member: &str) -> Result<()> {
        if self.contains(member)? {
            self.db.delete_cf(&self.cf, member_key(&self.prefix, member))?;
            let len = self.len()?;
            self.db.put_cf(&self.cf, len_key(&self.prefix), len.saturating_sub(1).to_string())?;
        }
        Ok(())
    }

    pub fn items(&self) -> Result<Vec<String>> {
        let scan_prefix = format!("{}:set:", self.prefix);
        let mut out = Vec::new();
        let iter = self
            .db
            .iterator_cf(&self.cf, IteratorMode::From(scan_prefix.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, _) = entry?;
            let k = String::from_utf8_lossy(&k);
            if !k.starts_with(&scan_prefix) {
                break;
            }
            out.push(k[scan_prefix.len()..].to_string());
        }
        Ok(out)
    }

    pub fn update(&self, members: &[String]) -> Result<()> {
        for m in members {
            self.add(m)?;
        }
        Ok(())
    }
}

/// Write-batch writer: mutations are buffered, not applied until the caller
/// commits the batch. No length bookkeeping here — callers that need
/// length tracked through a batch (forward index) maintain their own
/// shadow count, per spec §4.6.
pub struct PrefixedSetBatch<'a, 'b> {
    batch: &'b mut WriteBatch,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a, 'b> PrefixedSetBatch<'a, 'b> {
    pub fn new(batch: &'b mut WriteBatch, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedSetBatch { batch, cf, prefix }
    }

    pub fn add(&mut self, member: &str) {
        self.batch.put_cf(&self.cf, member_key(&self.prefix, member), b"1");
    }

    pub fn remove(&mut self, member: &str) {
        self.batch.delete_cf(&self.cf, member_key(&self.prefix, member));
    }
}

/// Read-only view over a snapshot iterator, per spec §5's "open one
/// iterator/snapshot and reuse it for every token in the query."
pub struct PrefixedSetView<'a> {
    snapshot: &'a Snapshot<'a>,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a> PrefixedSetView<'a> {
    pub fn new(snapshot: &'a Snapshot<'a>, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedSetView { snapshot, cf, prefix }
    }

    pub fn contains(&self, member: &str) -> Result<bool> {
        Ok(self
            .snapshot
            .get_cf(&self.cf, member_key(&self.prefix, member))?
            .is_some())
    }

    pub fn items(&self) -> Result<Vec<String>> {
        let scan_prefix = format!("{}:set:", self.prefix);
        let mut out = Vec::new();
        let iter = self
            .snapshot
            .iterator_cf(&self.cf, IteratorMode::From(scan_prefix.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, _) = entry?;
            let k = String::from_utf8_lossy(&k);
            if !k.starts_with(&scan_prefix) {
                break;
            }
            out.push(k[scan_prefix.len()..].to_string());
        }
        Ok(out)
    }
}
