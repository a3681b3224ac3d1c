//! Prefixed map primitive (spec §4.1): `get/set/delete/contains/items/update`
//! over `<prefix>:dict:<key>`.

use rocksdb::{BoundColumnFamily, Direction, IteratorMode, Snapshot, WriteBatch};
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::Db;

fn entry_key(prefix: &str, key: &str) -> String {
    format!("{prefix}:dict:{key}")
}

pub struct PrefixedMapWriter<'a> {
    db: &'a Db,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a> PrefixedMapWriter<'a> {
    pub fn new(db: &'a Db, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedMapWriter { db, cf, prefix }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get_cf(&self.cf, entry_key(&self.prefix, key))? {
            Some(v) => Ok(Some(String::from_utf8_lossy(&v).to_string())),
            None => Ok(None),
        }
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.put_cf(&self.cf, entry_key(&self.prefix, key), value)?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.db.delete_cf(&self.cf, entry_key(&self.prefix, key))?;
        Ok(())
    }

    pub fn items(&self) -> Result<Vec<(String, String)>> {
        let scan_prefix = format!("{}:dict:", self.prefix);
        let mut out = Vec::new();
        let iter = self
            .db
            .iterator_cf(&self.cf, IteratorMode::From(scan_prefix.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, v) = entry?;
            let k = String::from_utf8_lossy(&k);
            if !k.starts_with(&scan_prefix) {
                break;
            }
            out.push((k[scan_prefix.len()..].to_string(), String::from_utf8_lossy(&v).to_string()));
        }
        Ok(out)
    }

    pub fn update(&self, entries: &[(String, String)]) -> Result<()> {
        for (k, v) in entries {
            self.set(k, v)?;
        }
        Ok(())
    }
}

pub struct PrefixedMapBatch<'a, 'b> {
    batch: &'b mut WriteBatch,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a, 'b> PrefixedMapBatch<'a, 'b> {
    pub fn new(batch: &'b mut WriteBatch, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedMapBatch { batch, cf, prefix }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.batch.put_cf(&self.cf, entry_key(&self.prefix, key), value);
    }

    pub fn delete(&mut self, key: &str) {
        self.batch.delete_cf(&self.cf, entry_key(&self.prefix, key));
    }
}

pub struct PrefixedMapView<'a> {
    snapshot: &'a Snapshot<'a>,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
}

impl<'a> PrefixedMapView<'a> {
    pub fn new(snapshot: &'a Snapshot<'a>, cf: Arc<BoundColumnFamily<'a>>, prefix: String) -> Self {
        PrefixedMapView { snapshot, cf, prefix }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.snapshot.get_cf(&self.cf, entry_key(&self.prefix, key))? {
            Some(v) => Ok(Some(String::from_utf8_lossy(&v).to_string())),
            None => Ok(None),
        }
    }
}
