//! Top-N counter primitive (spec §4.1 / §3): a `key -> count` map plus a
//! sorted set keyed by flipped count, so ascending key iteration yields
//! descending-by-count order. `compact()` evicts the tail while the map
//! exceeds `max_size` (grounded on `konlsearch/counter.py`).

use rocksdb::{BoundColumnFamily, Direction, IteratorMode};
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::keys::{decode_flipped_count, encode_flipped_count};
use crate::store::Db;

fn dict_key(prefix: &str, key: &str) -> String {
    format!("{prefix}:counter:dict:{key}")
}

fn set_key(prefix: &str, key: &str, count: u32) -> String {
    format!("{prefix}:counter:set:{}:{key}", encode_flipped_count(count))
}

fn set_scan_prefix(prefix: &str) -> String {
    format!("{prefix}:counter:set:")
}

pub struct PrefixedCounter<'a> {
    db: &'a Db,
    cf: Arc<BoundColumnFamily<'a>>,
    prefix: String,
    max_size: Option<usize>,
}

impl<'a> PrefixedCounter<'a> {
    pub fn new(db: &'a Db, cf: Arc<BoundColumnFamily<'a>>, prefix: String, max_size: Option<usize>) -> Self {
        PrefixedCounter { db, cf, prefix, max_size }
    }

    pub fn get(&self, key: &str) -> Result<u32> {
        match self.db.get_cf(&self.cf, dict_key(&self.prefix, key))? {
            Some(v) => Ok(String::from_utf8_lossy(&v).parse().unwrap_or(0)),
            None => Ok(0),
        }
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.items()?.len())
    }

    pub fn increase(&self, key: &str, delta: u32) -> Result<u32> {
        let old = self.get(key)?;
        let new = old.saturating_add(delta);
        if old > 0 {
            self.db.delete_cf(&self.cf, set_key(&self.prefix, key, old))?;
        }
        self.db.put_cf(&self.cf, dict_key(&self.prefix, key), new.to_string())?;
        self.db.put_cf(&self.cf, set_key(&self.prefix, key, new), b"1")?;
        self.compact()?;
        Ok(new)
    }

    pub fn decrease(&self, key: &str, delta: u32) -> Result<u32> {
        let old = self.get(key)?;
        let new = old.saturating_sub(delta);
        self.db.delete_cf(&self.cf, set_key(&self.prefix, key, old))?;
        if new == 0 {
            self.db.delete_cf(&self.cf, dict_key(&self.prefix, key))?;
        } else {
            self.db.put_cf(&self.cf, dict_key(&self.prefix, key), new.to_string())?;
            self.db.put_cf(&self.cf, set_key(&self.prefix, key, new), b"1")?;
        }
        Ok(new)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let old = self.get(key)?;
        self.db.delete_cf(&self.cf, dict_key(&self.prefix, key))?;
        self.db.delete_cf(&self.cf, set_key(&self.prefix, key, old))?;
        Ok(())
    }

    /// Descending by count: the sorted set's ascending key order is the flipped order.
    pub fn items(&self) -> Result<Vec<(String, u32)>> {
        let scan_prefix = set_scan_prefix(&self.prefix);
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
            let rest = &k[scan_prefix.len()..];
            if let Some((flipped_hex, member)) = rest.split_once(':') {
                if let Some(count) = decode_flipped_count(flipped_hex) {
                    out.push((member.to_string(), count));
                }
            }
        }
        Ok(out)
    }

    pub fn compact(&self) -> Result<()> {
        let Some(max_size) = self.max_size else { return Ok(()) };
        loop {
            let items = self.items()?;
            if items.len() <= max_size {
                break;
            }
            // Smallest count sorts last under the flipped ordering.
            if let Some((key, _)) = items.last() {
                self.delete(key)?;
            } else {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::store::Store;

    fn open_test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            storage_path: dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        let store = Store::open(&config).unwrap();
        (dir, store)
    }

    #[test]
    fn top_n_eviction_keeps_highest_counts() {
        let (_dir, store) = open_test_store();
        let cf = store.cf("counter_test").unwrap();
        let counter = PrefixedCounter::new(store.raw(), cf, "suggest".to_string(), Some(5));

        for (key, count) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5), ("f", 6)] {
            counter.increase(key, count).unwrap();
        }

        let items = counter.items().unwrap();
        let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["f", "e", "d", "c", "b"]);
        assert!(!keys.contains(&"a"));
    }
}
