//! Append-only search log (spec §4.7), grounded directly on
//! `konlsearch/log.py`: `access:<seq_id-hex10>:<token>` → result size.
//! Observational only — search correctness never depends on it.

use rocksdb::{BoundColumnFamily, Direction, IteratorMode};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::error::Result;
use crate::store::keys::{decode_id, encode_id};
use crate::store::Store;

const LAST_LOG_ID_KEY: &str = "last_log_id";
const LOG_PREFIX: &str = "access:";

pub struct SearchLog<'a> {
    store: &'a Store,
    cf_name: String,
    next_id: AtomicU64,
}

impl<'a> SearchLog<'a> {
    pub fn new(store: &'a Store, index_name: &str) -> Result<Self> {
        let cf_name = format!("{index_name}_log");
        let cf = store.cf(&cf_name)?;
        let last = match store.raw().get_cf(&cf, LAST_LOG_ID_KEY)? {
            Some(v) => std::str::from_utf8(&v)?.parse().unwrap_or(0),
            None => 0,
        };
        Ok(SearchLog { store, cf_name, next_id: AtomicU64::new(last + 1) })
    }

    fn cf(&self) -> Result<Arc<BoundColumnFamily<'a>>> {
        self.store.cf(&self.cf_name)
    }

    fn entry_key(seq_id: u64, token: &str) -> String {
        format!("{LOG_PREFIX}{}:{token}", encode_id(seq_id))
    }

    pub fn append(&self, token: &str, result_size: usize) -> Result<u64> {
        let cf = self.cf()?;
        let seq_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.store.raw().put_cf(&cf, Self::entry_key(seq_id, token), result_size.to_string())?;
        self.store.raw().put_cf(&cf, LAST_LOG_ID_KEY, seq_id.to_string())?;
        Ok(seq_id)
    }

    pub fn append_multi(&self, entries: &[(String, usize)]) -> Result<Vec<u64>> {
        let mut ids = Vec::with_capacity(entries.len());
        for (token, size) in entries {
            ids.push(self.append(token, *size)?);
        }
        Ok(ids)
    }

    pub fn get_range_seq_id(&self, start: u64, end: u64) -> Result<Vec<(u64, String, usize)>> {
        let cf = self.cf()?;
        let start_key = format!("{LOG_PREFIX}{}", encode_id(start));
        let mut out = Vec::new();

        let iter = self.store.raw().iterator_cf(&cf, IteratorMode::From(start_key.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, v) = entry?;
            let k = String::from_utf8_lossy(&k);
            let Some(rest) = k.strip_prefix(LOG_PREFIX) else { break };
            let Some((seq_hex, token)) = rest.split_once(':') else { continue };
            let Some(seq_id) = decode_id(seq_hex) else { continue };
            if seq_id >= end {
                break;
            }
            let size: usize = std::str::from_utf8(&v)?.parse().unwrap_or(0);
            out.push((seq_id, token.to_string(), size));
        }
        Ok(out)
    }
}
