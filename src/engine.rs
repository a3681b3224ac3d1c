//! Engine facade (spec §4.8): `open`, `index(name)` (create-or-open),
//! `list_indexes`, `close`, `destroy`. `create_index` eagerly creates both
//! the forward and inverted column families for a name, grounded on
//! `konlsearch/search.py::create_index`.

use rocksdb::{Direction, IteratorMode};
use std::path::Path;
use tracing::debug;

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::forward::Index;
use crate::lock::StripedLock;
use crate::store::{Store, ROOT_CF};

const INDEX_REGISTRATION_PREFIX: &str = "index:";

pub struct Engine {
    store: Store,
    locks: StripedLock,
}

impl Engine {
    pub fn open(config: EngineConfig) -> Result<Self> {
        let store = Store::open(&config)?;
        let locks = StripedLock::new(config.stripe_count);
        debug!(stripes = config.stripe_count, "opened engine");
        Ok(Engine { store, locks })
    }

    fn register(&self, name: &str) -> Result<()> {
        let root = self.store.cf(ROOT_CF)?;
        let key = format!("{INDEX_REGISTRATION_PREFIX}{name}");
        if self.store.raw().get_cf(&root, &key)?.is_none() {
            self.store.raw().put_cf(&root, &key, b"1")?;
        }
        Ok(())
    }

    /// Registers `name` if new and returns a handle to it (create-or-open).
    pub fn index(&self, name: &str) -> Result<Index<'_>> {
        self.register(name)?;
        Ok(Index::open(&self.store, &self.locks, name))
    }

    /// Eagerly materializes the forward and inverted column families for
    /// `name` instead of waiting for first use.
    pub fn create_index(&self, name: &str) -> Result<Index<'_>> {
        self.register(name)?;
        self.store.cf(name)?;
        self.store.cf(&format!("{name}_inverted_index"))?;
        Ok(Index::open(&self.store, &self.locks, name))
    }

    pub fn list_indexes(&self) -> Result<Vec<String>> {
        let root = self.store.cf(ROOT_CF)?;
        let mut out = Vec::new();
        let iter = self
            .store
            .raw()
            .iterator_cf(&root, IteratorMode::From(INDEX_REGISTRATION_PREFIX.as_bytes(), Direction::Forward));
        for entry in iter {
            let (k, _) = entry?;
            let k = String::from_utf8_lossy(&k);
            let Some(name) = k.strip_prefix(INDEX_REGISTRATION_PREFIX) else { break };
            out.push(name.to_string());
        }
        Ok(out)
    }

    pub fn close(self) {
        self.store.close();
    }

    /// Requires the caller to have dropped every `Engine` over this path
    /// first — multi-process writers are out of scope (spec §1 Non-goal).
    pub fn destroy(path: &Path) -> Result<()> {
        Store::destroy(path)
    }
}
