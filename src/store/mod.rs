pub mod keys;

use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::core::config::{EngineConfig, OpenMode};
use crate::core::error::{Error, ErrorKind, Result};

/// Column family backing index registration; never deleted.
pub const ROOT_CF: &str = "default";

pub type Db = DBWithThreadMode<MultiThreaded>;

/// Owns the RocksDB handle and lazily creates column families per index,
/// per inverted index, and per trie.
pub struct Store {
    db: Arc<Db>,
    path: PathBuf,
}

impl Store {
    pub fn open(config: &EngineConfig) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_row_cache(&rocksdb::Cache::new_lru_cache(config.cache_size));

        let existing = Db::list_cf(&opts, &config.storage_path)
            .unwrap_or_else(|_| vec![ROOT_CF.to_string()]);
        let descriptors: Vec<ColumnFamilyDescriptor> = existing
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = match config.mode {
            OpenMode::ReadWrite => {
                Db::open_cf_descriptors(&opts, &config.storage_path, descriptors)?
            }
            OpenMode::ReadOnly => {
                Db::open_cf_descriptors_read_only(&opts, &config.storage_path, descriptors, false)?
            }
        };

        debug!(path = %config.storage_path.display(), mode = ?config.mode, "opened store");
        Ok(Store {
            db: Arc::new(db),
            path: config.storage_path.clone(),
        })
    }

    pub fn raw(&self) -> &Db {
        &self.db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the column family handle, creating it if this is its first use.
    pub fn cf<'a>(&'a self, name: &str) -> Result<Arc<BoundColumnFamily<'a>>> {
        if let Some(cf) = self.db.cf_handle(name) {
            return Ok(cf);
        }
        self.db.create_cf(name, &Options::default())?;
        self.db.cf_handle(name).ok_or_else(|| {
            Error::new(
                ErrorKind::Internal,
                format!("column family '{name}' missing immediately after create"),
            )
        })
    }

    pub fn close(self) {
        debug!(path = %self.path.display(), "closed store");
    }

    pub fn destroy(path: &Path) -> Result<()> {
        let opts = Options::default();
        Db::destroy(&opts, path)?;
        debug!(path = %path.display(), "destroyed store");
        Ok(())
    }
}
