//! # ResourceDb: Persistent Resource Store
//!
//! Where the host layer keeps resource state between invocations, built on
//! sled's embedded key-value store.
//!
//! ## Tree Layout
//!
//! | Tree        | Key                    | Value                     |
//! |-------------|------------------------|---------------------------|
//! | `resources` | resource name (UTF-8)  | `bincode(ResourceState)`  |
//!
//! sled orders keys lexicographically, so [`ResourceDb::list`] comes back
//! sorted by name.

use sled::{Db, Tree};
use std::path::Path;

use super::state::ResourceState;
use crate::config::RESOURCES_TREE;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type DbResult<T> = Result<T, DbError>;

// ---------------------------------------------------------------------------
// ResourceDb
// ---------------------------------------------------------------------------

/// Persistent store of did:key resource state.
///
/// # Thread Safety
///
/// sled trees support lock-free concurrent reads and serialized writes, so
/// a `ResourceDb` can be shared across threads (it is cheap to clone).
#[derive(Debug, Clone)]
pub struct ResourceDb {
    db: Db,
    resources: Tree,
}

impl ResourceDb {
    /// Open or create a store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Create a store that lives in memory and vanishes on drop.
    pub fn open_temporary() -> DbResult<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> DbResult<Self> {
        let resources = db.open_tree(RESOURCES_TREE)?;
        Ok(Self { db, resources })
    }

    /// Insert or overwrite the state stored under `name`, then flush.
    pub fn put(&self, name: &str, state: &ResourceState) -> DbResult<()> {
        let bytes =
            bincode::serialize(state).map_err(|e| DbError::Serialization(e.to_string()))?;
        self.resources.insert(name.as_bytes(), bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Insert `state` only if `name` is vacant. Returns `false` (and writes
    /// nothing) when something is already stored there.
    pub fn put_if_absent(&self, name: &str, state: &ResourceState) -> DbResult<bool> {
        let bytes =
            bincode::serialize(state).map_err(|e| DbError::Serialization(e.to_string()))?;
        let swapped = self
            .resources
            .compare_and_swap(name.as_bytes(), None as Option<&[u8]>, Some(bytes))?;
        if swapped.is_err() {
            return Ok(false);
        }
        self.db.flush()?;
        Ok(true)
    }

    /// Retrieve the state stored under `name`.
    pub fn get(&self, name: &str) -> DbResult<Option<ResourceState>> {
        match self.resources.get(name.as_bytes())? {
            Some(bytes) => {
                let state: ResourceState = bincode::deserialize(&bytes)
                    .map_err(|e| DbError::Serialization(e.to_string()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Forget `name`. Returns whether anything was stored.
    pub fn remove(&self, name: &str) -> DbResult<bool> {
        let removed = self.resources.remove(name.as_bytes())?.is_some();
        if removed {
            self.db.flush()?;
        }
        Ok(removed)
    }

    /// All stored resources, sorted by name.
    pub fn list(&self) -> DbResult<Vec<(String, ResourceState)>> {
        let mut out = Vec::with_capacity(self.resources.len());
        for entry in self.resources.iter() {
            let (key, value) = entry?;
            let name = String::from_utf8(key.to_vec())
                .map_err(|e| DbError::Serialization(e.to_string()))?;
            let state: ResourceState = bincode::deserialize(&value)
                .map_err(|e| DbError::Serialization(e.to_string()))?;
            out.push((name, state));
        }
        Ok(out)
    }

    pub fn count(&self) -> usize {
        self.resources.len()
    }

    /// Block until all pending writes are durable.
    pub fn flush(&self) -> DbResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
