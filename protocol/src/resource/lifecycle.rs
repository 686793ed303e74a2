//! Resource lifecycle operations over a [`ResourceDb`].

use parking_lot::Mutex;
use thiserror::Error;

use crate::crypto::entropy::{EntropySource, OsEntropy};
use crate::identity::mint::{mint_did_key_with, MintError};
use crate::storage::db::{DbError, ResourceDb};
use crate::storage::state::{Keepers, ResourceState};

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource '{0}' already exists")]
    AlreadyExists(String),

    #[error("import ID must not be empty")]
    EmptyImportId,

    #[error("mint failed: {0}")]
    Mint(#[from] MintError),

    #[error("state store error: {0}")]
    Db(#[from] DbError),
}

/// Where a named resource stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStatus {
    Absent,
    Present(ResourceState),
}

/// What [`DidKeyResource::apply`] will do for a given set of keepers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Nothing stored yet; mint.
    Create,
    /// Keepers changed; forget the old identifier and mint a new one.
    Replace,
    /// Stored state already matches.
    NoChange,
}

/// Drives the lifecycle of did:key resources stored in a [`ResourceDb`].
///
/// Generic over the entropy source so tests can mint deterministically.
/// The source sits behind a mutex, so one `DidKeyResource` can be shared
/// across threads.
pub struct DidKeyResource<E = OsEntropy> {
    db: ResourceDb,
    entropy: Mutex<E>,
}

impl DidKeyResource<OsEntropy> {
    pub fn new(db: ResourceDb) -> Self {
        Self::with_entropy(db, OsEntropy::os())
    }
}

impl<E: EntropySource> DidKeyResource<E> {
    pub fn with_entropy(db: ResourceDb, entropy: E) -> Self {
        Self {
            db,
            entropy: Mutex::new(entropy),
        }
    }

    pub fn db(&self) -> &ResourceDb {
        &self.db
    }

    fn mint_state(&self, keepers: Keepers) -> Result<ResourceState, ResourceError> {
        let minted = mint_did_key_with(&mut *self.entropy.lock())?;
        Ok(ResourceState::minted(&minted, keepers))
    }

    /// Mint a new identifier and store it under `name`.
    pub fn create(&self, name: &str, keepers: Keepers) -> Result<ResourceState, ResourceError> {
        if self.db.get(name)?.is_some() {
            return Err(ResourceError::AlreadyExists(name.to_string()));
        }
        let state = self.mint_state(keepers)?;
        if !self.db.put_if_absent(name, &state)? {
            return Err(ResourceError::AlreadyExists(name.to_string()));
        }
        tracing::info!(
            resource = name,
            id = %state.id,
            did = state.public_did.as_deref().unwrap_or_default(),
            "resource created"
        );
        Ok(state)
    }

    /// Return the stored state unchanged.
    pub fn read(&self, name: &str) -> Result<Option<ResourceState>, ResourceError> {
        Ok(self.db.get(name)?)
    }

    pub fn status(&self, name: &str) -> Result<ResourceStatus, ResourceError> {
        Ok(match self.db.get(name)? {
            Some(state) => ResourceStatus::Present(state),
            None => ResourceStatus::Absent,
        })
    }

    /// Forget `name` locally. Returns whether it was present.
    pub fn delete(&self, name: &str) -> Result<bool, ResourceError> {
        let removed = self.db.remove(name)?;
        tracing::info!(resource = name, removed, "resource deleted");
        Ok(removed)
    }

    /// Adopt an externally known ID as-is. No key material is derived and
    /// the value is not checked against any encoding.
    pub fn import(&self, name: &str, id: &str) -> Result<ResourceState, ResourceError> {
        if id.is_empty() {
            return Err(ResourceError::EmptyImportId);
        }
        let state = ResourceState::imported(id);
        if !self.db.put_if_absent(name, &state)? {
            return Err(ResourceError::AlreadyExists(name.to_string()));
        }
        tracing::info!(resource = name, id, "resource imported");
        Ok(state)
    }

    /// Decide what [`apply`](Self::apply) would do.
    pub fn plan(&self, name: &str, keepers: &Keepers) -> Result<Plan, ResourceError> {
        Ok(match self.db.get(name)? {
            None => Plan::Create,
            Some(state) if &state.keepers != keepers => Plan::Replace,
            Some(_) => Plan::NoChange,
        })
    }

    /// Converge `name` to `keepers`: create if absent, re-mint if the
    /// keepers changed, otherwise leave it alone.
    pub fn apply(
        &self,
        name: &str,
        keepers: Keepers,
    ) -> Result<(Plan, ResourceState), ResourceError> {
        let plan = self.plan(name, &keepers)?;
        let state = match plan {
            Plan::Create => self.create(name, keepers)?,
            Plan::Replace => {
                let state = self.mint_state(keepers)?;
                self.db.put(name, &state)?;
                tracing::info!(
                    resource = name,
                    id = %state.id,
                    did = state.public_did.as_deref().unwrap_or_default(),
                    "keepers changed, resource replaced"
                );
                state
            }
            Plan::NoChange => match self.db.get(name)? {
                Some(state) => state,
                None => self.create(name, keepers)?,
            },
        };
        Ok((plan, state))
    }
}
