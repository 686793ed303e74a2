//! # Resource State
//!
//! What the host layer remembers about one did:key resource. The three
//! string attributes are exactly what a mint returns; they never change
//! after creation. A new identifier means a new state record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::identity::MintedDidKey;

/// Arbitrary caller-supplied values. Changing any entry forces a re-mint.
/// The minting core never looks inside.
pub type Keepers = BTreeMap<String, String>;

/// Persisted attributes of a did:key resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Opaque handle (base64url of 8 random bytes, or an imported value).
    pub id: String,
    /// `did:key:...`. `None` for imported resources.
    pub public_did: Option<String>,
    /// Multibase seed record. `None` for imported resources.
    pub secret_seed_multibase: Option<String>,
    /// Keepers in force when this state was created.
    pub keepers: Keepers,
    /// When the resource entered the store.
    pub created_at: DateTime<Utc>,
}

impl ResourceState {
    /// State for a freshly minted identifier.
    pub fn minted(minted: &MintedDidKey, keepers: Keepers) -> Self {
        Self {
            id: minted.id.clone(),
            public_did: Some(minted.did.to_string()),
            secret_seed_multibase: Some(minted.secret_seed.expose().to_owned()),
            keepers,
            created_at: Utc::now(),
        }
    }

    /// State for an identifier adopted from outside, taken as-is.
    pub fn imported(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            public_did: None,
            secret_seed_multibase: None,
            keepers: Keepers::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_imported(&self) -> bool {
        self.public_did.is_none()
    }

    /// A copy safe to print: the seed record is replaced by a marker.
    pub fn redacted(&self) -> Self {
        Self {
            secret_seed_multibase: self
                .secret_seed_multibase
                .as_ref()
                .map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}
