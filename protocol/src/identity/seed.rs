//! # Secret Seed Records
//!
//! The private half of a minted did:key, exported as
//! `multibase(base58btc, multihash(identity, seed))`. Holding this string is
//! enough to rebuild the keypair, so it is kept out of the DID itself and
//! out of every `Debug`/`Display` rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::keys::{DidKeypair, KeyError};
use crate::multiformat::{
    decode_multibase, encode_multibase, tag_seed_as_multihash, EncodingError, MultibaseString,
    MultihashTaggedBytes,
};

/// Errors that can occur while recovering a keypair from a seed record.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed seed record: {0}")]
    Encoding(#[from] EncodingError),

    #[error("seed record does not hold a usable seed: {0}")]
    Key(#[from] KeyError),
}

/// Multibase-encoded identity multihash of an Ed25519 seed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretSeed {
    encoded: MultibaseString,
}

impl SecretSeed {
    /// Encode a raw seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, EncodingError> {
        let tagged = tag_seed_as_multihash(seed)?;
        Ok(Self {
            encoded: encode_multibase(&tagged)?,
        })
    }

    /// Accept an existing seed record, checking that it decodes to an
    /// identity multihash.
    pub fn parse(s: &str) -> Result<Self, SeedError> {
        let encoded = MultibaseString::parse(s)?;
        let bytes = Zeroizing::new(decode_multibase(s)?);
        MultihashTaggedBytes::from_identity_bytes(&bytes)?;
        Ok(Self { encoded })
    }

    /// The raw seed bytes.
    pub fn seed_bytes(&self) -> Result<Zeroizing<Vec<u8>>, SeedError> {
        let bytes = Zeroizing::new(self.encoded.decode()?);
        let tagged = MultihashTaggedBytes::from_identity_bytes(&bytes)?;
        Ok(Zeroizing::new(tagged.digest().to_vec()))
    }

    /// Rebuild the keypair this seed was drawn for.
    pub fn recover_keypair(&self) -> Result<DidKeypair, SeedError> {
        let seed = self.seed_bytes()?;
        Ok(DidKeypair::try_from_seed_slice(&seed)?)
    }

    /// The encoded record itself. Callers deciding to persist or print it
    /// have to ask for it by name.
    pub fn expose(&self) -> &str {
        self.encoded.as_str()
    }
}

impl TryFrom<String> for SecretSeed {
    type Error = SeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let s = Zeroizing::new(s);
        Self::parse(&s)
    }
}

impl From<SecretSeed> for String {
    fn from(seed: SecretSeed) -> Self {
        seed.encoded.into_string()
    }
}

impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretSeed(<redacted>)")
    }
}

impl fmt::Display for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
