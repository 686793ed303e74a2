//! # Key Management
//!
//! Ed25519 keypair generation for did:key identifiers.
//!
//! A keypair is minted from exactly 32 bytes drawn from an
//! [`EntropySource`]. Those 32 bytes are the *seed*: the Ed25519 secret key
//! is derived from them deterministically, so keeping the seed is enough to
//! rebuild the whole keypair later.
//!
//! ## Layout
//!
//! ```text
//! public key  : 32 bytes
//! private key : seed (32 bytes) || public key (32 bytes)
//! ```
//!
//! ## Security considerations
//!
//! - The signing key is zeroized on drop (ed25519-dalek's `zeroize` feature).
//! - Every secret byte array we hand out is wrapped in [`Zeroizing`].
//! - We never fall back to a default or zeroed key. If the entropy source
//!   fails or comes up short, generation fails.
//! - Key bytes are never logged.

use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use super::entropy::{fill_exact, EntropyError, EntropySource, OsEntropy};
use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SEED_LENGTH};

/// Errors that can occur when rebuilding keys from bytes.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid seed: expected 32 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 keypair backing a did:key identifier.
///
/// Intentionally not `Serialize`: exporting secret material should be an
/// explicit call to [`seed`](Self::seed) or
/// [`private_key_bytes`](Self::private_key_bytes).
pub struct DidKeypair {
    signing_key: SigningKey,
}

/// The public half of a keypair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DidPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl DidKeypair {
    /// Generate a fresh keypair from the OS CSPRNG.
    pub fn generate() -> Result<Self, EntropyError> {
        Self::generate_with(&mut OsEntropy::os())
    }

    /// Generate a fresh keypair from `source`.
    ///
    /// Draws exactly [`SEED_LENGTH`] bytes. A short read or a source error
    /// aborts generation.
    pub fn generate_with<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        fill_exact(source, &mut seed[..])?;
        Ok(Self::from_seed(&seed))
    }

    /// Rebuild a keypair from its 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Rebuild a keypair from a seed slice of unchecked length.
    pub fn try_from_seed_slice(seed: &[u8]) -> Result<Self, KeyError> {
        let seed: &[u8; SEED_LENGTH] = seed
            .try_into()
            .map_err(|_| KeyError::InvalidSeedLength(seed.len()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn public_key(&self) -> DidPublicKey {
        DidPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The 32-byte seed, i.e. the first half of the private key.
    pub fn seed(&self) -> Zeroizing<[u8; SEED_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// The 64-byte private key: seed followed by public key.
    pub fn private_key_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl fmt::Debug for DidKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "DidKeypair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for DidKeypair {
    /// Compares public keys only, to keep secret bytes out of
    /// non-constant-time comparisons.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for DidKeypair {}

// ---------------------------------------------------------------------------
// DidPublicKey
// ---------------------------------------------------------------------------

impl DidPublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a public key from a slice, checking the length and that the
    /// bytes decode to a valid Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for DidPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for DidPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DidPublicKey({})", &self.to_hex()[..16])
    }
}
