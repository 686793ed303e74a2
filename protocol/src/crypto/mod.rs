//! # Key Material
//!
//! Randomness and Ed25519 key generation. Everything that consumes entropy
//! lives here and goes through [`EntropySource`], so the rest of the crate
//! never touches the OS RNG directly.
//!
//! We don't roll our own crypto: key derivation is `ed25519-dalek`, and the
//! production randomness is `OsRng`.

pub mod entropy;
pub mod keys;

pub use entropy::{
    fill_exact, generate_random_id, EntropyError, EntropySource, OsEntropy, RngEntropy,
};
pub use keys::{DidKeypair, DidPublicKey, KeyError};
