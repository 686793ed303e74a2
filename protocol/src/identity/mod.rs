//! # Identity Module
//!
//! Turns key material into the two strings a did:key holder keeps:
//!
//! 1. **DID**: `did:key:` + multibase(multicodec(ed25519-pub, public key)).
//!    Public; share it freely.
//! 2. **Secret seed**: multibase(multihash(identity, seed)). Private; it is
//!    the only thing needed to rebuild the keypair.
//!
//! [`mint_did_key`] produces both plus an opaque tracking ID. It holds no
//! state between calls and can be called from any number of threads at once.

pub mod did;
pub mod mint;
pub mod seed;

pub use did::{assemble, DidError, DidKey};
pub use mint::{mint_did_key, mint_did_key_with, MintError, MintedDidKey};
pub use seed::{SecretSeed, SeedError};
