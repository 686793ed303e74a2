// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # didkey: did:key Minting Library
//!
//! Mints `did:key` identifiers for fresh Ed25519 keys, and hands back the
//! matching secret seed in a form that can rebuild the key later.
//!
//! ```text
//! mint_did_key()
//!   ├─ id                    "q8Rj0Yb3mXo"          (opaque tracking handle)
//!   ├─ did                   "did:key:z6Mk..."      (public)
//!   └─ secret_seed_multibase "z1A..."               (private)
//! ```
//!
//! ## Architecture
//!
//! - **crypto**: Entropy sources and Ed25519 key generation.
//! - **multiformat**: multicodec, multihash and multibase framing.
//! - **identity**: DID assembly, seed records, and the mint pipeline.
//! - **storage**: sled-backed store for resource state.
//! - **resource**: create / read / delete / import / apply lifecycle.
//! - **config**: Registry codes, lengths, and other constants.
//!
//! `crypto`, `multiformat` and `identity` form the stateless core; `storage`
//! and `resource` are the host layer built on top and are never called
//! from the core.
//!
//! ## Not included
//!
//! Key rotation, revocation, signature verification, and DID resolution.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod multiformat;
pub mod resource;
pub mod storage;

pub use identity::{mint_did_key, mint_did_key_with, DidKey, MintError, MintedDidKey, SecretSeed};
