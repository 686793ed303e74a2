//! # Protocol Constants
//!
//! Every magic number in the did:key pipeline lives here. The byte-level
//! values are fixed by the multiformats registries; changing any of them
//! produces identifiers no downstream verifier can parse.

// ---------------------------------------------------------------------------
// DID
// ---------------------------------------------------------------------------

/// Scheme and method prefix of every identifier we emit.
pub const DID_KEY_PREFIX: &str = "did:key:";

/// DID scheme name.
pub const DID_SCHEME: &str = "did";

/// DID method name.
pub const DID_METHOD: &str = "key";

// ---------------------------------------------------------------------------
// Multiformats
// ---------------------------------------------------------------------------

/// Multicodec code for `ed25519-pub`. Varint-encoded on the wire as
/// `[0xed, 0x01]`.
pub const MULTICODEC_ED25519_PUB: u64 = 0xed;

/// Multihash function code for `identity` (payload is not hashed).
pub const MULTIHASH_IDENTITY: u64 = 0x00;

/// Largest payload the multihash envelope accepts.
pub const MULTIHASH_MAX_PAYLOAD: usize = 255;

/// Multibase prefix character for base58btc.
pub const MULTIBASE_BASE58BTC: char = 'z';

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// Ed25519 seed length in bytes.
pub const SEED_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Expanded private key length: seed followed by the public key.
pub const PRIVATE_KEY_LENGTH: usize = SEED_LENGTH + PUBLIC_KEY_LENGTH;

/// Byte length of the opaque tracking ID drawn for every mint.
pub const OPAQUE_ID_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Name of the sled tree holding resource state.
pub const RESOURCES_TREE: &str = "resources";
