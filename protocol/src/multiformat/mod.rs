//! # Multiformats
//!
//! The self-describing byte and text framings a did:key is built from:
//!
//! ```text
//! public key  ──multicodec──▶ [0xed 0x01 | 32-byte key] ──multibase──▶ "z6Mk..."
//! seed        ──multihash───▶ [0x00 0x20 | 32-byte seed] ──multibase──▶ "z1A..."
//! ```
//!
//! - **multicodec** prefixes bytes with a varint content-type code.
//! - **multihash** prefixes bytes with a varint hash code and a varint
//!   length. We only ever use the `identity` code: the seed is framed, never
//!   hashed, so it can be recovered byte-for-byte.
//! - **multibase** turns bytes into text, led by one character naming the
//!   base. We only speak `z` (base58, Bitcoin alphabet).
//!
//! All three are hand-rolled on top of `bs58` and `unsigned-varint`. Each
//! codec is tiny, and we want the exact byte layout in front of us.

pub mod multibase;
pub mod multicodec;
pub mod multihash;

use thiserror::Error;

pub use multibase::{decode_multibase, encode_multibase, MultibaseString};
pub use multicodec::{tag_public_key, MulticodecTaggedBytes};
pub use multihash::{tag_seed_as_multihash, MultihashTaggedBytes};

/// Encoding and decoding failures.
///
/// On the encode side these are contract violations by the caller (empty
/// or oversized payloads). On the decode side they describe malformed
/// input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("payload must not be empty")]
    EmptyPayload,

    #[error("payload of {len} bytes exceeds the 255-byte multihash limit")]
    PayloadTooLarge { len: usize },

    #[error("unsupported multibase prefix '{0}', expected 'z' (base58btc)")]
    UnsupportedBase(char),

    #[error("invalid base58 data: {0}")]
    InvalidBase58(String),

    #[error("unexpected code 0x{found:x}, expected 0x{expected:x}")]
    UnexpectedCodec { expected: u64, found: u64 },

    #[error("declared length {declared} does not match payload length {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("malformed varint: {0}")]
    Varint(String),
}

/// Read one unsigned varint off the front of `bytes`.
pub(crate) fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8]), EncodingError> {
    unsigned_varint::decode::u64(bytes).map_err(|e| EncodingError::Varint(e.to_string()))
}

/// Append `value` to `out` as an unsigned varint.
pub(crate) fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut buf = unsigned_varint::encode::u64_buffer();
    out.extend_from_slice(unsigned_varint::encode::u64(value, &mut buf));
}
