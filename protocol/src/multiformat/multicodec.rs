//! Multicodec framing: `varint(code) || payload`.
//!
//! For an Ed25519 public key the code is `0xed`, whose varint form is the
//! two bytes `[0xed, 0x01]`. Those two bytes are why every did:key for an
//! Ed25519 key starts with `z6Mk`.

use super::{read_varint, write_varint, EncodingError};
use crate::config::{MULTICODEC_ED25519_PUB, PUBLIC_KEY_LENGTH};

/// Bytes prefixed with a multicodec content-type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticodecTaggedBytes {
    code: u64,
    /// Full framed bytes, tag included.
    bytes: Vec<u8>,
    /// Offset of the payload within `bytes`.
    payload_offset: usize,
}

impl MulticodecTaggedBytes {
    /// Frame `payload` under `code`.
    pub fn new(code: u64, payload: &[u8]) -> Result<Self, EncodingError> {
        if payload.is_empty() {
            return Err(EncodingError::EmptyPayload);
        }
        let mut bytes = Vec::with_capacity(payload.len() + 10);
        write_varint(code, &mut bytes);
        let payload_offset = bytes.len();
        bytes.extend_from_slice(payload);
        Ok(Self {
            code,
            bytes,
            payload_offset,
        })
    }

    /// Parse framed bytes, reading the code back off the front.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let (code, payload) = read_varint(bytes)?;
        if payload.is_empty() {
            return Err(EncodingError::EmptyPayload);
        }
        Ok(Self {
            code,
            bytes: bytes.to_vec(),
            payload_offset: bytes.len() - payload.len(),
        })
    }

    /// Parse framed bytes and require a specific code.
    pub fn from_bytes_expecting(bytes: &[u8], expected: u64) -> Result<Self, EncodingError> {
        let tagged = Self::from_bytes(bytes)?;
        if tagged.code != expected {
            return Err(EncodingError::UnexpectedCodec {
                expected,
                found: tagged.code,
            });
        }
        Ok(tagged)
    }

    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.payload_offset..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for MulticodecTaggedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Tag a raw Ed25519 public key as `ed25519-pub`.
pub fn tag_public_key(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> MulticodecTaggedBytes {
    let mut bytes = Vec::with_capacity(PUBLIC_KEY_LENGTH + 2);
    write_varint(MULTICODEC_ED25519_PUB, &mut bytes);
    let payload_offset = bytes.len();
    bytes.extend_from_slice(public_key);
    MulticodecTaggedBytes {
        code: MULTICODEC_ED25519_PUB,
        bytes,
        payload_offset,
    }
}
