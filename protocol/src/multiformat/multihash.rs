//! Multihash framing: `varint(hash code) || varint(length) || digest`.
//!
//! Only the `identity` function (code `0x00`) is produced here. The seed is
//! copied through untouched, so the envelope is self-description only and
//! carries no integrity property. Downstream consumers rely on reading the
//! literal seed back out, so this must stay identity.

use super::{read_varint, write_varint, EncodingError};
use crate::config::{MULTIHASH_IDENTITY, MULTIHASH_MAX_PAYLOAD};

/// Bytes wrapped in a multihash envelope.
#[derive(Clone, PartialEq, Eq)]
pub struct MultihashTaggedBytes {
    code: u64,
    bytes: Vec<u8>,
    payload_offset: usize,
}

impl MultihashTaggedBytes {
    /// Parse an envelope. The declared length must match the remaining
    /// bytes exactly.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let (code, rest) = read_varint(bytes)?;
        let (declared, payload) = read_varint(rest)?;
        let declared = declared as usize;
        if declared != payload.len() {
            return Err(EncodingError::LengthMismatch {
                declared,
                actual: payload.len(),
            });
        }
        if payload.is_empty() {
            return Err(EncodingError::EmptyPayload);
        }
        Ok(Self {
            code,
            bytes: bytes.to_vec(),
            payload_offset: bytes.len() - payload.len(),
        })
    }

    /// Parse an envelope and require the identity function.
    pub fn from_identity_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let tagged = Self::from_bytes(bytes)?;
        if tagged.code != MULTIHASH_IDENTITY {
            return Err(EncodingError::UnexpectedCodec {
                expected: MULTIHASH_IDENTITY,
                found: tagged.code,
            });
        }
        Ok(tagged)
    }

    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn digest(&self) -> &[u8] {
        &self.bytes[self.payload_offset..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for MultihashTaggedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for MultihashTaggedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The digest of an identity multihash is the seed itself.
        write!(
            f,
            "MultihashTaggedBytes(code=0x{:x}, len={})",
            self.code,
            self.digest().len()
        )
    }
}

impl Drop for MultihashTaggedBytes {
    fn drop(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.bytes);
    }
}

/// Wrap `seed` in an identity multihash.
///
/// Fails on an empty payload or one longer than 255 bytes. Never truncates.
pub fn tag_seed_as_multihash(seed: &[u8]) -> Result<MultihashTaggedBytes, EncodingError> {
    if seed.is_empty() {
        return Err(EncodingError::EmptyPayload);
    }
    if seed.len() > MULTIHASH_MAX_PAYLOAD {
        return Err(EncodingError::PayloadTooLarge { len: seed.len() });
    }
    let mut bytes = Vec::with_capacity(seed.len() + 3);
    write_varint(MULTIHASH_IDENTITY, &mut bytes);
    write_varint(seed.len() as u64, &mut bytes);
    let payload_offset = bytes.len();
    bytes.extend_from_slice(seed);
    Ok(MultihashTaggedBytes {
        code: MULTIHASH_IDENTITY,
        bytes,
        payload_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_envelope_layout() {
        let tagged = tag_seed_as_multihash(&[0x07; 32]).unwrap();
        assert_eq!(&tagged.as_bytes()[..2], &[0x00, 0x20]);
        assert_eq!(tagged.digest(), &[0x07; 32]);
        assert_eq!(tagged.as_bytes().len(), 34);
    }

    #[test]
    fn empty_seed_rejected() {
        assert_eq!(
            tag_seed_as_multihash(&[]).unwrap_err(),
            EncodingError::EmptyPayload
        );
    }

    #[test]
    fn oversized_seed_rejected_not_truncated() {
        assert_eq!(
            tag_seed_as_multihash(&[1u8; 256]).unwrap_err(),
            EncodingError::PayloadTooLarge { len: 256 }
        );
        assert_eq!(
            tag_seed_as_multihash(&[1u8; 1000]).unwrap_err(),
            EncodingError::PayloadTooLarge { len: 1000 }
        );
    }

    #[test]
    fn boundary_lengths_accepted() {
        assert_eq!(tag_seed_as_multihash(&[9u8; 1]).unwrap().digest().len(), 1);
        let max = tag_seed_as_multihash(&[9u8; 255]).unwrap();
        assert_eq!(max.digest().len(), 255);
        // 255 needs a two-byte varint length.
        assert_eq!(&max.as_bytes()[..3], &[0x00, 0xff, 0x01]);
    }

    #[test]
    fn parse_roundtrip() {
        let tagged = tag_seed_as_multihash(&[0x33; 32]).unwrap();
        let parsed = MultihashTaggedBytes::from_identity_bytes(tagged.as_bytes()).unwrap();
        assert_eq!(parsed.digest(), &[0x33; 32]);
        assert_eq!(parsed.code(), MULTIHASH_IDENTITY);
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut bytes = vec![0x00, 0x20];
        bytes.extend_from_slice(&[1u8; 31]);
        assert_eq!(
            MultihashTaggedBytes::from_bytes(&bytes).unwrap_err(),
            EncodingError::LengthMismatch {
                declared: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn non_identity_rejected() {
        // sha2-256 header with a 32-byte digest.
        let mut bytes = vec![0x12, 0x20];
        bytes.extend_from_slice(&[0u8; 32]);
        assert!(MultihashTaggedBytes::from_bytes(&bytes).is_ok());
        assert_eq!(
            MultihashTaggedBytes::from_identity_bytes(&bytes).unwrap_err(),
            EncodingError::UnexpectedCodec {
                expected: 0x00,
                found: 0x12
            }
        );
    }

    #[test]
    fn debug_hides_digest() {
        let tagged = tag_seed_as_multihash(&[0xab; 32]).unwrap();
        let debug_str = format!("{:?}", tagged);
        assert!(!debug_str.contains("ab, ab"));
        assert!(debug_str.contains("len=32"));
    }
}
