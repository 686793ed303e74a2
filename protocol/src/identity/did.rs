//! # did:key Identifiers
//!
//! A did:key is the multibase-encoded, multicodec-tagged public key behind
//! the literal prefix `did:key:`:
//!
//! ```text
//! did:key:z6MkqwUHvSRAsEyyptMyqMR3JukgKa34ugxkgPDUjtarvrcZ
//! └──┬──┘ │└────────────────────┬─────────────────────────┘
//!  prefix z   base58btc([0xed 0x01] || 32-byte Ed25519 key)
//! ```
//!
//! Nothing has to be looked up to use one: the key *is* the identifier.
//!
//! ## Standards References
//!
//! - [DID Core v1.0](https://www.w3.org/TR/did-core/)
//! - [The did:key Method](https://w3c-ccg.github.io/did-method-key/)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    DID_KEY_PREFIX, DID_METHOD, DID_SCHEME, MULTICODEC_ED25519_PUB, PUBLIC_KEY_LENGTH,
};
use crate::crypto::keys::{DidPublicKey, KeyError};
use crate::multiformat::{
    encode_multibase, tag_public_key, EncodingError, MultibaseString, MulticodecTaggedBytes,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while parsing a did:key string.
#[derive(Debug, Error)]
pub enum DidError {
    /// The string is not of the form `did:<method>:<identifier>`.
    #[error("invalid DID format: {0}")]
    InvalidFormat(String),

    /// The DID method is not "key".
    #[error("unsupported DID method: expected 'key', got '{0}'")]
    UnsupportedMethod(String),

    /// The method-specific identifier is not a valid encoded key.
    #[error("invalid encoded key in DID: {0}")]
    Encoding(#[from] EncodingError),

    /// The embedded key bytes are not a usable Ed25519 key.
    #[error("invalid public key in DID: {0}")]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// DidKey
// ---------------------------------------------------------------------------

/// A `did:key` identifier for an Ed25519 public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DidKey {
    encoded_key: MultibaseString,
}

impl DidKey {
    /// Build the identifier for a raw public key.
    pub fn from_public_key(public_key: &DidPublicKey) -> Result<Self, EncodingError> {
        let encoded_key = encode_multibase(tag_public_key(public_key.as_bytes()))?;
        Ok(assemble(&encoded_key))
    }

    /// Parse a did:key string and check it wraps 32 bytes tagged as an
    /// Ed25519 public key. Whether those bytes are a curve point is left to
    /// [`DidKey::public_key`].
    pub fn parse(did: &str) -> Result<Self, DidError> {
        let parts: Vec<&str> = did.splitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(DidError::InvalidFormat(
                "DID must have format 'did:<method>:<identifier>'".into(),
            ));
        }
        if parts[0] != DID_SCHEME {
            return Err(DidError::InvalidFormat(format!(
                "expected 'did' prefix, got '{}'",
                parts[0]
            )));
        }
        if parts[1] != DID_METHOD {
            return Err(DidError::UnsupportedMethod(parts[1].to_string()));
        }

        let encoded_key = MultibaseString::parse(parts[2])?;
        let decoded = encoded_key.decode()?;
        let tagged = MulticodecTaggedBytes::from_bytes_expecting(&decoded, MULTICODEC_ED25519_PUB)?;
        if tagged.payload().len() != PUBLIC_KEY_LENGTH {
            return Err(DidError::Key(KeyError::InvalidPublicKey));
        }

        Ok(Self { encoded_key })
    }

    /// The multibase-encoded key after the `did:key:` prefix.
    pub fn encoded_key(&self) -> &MultibaseString {
        &self.encoded_key
    }

    /// Decode the embedded Ed25519 public key, rejecting bytes that are not
    /// a point on the curve.
    pub fn public_key(&self) -> Result<DidPublicKey, DidError> {
        let decoded = self.encoded_key.decode()?;
        let tagged = MulticodecTaggedBytes::from_bytes_expecting(&decoded, MULTICODEC_ED25519_PUB)?;
        Ok(DidPublicKey::try_from_slice(tagged.payload())?)
    }

    /// Full identifier string: `did:key:<multibase>`.
    pub fn to_did_string(&self) -> String {
        format!("{}{}", DID_KEY_PREFIX, self.encoded_key)
    }
}

/// Concatenate the `did:key:` prefix with an encoded public key.
///
/// [`MultibaseString`] is never empty, so there is nothing else to check.
pub fn assemble(encoded_public_key: &MultibaseString) -> DidKey {
    DidKey {
        encoded_key: encoded_public_key.clone(),
    }
}

impl fmt::Display for DidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DID_KEY_PREFIX, self.encoded_key)
    }
}

impl FromStr for DidKey {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DidKey {
    type Error = DidError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DidKey> for String {
    fn from(did: DidKey) -> Self {
        did.to_did_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::DidKeypair;

    const DID_FOR_AA_KEY: &str = "did:key:z6MkqwUHvSRAsEyyptMyqMR3JukgKa34ugxkgPDUjtarvrcZ";
    /// did:key of the RFC 8032 test-1 public key.
    const DID_FOR_RFC8032_KEY: &str = "did:key:z6MktwupdmLXVVqTzCw4i46r4uGyosGXRnR3XjN4Zq7oMMsw";

    #[test]
    fn golden_value_for_fixed_key() {
        let encoded = encode_multibase(tag_public_key(&[0xaa; 32])).unwrap();
        let did = assemble(&encoded);
        assert_eq!(did.to_did_string(), DID_FOR_AA_KEY);
    }

    #[test]
    fn golden_value_for_rfc8032_key() {
        let seed: [u8; 32] =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap()
                .try_into()
                .unwrap();
        let kp = DidKeypair::from_seed(&seed);
        let did = DidKey::from_public_key(&kp.public_key()).unwrap();
        assert_eq!(did.to_did_string(), DID_FOR_RFC8032_KEY);
    }

    #[test]
    fn ed25519_did_prefix() {
        let kp = DidKeypair::generate().unwrap();
        let did = DidKey::from_public_key(&kp.public_key()).unwrap();
        assert!(did.to_did_string().starts_with("did:key:z6Mk"), "got: {}", did);
    }

    #[test]
    fn display_matches_to_did_string() {
        let kp = DidKeypair::generate().unwrap();
        let did = DidKey::from_public_key(&kp.public_key()).unwrap();
        assert_eq!(did.to_string(), did.to_did_string());
    }

    #[test]
    fn parse_recovers_public_key() {
        let kp = DidKeypair::generate().unwrap();
        let did = DidKey::from_public_key(&kp.public_key()).unwrap();
        let parsed = DidKey::parse(&did.to_did_string()).unwrap();
        assert_eq!(parsed, did);
        assert_eq!(parsed.public_key().unwrap(), kp.public_key());
    }

    #[test]
    fn invalid_prefix_rejected() {
        assert!(matches!(
            DidKey::parse("notadid:key:z6Mkabc"),
            Err(DidError::InvalidFormat(_))
        ));
        assert!(matches!(
            DidKey::parse("did:key"),
            Err(DidError::InvalidFormat(_))
        ));
    }

    #[test]
    fn wrong_method_rejected() {
        assert!(matches!(
            DidKey::parse("did:web:example.com"),
            Err(DidError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn wrong_codec_rejected() {
        let tagged = MulticodecTaggedBytes::new(0xe7, &[2u8; 33]).unwrap();
        let encoded = encode_multibase(&tagged).unwrap();
        let result = DidKey::parse(&format!("did:key:{}", encoded));
        assert!(matches!(
            result,
            Err(DidError::Encoding(EncodingError::UnexpectedCodec { .. }))
        ));
    }

    #[test]
    fn truncated_key_rejected() {
        let tagged = MulticodecTaggedBytes::new(MULTICODEC_ED25519_PUB, &[2u8; 31]).unwrap();
        let encoded = encode_multibase(&tagged).unwrap();
        assert!(matches!(
            DidKey::parse(&format!("did:key:{}", encoded)),
            Err(DidError::Key(_))
        ));
    }

    #[test]
    fn serde_as_plain_string() {
        let did = DidKey::parse(DID_FOR_RFC8032_KEY).unwrap();
        let json = serde_json::to_string(&did).unwrap();
        assert_eq!(json, format!("\"{}\"", DID_FOR_RFC8032_KEY));
        let back: DidKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, did);
    }

    #[test]
    fn serde_round_trips_any_assembled_key() {
        // 0x02 repeated is not a curve point, but it is still a well-formed
        // did:key, so it has to survive serialization.
        let did = assemble(&encode_multibase(tag_public_key(&[0x02; 32])).unwrap());
        let json = serde_json::to_string(&did).unwrap();
        let back: DidKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, did);
        assert!(matches!(
            back.public_key(),
            Err(DidError::Key(KeyError::InvalidPublicKey))
        ));
    }
}
