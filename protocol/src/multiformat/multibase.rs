//! Multibase text encoding, base58btc only.
//!
//! `encode(bytes) = 'z' || base58(bytes)` using the Bitcoin alphabet.
//! Base58 has no padding, so every byte string has exactly one encoding,
//! and leading zero bytes survive as leading `'1'` characters.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EncodingError;
use crate::config::MULTIBASE_BASE58BTC;

/// A base58btc multibase string. Never empty: it always carries the `z`
/// prefix followed by at least one base58 character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MultibaseString(String);

impl MultibaseString {
    /// Validate an existing multibase string.
    pub fn parse(s: &str) -> Result<Self, EncodingError> {
        decode_multibase(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Decode back to the framed bytes.
    pub fn decode(&self) -> Result<Vec<u8>, EncodingError> {
        decode_multibase(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MultibaseString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MultibaseString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MultibaseString {
    type Error = EncodingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        decode_multibase(&s)?;
        Ok(Self(s))
    }
}

impl From<MultibaseString> for String {
    fn from(m: MultibaseString) -> Self {
        m.0
    }
}

/// Encode `bytes` as base58btc multibase.
pub fn encode_multibase(bytes: impl AsRef<[u8]>) -> Result<MultibaseString, EncodingError> {
    let bytes = bytes.as_ref();
    if bytes.is_empty() {
        return Err(EncodingError::EmptyPayload);
    }
    let mut out = String::with_capacity(bytes.len() * 138 / 100 + 2);
    out.push(MULTIBASE_BASE58BTC);
    out.push_str(&bs58::encode(bytes).into_string());
    Ok(MultibaseString(out))
}

/// Decode a base58btc multibase string.
pub fn decode_multibase(s: &str) -> Result<Vec<u8>, EncodingError> {
    let mut chars = s.chars();
    let prefix = chars.next().ok_or(EncodingError::EmptyPayload)?;
    if prefix != MULTIBASE_BASE58BTC {
        return Err(EncodingError::UnsupportedBase(prefix));
    }
    let body = chars.as_str();
    if body.is_empty() {
        return Err(EncodingError::EmptyPayload);
    }
    bs58::decode(body)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))
}
