//! # Minting
//!
//! The whole pipeline in one call:
//!
//! ```text
//! entropy ─▶ 8 bytes  ─▶ base64url ─────────────────────────────▶ id
//! entropy ─▶ 32 bytes ─▶ Ed25519 ─┬─ public key ─▶ multicodec ─▶ multibase ─▶ did
//!                                 └─ seed ───────▶ multihash  ─▶ multibase ─▶ secret
//! ```
//!
//! The opaque ID and the seed come from two separate draws, so the ID says
//! nothing about the key. Minting either completes or returns the first
//! error. Nothing half-built is ever handed back, and there are no retries.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::did::{assemble, DidKey};
use super::seed::SecretSeed;
use crate::config::OPAQUE_ID_LENGTH;
use crate::crypto::entropy::{generate_random_id, EntropyError, EntropySource, OsEntropy};
use crate::crypto::keys::DidKeypair;
use crate::multiformat::{encode_multibase, tag_public_key, EncodingError};

/// Why a mint failed.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("entropy failure: {0}")]
    Entropy(#[from] EntropyError),

    #[error("encoding contract violation: {0}")]
    Encoding(#[from] EncodingError),
}

/// Output of a successful mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintedDidKey {
    /// Opaque tracking handle, URL-safe base64 without padding.
    pub id: String,
    /// The public identifier.
    #[serde(rename = "public_did")]
    pub did: DidKey,
    /// The private seed record.
    #[serde(rename = "secret_seed_multibase")]
    pub secret_seed: SecretSeed,
}

/// Mint a fresh did:key using the OS CSPRNG.
pub fn mint_did_key() -> Result<MintedDidKey, MintError> {
    mint_did_key_with(&mut OsEntropy::os())
}

/// Mint a fresh did:key drawing all randomness from `source`.
pub fn mint_did_key_with<E: EntropySource + ?Sized>(
    source: &mut E,
) -> Result<MintedDidKey, MintError> {
    let id_bytes = generate_random_id(source, OPAQUE_ID_LENGTH)?;
    let id = URL_SAFE_NO_PAD.encode(id_bytes);

    let keypair = DidKeypair::generate_with(source)?;
    let seed = keypair.seed();

    let did = assemble(&encode_multibase(tag_public_key(&keypair.public_key_bytes()))?);
    let secret_seed = SecretSeed::from_seed(seed.as_slice())?;

    tracing::debug!(id = %id, did = %did, "minted did:key");

    Ok(MintedDidKey {
        id,
        did,
        secret_seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::entropy::testing::{ExhaustingSource, FailingSource, ShortSource};
    use crate::crypto::entropy::RngEntropy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn minted_did_has_ed25519_prefix() {
        let minted = mint_did_key().unwrap();
        assert!(minted.did.to_string().starts_with("did:key:z6Mk"));
    }

    #[test]
    fn opaque_id_is_eight_bytes_base64url() {
        let minted = mint_did_key().unwrap();
        // 8 bytes -> 11 base64 characters without padding.
        assert_eq!(minted.id.len(), 11);
        let decoded = URL_SAFE_NO_PAD.decode(&minted.id).unwrap();
        assert_eq!(decoded.len(), 8);
        assert!(!minted.id.contains('='));
        assert!(!minted.id.contains('+') && !minted.id.contains('/'));
    }

    #[test]
    fn two_mints_differ() {
        let a = mint_did_key().unwrap();
        let b = mint_did_key().unwrap();
        assert_ne!(a.did, b.did);
        assert_ne!(a.secret_seed, b.secret_seed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn secret_seed_recovers_the_did() {
        let minted = mint_did_key().unwrap();
        let kp = minted.secret_seed.recover_keypair().unwrap();
        assert_eq!(kp.public_key(), minted.did.public_key().unwrap());
    }

    #[test]
    fn seeded_source_reproduces_mint() {
        let a = mint_did_key_with(&mut RngEntropy::new(StdRng::seed_from_u64(42))).unwrap();
        let b = mint_did_key_with(&mut RngEntropy::new(StdRng::seed_from_u64(42))).unwrap();
        let c = mint_did_key_with(&mut RngEntropy::new(StdRng::seed_from_u64(43))).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.did, c.did);
    }

    #[test]
    fn id_is_a_separate_draw() {
        // Replay the same RNG by hand: the first 8 bytes become the id, the
        // next 32 the seed.
        let minted = mint_did_key_with(&mut RngEntropy::new(StdRng::seed_from_u64(9))).unwrap();
        let mut rng = RngEntropy::new(StdRng::seed_from_u64(9));
        let id_bytes = generate_random_id(&mut rng, 8).unwrap();
        let seed = generate_random_id(&mut rng, 32).unwrap();
        assert_eq!(minted.id, URL_SAFE_NO_PAD.encode(&id_bytes));
        assert_eq!(minted.secret_seed.seed_bytes().unwrap().as_slice(), seed.as_slice());
        assert!(!seed.windows(8).any(|w| w == id_bytes.as_slice()));
    }

    #[test]
    fn short_read_on_id_aborts() {
        let err = mint_did_key_with(&mut ShortSource { limit: 4 }).unwrap_err();
        assert!(matches!(
            err,
            MintError::Entropy(EntropyError::ShortRead {
                requested: 8,
                returned: 4
            })
        ));
    }

    #[test]
    fn short_read_on_seed_aborts() {
        let err = mint_did_key_with(&mut ExhaustingSource { good_reads: 1 }).unwrap_err();
        assert!(matches!(
            err,
            MintError::Entropy(EntropyError::ShortRead {
                requested: 32,
                returned: 0
            })
        ));
    }

    #[test]
    fn failing_source_aborts() {
        let err = mint_did_key_with(&mut FailingSource).unwrap_err();
        assert!(matches!(err, MintError::Entropy(EntropyError::Source(_))));
        assert!(err.to_string().starts_with("entropy failure"));
    }

    #[test]
    fn json_field_names() {
        let minted = mint_did_key().unwrap();
        let value = serde_json::to_value(&minted).unwrap();
        assert_eq!(value["id"], minted.id);
        assert_eq!(value["public_did"], minted.did.to_string());
        assert_eq!(value["secret_seed_multibase"], minted.secret_seed.expose());
    }

    #[test]
    fn json_round_trip_validates_seed_record() {
        let minted = mint_did_key().unwrap();
        let mut value = serde_json::to_value(&minted).unwrap();
        let back: MintedDidKey = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, minted);

        // Same payload behind a sha2-256 header instead of identity.
        let mut sha = vec![0x12, 0x20];
        sha.extend_from_slice(&[0u8; 32]);
        value["secret_seed_multibase"] = encode_multibase(&sha).unwrap().as_str().into();
        assert!(serde_json::from_value::<MintedDidKey>(value).is_err());
    }

    #[test]
    fn concurrent_mints_are_independent() {
        let dids: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| mint_did_key().unwrap().did.to_string()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let unique: std::collections::HashSet<_> = dids.iter().collect();
        assert_eq!(unique.len(), dids.len());
    }
}
