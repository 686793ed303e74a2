//! # Entropy Sources
//!
//! Every random byte the minting pipeline consumes flows through the
//! [`EntropySource`] trait. Production code uses [`OsEntropy`] (the OS
//! CSPRNG); tests plug in a seeded `StdRng` or a deliberately broken source
//! to exercise the failure paths.
//!
//! A source is allowed to hand back fewer bytes than requested. Callers go
//! through [`fill_exact`], which turns any shortfall into an error instead
//! of quietly using a partially filled (i.e. partly zero) buffer.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

/// Failures of the underlying randomness source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntropyError {
    #[error("generated insufficient random bytes: requested {requested}, got {returned}")]
    ShortRead { requested: usize, returned: usize },

    #[error("error generating random bytes: {0}")]
    Source(String),
}

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Write up to `buf.len()` random bytes into `buf` and return how many
    /// were written.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
        (**self).read(buf)
    }
}

/// Adapter that exposes any `rand` CSPRNG as an [`EntropySource`].
#[derive(Debug, Clone, Default)]
pub struct RngEntropy<R> {
    rng: R,
}

/// The production source: the operating system's CSPRNG.
pub type OsEntropy = RngEntropy<OsRng>;

impl<R: RngCore + CryptoRng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl OsEntropy {
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
        self.rng
            .try_fill_bytes(buf)
            .map_err(|e| EntropyError::Source(e.to_string()))?;
        Ok(buf.len())
    }
}

/// Fill `buf` completely from `source` or fail.
pub fn fill_exact<E: EntropySource + ?Sized>(
    source: &mut E,
    buf: &mut [u8],
) -> Result<(), EntropyError> {
    let returned = source.read(buf)?;
    if returned != buf.len() {
        return Err(EntropyError::ShortRead {
            requested: buf.len(),
            returned,
        });
    }
    Ok(())
}

/// Draw an opaque random identifier of exactly `byte_length` bytes.
///
/// The result is a tracking handle only. It is drawn independently of any
/// key material, so it reveals nothing about the keys minted alongside it.
pub fn generate_random_id<E: EntropySource + ?Sized>(
    source: &mut E,
    byte_length: usize,
) -> Result<Vec<u8>, EntropyError> {
    let mut bytes = vec![0u8; byte_length];
    fill_exact(source, &mut bytes)?;
    Ok(bytes)
}
