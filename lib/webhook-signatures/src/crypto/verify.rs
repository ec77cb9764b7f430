use miette::Diagnostic;
use ring::signature::{UnparsedPublicKey, VerificationAlgorithm, ED25519};
use thiserror::Error;

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Failed to decode the Base64 payload
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

/// Public key used to verify signatures
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: UnparsedPublicKey<Vec<u8>>,
}

impl PublicKey {
    /// Wrap the raw key bytes of the given algorithm
    #[must_use]
    pub fn new(algorithm: &'static dyn VerificationAlgorithm, raw: Vec<u8>) -> Self {
        Self {
            inner: UnparsedPublicKey::new(algorithm, raw),
        }
    }

    /// Wrap a raw 32-byte Ed25519 public key
    #[must_use]
    pub fn ed25519(raw: Vec<u8>) -> Self {
        Self::new(&ED25519, raw)
    }

    /// Raw bytes of the key
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_ref()
    }

    /// Verify that the message corresponds with the Base64-encoded signature
    #[inline]
    pub fn verify(&self, msg: &[u8], encoded_signature: &str) -> Result<(), VerifyError> {
        verify(msg, encoded_signature, &self.inner)
    }
}

/// Verify that the message corresponds with the signature using the provided verifying key
#[inline]
pub fn verify<B>(
    msg: &[u8],
    encoded_signature: &str,
    key: &UnparsedPublicKey<B>,
) -> Result<(), VerifyError>
where
    B: AsRef<[u8]>,
{
    let signature = base64_simd::STANDARD.decode_to_vec(encoded_signature)?;
    key.verify(msg, &signature)
        .map_err(|_| VerifyError::Verification)
}
