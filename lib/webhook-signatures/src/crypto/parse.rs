//!
//! Parse cryptographic keys
//!
//! Keys are accepted either in their PKCS#8/SPKI PEM form or as the raw Base64 Ed25519 keys webhook deployments hand out
//!

use super::{PublicKey, SigningKey as SigningKeyTrait};
use const_oid::db::rfc8410::ID_ED_25519;
use miette::Diagnostic;
use pkcs8::{Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use ring::{
    error::Unspecified,
    signature::{Ed25519KeyPair, KeyPair},
};
use thiserror::Error;

const PEM_PREFIX: &str = "-----BEGIN";
const ED25519_SEED_LEN: usize = 32;
const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed Base64 key
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse an Ed25519 public key from its SPKI PEM form
#[inline]
pub fn public_key(pem: &str) -> Result<PublicKey, Error> {
    let (_pem_tag, document) = Document::from_pem(pem)?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?
        .to_vec();

    if spki.algorithm.oid != ID_ED_25519 {
        return Err(Error::UnknownKeyType);
    }

    Ok(PublicKey::ed25519(raw_bytes))
}

/// Parse a raw Base64-encoded Ed25519 public key
#[inline]
pub fn public_key_base64(encoded: &str) -> Result<PublicKey, Error> {
    let raw_bytes = base64_simd::STANDARD.decode_to_vec(encoded.trim())?;
    if raw_bytes.len() != ED25519_PUBLIC_KEY_LEN {
        return Err(Error::MalformedKey);
    }

    Ok(PublicKey::ed25519(raw_bytes))
}

/// Parse a public key, detecting whether it is PEM or raw Base64
#[inline]
pub fn verifying_key(raw: &str) -> Result<PublicKey, Error> {
    if raw.trim_start().starts_with(PEM_PREFIX) {
        public_key(raw)
    } else {
        public_key_base64(raw)
    }
}

/// Enum dispatch over various signing keys
#[derive(Debug)]
#[non_exhaustive]
pub enum SigningKey {
    /// Ed25519
    Ed25519(Ed25519KeyPair),
}

impl SigningKey {
    /// Public half of the key pair
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(key) => PublicKey::ed25519(key.public_key().as_ref().to_vec()),
        }
    }
}

impl SigningKeyTrait for SigningKey {
    type Output = Vec<u8>;

    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified> {
        match self {
            Self::Ed25519(key) => Ok(key.sign(msg).as_ref().to_vec()),
        }
    }
}

/// Parse an Ed25519 private key from its PKCS#8 PEM form.
/// Decoding goes through a zeroizing document, so temporary allocations don't linger.
#[inline]
pub fn private_key(pem: &str) -> Result<SigningKey, Error> {
    let (_tag_line, document) = SecretDocument::from_pem(pem)?;
    let private_key_raw: PrivateKeyInfo<'_> = document.decode_msg()?;

    if private_key_raw.algorithm.oid != ID_ED_25519 {
        return Err(Error::UnknownKeyType);
    }

    let key_pair = Ed25519KeyPair::from_pkcs8_maybe_unchecked(document.as_bytes())?;
    Ok(SigningKey::Ed25519(key_pair))
}

/// Parse a raw Base64-encoded Ed25519 secret key
///
/// Accepts the 64-byte `seed || public key` form as well as a bare 32-byte seed
#[inline]
pub fn private_key_base64(encoded: &str) -> Result<SigningKey, Error> {
    let raw_bytes = base64_simd::STANDARD.decode_to_vec(encoded.trim())?;

    let key_pair = match raw_bytes.len() {
        ED25519_SEED_LEN => Ed25519KeyPair::from_seed_unchecked(&raw_bytes)?,
        len if len == ED25519_SEED_LEN + ED25519_PUBLIC_KEY_LEN => {
            let (seed, public_key) = raw_bytes.split_at(ED25519_SEED_LEN);
            Ed25519KeyPair::from_seed_and_public_key(seed, public_key)?
        }
        _ => return Err(Error::MalformedKey),
    };

    Ok(SigningKey::Ed25519(key_pair))
}

/// Parse a private key, detecting whether it is PEM or raw Base64
#[inline]
pub fn signing_key(raw: &str) -> Result<SigningKey, Error> {
    if raw.trim_start().starts_with(PEM_PREFIX) {
        private_key(raw)
    } else {
        private_key_base64(raw)
    }
}
