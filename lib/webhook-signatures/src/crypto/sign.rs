use ring::{
    error::Unspecified,
    signature::{Ed25519KeyPair, Signature},
};

/// Signing key definition
pub trait SigningKey {
    /// Type the signature algorithm outputs
    type Output: AsRef<[u8]>;

    /// Sign a message
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified>;
}

impl SigningKey for Ed25519KeyPair {
    type Output = Signature;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified> {
        Ok(Ed25519KeyPair::sign(self, msg))
    }
}

/// Sign a message with the provided signing key and encode the returned signature in Base64
#[inline]
pub fn sign<SK>(payload: &[u8], key: &SK) -> Result<String, Unspecified>
where
    SK: SigningKey + ?Sized,
{
    let signature = key.sign(payload)?;
    Ok(base64_simd::STANDARD.encode_to_string(signature))
}
