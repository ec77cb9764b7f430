use crate::{
    base_string,
    crypto::{self, parse::SigningKey, PublicKey},
    header, Configuration, Error, ReplayGuard, Result, SignatureClaims, SignedHeader,
};
use http::{HeaderMap, HeaderName};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

/// Header the signature is transported in
pub static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-formsg-signature");

/// Signs outbound webhooks
#[derive(Debug)]
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    /// Construct a signer from a parsed key
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Construct a signer from a raw Base64 or PEM secret key
    pub fn from_secret_key(raw: &str) -> Result<Self> {
        Ok(Self::new(crypto::parse::signing_key(raw)?))
    }

    /// Public key matching this signer
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Generate the Base64 signature for the request facts
    #[instrument(skip_all, fields(%submission_id, %form_id, epoch = epoch))]
    pub fn generate_signature(
        &self,
        uri: &str,
        submission_id: &str,
        form_id: &str,
        epoch: u64,
    ) -> Result<String> {
        let base_string = base_string::construct(uri, submission_id, form_id, epoch);
        let signature = crypto::sign(base_string.as_bytes(), &self.key)?;

        Ok(signature)
    }

    /// Sign the request facts and return the header ready to be encoded
    pub fn sign(
        &self,
        uri: &str,
        submission_id: &str,
        form_id: &str,
        epoch: u64,
    ) -> Result<SignedHeader> {
        let signature = self.generate_signature(uri, submission_id, form_id, epoch)?;

        Ok(SignedHeader {
            epoch,
            submission_id: submission_id.to_owned(),
            form_id: form_id.to_owned(),
            signature,
        })
    }
}

/// Webhook authenticator
///
/// Holds the key material. Signing is only possible if a [`Signer`] was configured,
/// verify-only deployments simply don't set one.
#[derive(Debug, TypedBuilder)]
pub struct Webhooks {
    /// Key inbound signatures are verified against
    public_key: PublicKey,

    /// Signer for outbound webhooks
    #[builder(default, setter(strip_option))]
    signer: Option<Signer>,

    /// Freshness window
    #[builder(default)]
    replay_guard: ReplayGuard,
}

impl Webhooks {
    /// Construct from configuration
    ///
    /// The public key is selected by the configured mode
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let public_key = config.public_keys.public_key(config.mode)?;
        let signer = config
            .webhook_secret_key
            .as_deref()
            .map(Signer::from_secret_key)
            .transpose()?;

        Ok(Self {
            public_key,
            signer,
            replay_guard: ReplayGuard::new(config.replay_window()),
        })
    }

    /// Signer, if a secret key was configured
    #[must_use]
    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Key inbound signatures are verified against
    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Freshness window
    #[must_use]
    pub fn replay_guard(&self) -> &ReplayGuard {
        &self.replay_guard
    }

    /// Authenticate an inbound webhook
    ///
    /// `uri` is the endpoint the webhook was delivered to. The signature is verified before the epoch is checked
    /// for recency, since an unauthenticated epoch can't be trusted.
    #[instrument(skip_all)]
    pub fn authenticate(&self, signature_header: &str, uri: &str) -> Result<()> {
        let parsed = header::parse(signature_header).inspect_err(|error| {
            debug!(?error, "malformed signature header");
        })?;

        let header = parsed.into_signed_header().inspect_err(|_| {
            debug!("signature header is missing fields");
        })?;

        let base_string =
            base_string::construct(uri, &header.submission_id, &header.form_id, header.epoch);

        if let Err(error) = self
            .public_key
            .verify(base_string.as_bytes(), &header.signature)
        {
            debug!(?error, %uri, submission_id = %header.submission_id, form_id = %header.form_id, "signature could not be verified");
            return Err(Error::SignatureMismatch(claims(uri, header)));
        }

        if !self.replay_guard.is_fresh(header.epoch) {
            debug!(%uri, epoch = header.epoch, "signature is not recent");
            return Err(Error::StaleSignature(claims(uri, header)));
        }

        Ok(())
    }

    /// Authenticate an inbound webhook using its HTTP headers
    pub fn authenticate_headers(&self, headers: &HeaderMap, uri: &str) -> Result<()> {
        let Some(header) = headers.get(&SIGNATURE_HEADER) else {
            debug!("Missing signature header");
            return Err(Error::MissingSignatureHeader);
        };

        self.authenticate(header.to_str()?, uri)
    }
}

fn claims(uri: &str, header: SignedHeader) -> Box<SignatureClaims> {
    Box::new(SignatureClaims {
        uri: uri.to_owned(),
        submission_id: header.submission_id,
        form_id: header.form_id,
        epoch: header.epoch,
        signature: header.signature,
    })
}
