#![allow(missing_docs)]

use crate::{crypto, header::ParseError, mode::Mode};
use http::header::{InvalidHeaderValue, ToStrError};
use miette::Diagnostic;
use ring::error::Unspecified;
use std::fmt;
use thiserror::Error;

/// Values claimed by a signature header
///
/// Attached to verification failures for operator diagnosis.
/// None of these values are trustworthy unless authentication succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureClaims {
    pub uri: String,
    pub submission_id: String,
    pub form_id: String,
    pub epoch: u64,
    pub signature: String,
}

impl fmt::Display for SignatureClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uri={} submissionId={} formId={} epoch={} signature={}",
            self.uri, self.submission_id, self.form_id, self.epoch, self.signature
        )
    }
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    HeaderParse(#[from] ParseError),

    #[error(transparent)]
    HttpHeaderToStr(#[from] ToStrError),

    #[error("Signature header is invalid")]
    #[diagnostic(help("all of `t`, `s`, `f` and `v1` must be present and `t` must be a positive integer"))]
    InvalidHeader,

    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Key(#[from] crypto::parse::Error),

    #[error("No public key configured for mode \"{0}\"")]
    MissingPublicKey(Mode),

    #[error("Signature header missing")]
    MissingSignatureHeader,

    #[error("Signature could not be verified for {0}")]
    SignatureMismatch(Box<SignatureClaims>),

    #[error("Signing failed")]
    Signing(#[from] Unspecified),

    #[error("Signature is not recent for {0}")]
    StaleSignature(Box<SignatureClaims>),
}
