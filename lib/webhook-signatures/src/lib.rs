//!
//! Webhook signatures library
//!
//! Signs outbound webhook callbacks with an asymmetric key and authenticates inbound ones.
//! The signature is carried in a compact `t=<epoch>,s=<submissionId>,f=<formId>,v1=<signature>` header
//! and covers the full request URI, so a signature issued for one endpoint can't be replayed against another.
//!

#![deny(missing_docs)]

pub mod base_string;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod header;
pub mod mode;
pub mod replay;
pub mod uri;

mod error;
mod webhook;

pub use self::{
    config::Configuration,
    error::{Error, SignatureClaims},
    header::SignedHeader,
    mode::{KeyRing, Mode},
    replay::ReplayGuard,
    webhook::{Signer, Webhooks, SIGNATURE_HEADER},
};
pub use ring;

/// Result alias defaulting to the crate error
pub type Result<T, E = Error> = std::result::Result<T, E>;
