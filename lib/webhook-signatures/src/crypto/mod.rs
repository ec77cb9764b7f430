//!
//! Common cryptographic operations
//!
//! Signatures travel in their standard Base64 form
//!

mod sign;
mod verify;

pub mod parse;

pub use self::sign::{sign, SigningKey};
pub use self::verify::{verify, PublicKey, VerifyError};
