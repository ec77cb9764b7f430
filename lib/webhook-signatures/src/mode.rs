//!
//! Deployment modes and the public keys belonging to them
//!

use crate::{
    crypto::{self, PublicKey},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Mode string didn't match any known mode
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unknown mode \"{0}\"")]
pub struct ParseModeError(String);

/// Deployment mode, selects the public key used for verification
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Production deployment
    #[default]
    Production,

    /// Staging deployment
    Staging,

    /// Local development
    Development,

    /// Test suites
    Test,
}

impl Mode {
    /// Name of the mode as it appears in configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            "test" => Self::Test,
            other => return Err(ParseModeError(other.to_owned())),
        };

        Ok(mode)
    }
}

/// Public keys per deployment mode
///
/// Values are either raw Base64 Ed25519 keys or SPKI PEM documents
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct KeyRing {
    /// Key used in production
    pub production: Option<String>,

    /// Key used in staging
    pub staging: Option<String>,

    /// Key used in development
    pub development: Option<String>,

    /// Key used in tests
    pub test: Option<String>,
}

impl KeyRing {
    /// Set the key for a mode
    #[must_use]
    pub fn with(mut self, mode: Mode, key: impl Into<String>) -> Self {
        *self.slot(mode) = Some(key.into());
        self
    }

    /// Raw key configured for the mode
    #[must_use]
    pub fn get(&self, mode: Mode) -> Option<&str> {
        let key = match mode {
            Mode::Production => &self.production,
            Mode::Staging => &self.staging,
            Mode::Development => &self.development,
            Mode::Test => &self.test,
        };

        key.as_deref()
    }

    /// Parsed public key for the mode
    pub fn public_key(&self, mode: Mode) -> Result<PublicKey> {
        let raw = self.get(mode).ok_or(Error::MissingPublicKey(mode))?;
        Ok(crypto::parse::verifying_key(raw)?)
    }

    fn slot(&mut self, mode: Mode) -> &mut Option<String> {
        match mode {
            Mode::Production => &mut self.production,
            Mode::Staging => &mut self.staging,
            Mode::Development => &mut self.development,
            Mode::Test => &mut self.test,
        }
    }
}
