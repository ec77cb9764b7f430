//!
//! Webhook configuration
//!
//! Deployments describe their mode, verification keys, optional secret key and replay window in TOML
//!

use crate::{mode::KeyRing, replay::DEFAULT_REPLAY_WINDOW, Mode, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

#[allow(clippy::cast_possible_truncation)]
const fn default_replay_window_ms() -> u64 {
    DEFAULT_REPLAY_WINDOW.as_millis() as u64
}

/// Webhook configuration
///
/// ```toml
/// mode = "staging"
/// webhook-secret-key = "<base64 secret key>"
/// replay-window-ms = 300000
///
/// [public-keys]
/// staging = "<base64 public key>"
/// ```
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Deployment mode, selects the verification key
    #[serde(default)]
    pub mode: Mode,

    /// Verification keys per mode
    #[serde(default)]
    pub public_keys: KeyRing,

    /// Secret key. Signing is only available if this is set
    #[serde(default)]
    pub webhook_secret_key: Option<String>,

    /// Maximum accepted signature age in milliseconds
    #[serde(default = "default_replay_window_ms")]
    pub replay_window_ms: u64,
}

impl Configuration {
    /// Parse the configuration from its TOML representation
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Maximum accepted signature age
    #[must_use]
    pub fn replay_window(&self) -> Duration {
        Duration::from_millis(self.replay_window_ms)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("mode", &self.mode)
            .field("public_keys", &self.public_keys)
            .field(
                "webhook_secret_key",
                &self.webhook_secret_key.as_ref().map(|_| "[redacted]"),
            )
            .field("replay_window_ms", &self.replay_window_ms)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use crate::Mode;
    use std::time::Duration;

    #[test]
    fn defaults() {
        let config = Configuration::from_toml_str(
            r#"
            [public-keys]
            production = "GbsP5HFoYHBUtNNaHHuY9MZq9NHG7oV9gQq2Xp5JDOs="
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.webhook_secret_key, None);
        assert_eq!(config.replay_window(), Duration::from_secs(300));
    }

    #[test]
    fn full() {
        let config = Configuration::from_toml_str(
            r#"
            mode = "test"
            webhook-secret-key = "secret"
            replay-window-ms = 1000

            [public-keys]
            test = "GbsP5HFoYHBUtNNaHHuY9MZq9NHG7oV9gQq2Xp5JDOs="
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::Test);
        assert_eq!(config.webhook_secret_key.as_deref(), Some("secret"));
        assert_eq!(config.replay_window_ms, 1000);
        assert!(!format!("{config:?}").contains("secret\""));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Configuration::from_toml_str(r#"mode = "prod""#).is_err());
    }
}
