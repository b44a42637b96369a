//! Client configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, Source};
use core_kernel::{Currency, MoneyError};

/// Environment variable prefix, e.g. `CLAIMS_API_BASE`
pub const ENV_PREFIX: &str = "CLAIMS";

const SESSION_DIR: &str = "claims-portal";
const SESSION_FILE: &str = "session.json";

/// Client configuration
#[derive(Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the claims service
    pub api_base: String,
    /// Service adapter (http, mock)
    pub provider: String,
    /// Where the session is persisted; defaults under the user config dir
    #[serde(default)]
    pub session_path: Option<PathBuf>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Display currency for claim amounts
    pub currency: String,
    /// Log level
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5001".to_string(),
            provider: "http".to_string(),
            session_path: None,
            request_timeout_secs: 30,
            currency: "USD".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("provider", &self.provider)
            .field("session_path", &self.session_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("currency", &self.currency)
            .finish()
    }
}

impl ClientConfig {
    /// Loads configuration from `CLAIMS_*` environment variables over defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from any source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        Config::builder()
            .set_default("api_base", defaults.api_base)?
            .set_default("provider", defaults.provider)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("currency", defaults.currency)?
            .set_default("log_level", defaults.log_level)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Session file location, `None` when no config dir can be determined
    pub fn resolved_session_path(&self) -> Option<PathBuf> {
        self.session_path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn currency(&self) -> Result<Currency, MoneyError> {
        self.currency.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults_apply() {
        let config = ClientConfig::from_source(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_overrides_apply() {
        let source = File::from_str(
            r#"
            api_base = "https://claims.example.com"
            provider = "mock"
            session_path = "/tmp/portal/session.json"
            currency = "eur"
            "#,
            FileFormat::Toml,
        );
        let config = ClientConfig::from_source(source).unwrap();

        assert_eq!(config.api_base, "https://claims.example.com");
        assert_eq!(config.provider, "mock");
        assert_eq!(
            config.resolved_session_path(),
            Some(PathBuf::from("/tmp/portal/session.json"))
        );
        assert_eq!(config.currency().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_unknown_currency() {
        let config = ClientConfig {
            currency: "XYZ".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.currency().is_err());
    }
}
