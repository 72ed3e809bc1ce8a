//! Startup configuration read from the process environment.

use std::env;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use chatline_http_transport::{
    HttpTransportConfig, HttpTransportConfigBuilder,
};

/// Environment variable holding the backend base address.
pub const API_URL_VAR: &str = "CHATLINE_API_URL";

/// Why the configuration could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// A required variable is not set, or is empty.
    Missing(&'static str),
    /// The backend address is not an `http` or `https` URL.
    InvalidUrl(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => {
                write!(f, "{var} environment variable is not set")
            }
            ConfigError::InvalidUrl(url) => {
                write!(f, "{url:?} is not an http(s) URL")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    api_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable
    /// name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(API_URL_VAR))?;

        let has_scheme = ["http://", "https://"].iter().any(|scheme| {
            api_url
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
                && api_url.len() > scheme.len()
        });
        if !has_scheme {
            return Err(ConfigError::InvalidUrl(api_url));
        }

        Ok(Self { api_url })
    }

    /// The backend base address.
    #[inline]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Builds the HTTP transport configuration for this backend.
    #[inline]
    pub fn transport_config(&self) -> HttpTransportConfig {
        HttpTransportConfigBuilder::with_base_url(&self.api_url).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_with(value: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let value = value.map(ToOwned::to_owned);
        move |key: &str| {
            assert_eq!(key, API_URL_VAR);
            value.clone()
        }
    }

    #[test]
    fn test_valid_url() {
        let config =
            Config::from_lookup(lookup_with(Some(" http://localhost:5000/ ")))
                .unwrap();
        assert_eq!(config.api_url(), "http://localhost:5000/");
        assert_eq!(
            config.transport_config().chat_url(),
            "http://localhost:5000/chat"
        );
    }

    #[test]
    fn test_missing() {
        for value in [None, Some(""), Some("   ")] {
            let err = Config::from_lookup(lookup_with(value)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(API_URL_VAR));
        }
    }

    #[test]
    fn test_invalid_url() {
        for value in ["localhost:5000", "ftp://example.com", "https://"] {
            let err =
                Config::from_lookup(lookup_with(Some(value))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUrl(_)));
        }
        assert!(Config::from_lookup(lookup_with(Some("HTTPS://a.b"))).is_ok());
    }
}
