use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Environment variable holding the hosted backend's base URL.
pub const BACKEND_URL_VAR: &str = "STOREFRONT_BACKEND_URL";

/// Environment variable holding the backend's public (anon) API key.
pub const BACKEND_ANON_KEY_VAR: &str = "STOREFRONT_BACKEND_ANON_KEY";

/// Errors raised while resolving backend endpoints.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("invalid backend URL `{value}`: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Connection settings for the hosted backend.
///
/// Both values may be absent. Construction never fails so that a missing
/// deployment secret degrades to failed requests instead of a blank page.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the project, e.g. `https://abc.backend.example/`
    pub url: Option<Url>,

    /// Public API key sent as the `apikey` header.
    pub anon_key: Option<String>,
}

impl BackendConfig {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidUrl`] when `url` does not parse.
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: Some(parse_base_url(url)?),
            anon_key: Some(anon_key.into()),
        })
    }

    /// Resolve the configuration through `lookup`, logging anything missing
    /// or malformed.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup(BACKEND_URL_VAR).filter(|value| !value.trim().is_empty()) {
            Some(raw) => match parse_base_url(&raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!(error = %err, "ignoring malformed backend URL");
                    None
                }
            },
            None => None,
        };
        let anon_key = lookup(BACKEND_ANON_KEY_VAR).filter(|value| !value.trim().is_empty());

        let config = Self { url, anon_key };
        if let Err(problems) = config.validate() {
            for problem in problems {
                warn!("{problem}; backend calls will fail");
            }
        }
        config
    }

    /// Values baked in at build time, which is how the browser bundle
    /// receives them.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            BACKEND_URL_VAR => option_env!("STOREFRONT_BACKEND_URL").map(str::to_string),
            BACKEND_ANON_KEY_VAR => option_env!("STOREFRONT_BACKEND_ANON_KEY").map(str::to_string),
            _ => None,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// List every missing value.
    ///
    /// # Errors
    /// Returns one message per missing setting.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.url.is_none() {
            errors.push(format!("{BACKEND_URL_VAR} is not set"));
        }
        if self.anon_key.is_none() {
            errors.push(format!("{BACKEND_ANON_KEY_VAR} is not set"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The API key, or [`ConfigError::Missing`].
    ///
    /// # Errors
    /// Fails when no key was configured.
    pub fn require_anon_key(&self) -> Result<&str, ConfigError> {
        self.anon_key
            .as_deref()
            .ok_or(ConfigError::Missing(BACKEND_ANON_KEY_VAR))
    }

    /// Absolute URL for a backend path such as `auth/v1/user`.
    ///
    /// # Errors
    /// Fails when no base URL was configured or the path does not join.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let base = self
            .url
            .as_ref()
            .ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;
        base.join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidUrl {
                value: path.to_string(),
                source,
            })
    }
}

/// Parse a base URL and make sure it ends in `/` so relative joins keep
/// any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_values_still_construct() {
        let config = BackendConfig::from_lookup(lookup_from(&[]));
        assert!(!config.is_configured());
        let problems = config.validate().unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains(BACKEND_URL_VAR));
        assert!(matches!(
            config.endpoint("auth/v1/user"),
            Err(ConfigError::Missing(BACKEND_URL_VAR))
        ));
        assert!(config.require_anon_key().is_err());
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "   "),
            (BACKEND_ANON_KEY_VAR, ""),
        ]));
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    fn test_malformed_url_is_dropped() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "not a url"),
            (BACKEND_ANON_KEY_VAR, "anon"),
        ]));
        assert!(config.url.is_none());
        assert_eq!(config.anon_key.as_deref(), Some("anon"));
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let config = BackendConfig::new("https://proxy.example/backend", "anon").unwrap();
        let url = config.endpoint("/auth/v1/token?grant_type=password").unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example/backend/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_configured_from_lookup() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "https://abc.backend.example"),
            (BACKEND_ANON_KEY_VAR, "public-key"),
        ]));
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
        assert_eq!(config.require_anon_key().unwrap(), "public-key");
        assert_eq!(
            config.endpoint("rest/v1/products").unwrap().as_str(),
            "https://abc.backend.example/rest/v1/products"
        );
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(matches!(
            BackendConfig::new("::nope", "k"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
