//! Connection settings for the Megaphone API.

use std::fmt;

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "https://cms.megaphone.fm/api";

pub const ENV_TOKEN: &str = "MEGAPHONE_TOKEN";
pub const ENV_NETWORK_ID: &str = "MEGAPHONE_NETWORK_ID";
pub const ENV_API_BASE_URL: &str = "MEGAPHONE_API_BASE_URL";

/// Read-only settings shared by every request a client makes.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url", deserialize_with = "trimmed_url")]
    api_base_url: String,
    network_id: String,
    token: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn trimmed_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let url = String::deserialize(deserializer)?;
    Ok(url.trim_end_matches('/').to_string())
}

impl Config {
    pub fn new(token: impl Into<String>, network_id: impl Into<String>) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            network_id: network_id.into(),
            token: token.into(),
        }
    }

    /// Point the client at another API root, e.g. a local mock server.
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Build a config from `MEGAPHONE_TOKEN`, `MEGAPHONE_NETWORK_ID` and the
    /// optional `MEGAPHONE_API_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        let token = required_var(ENV_TOKEN)?;
        let network_id = required_var(ENV_NETWORK_ID)?;
        let config = Self::new(token, network_id);
        Ok(match std::env::var(ENV_API_BASE_URL) {
            Ok(url) if !url.is_empty() => config.with_api_base_url(&url),
            _ => config,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `{api_base_url}/networks/{network_id}`, the root of every podcast path.
    pub(crate) fn network_url(&self) -> String {
        format!("{}/networks/{}", self.api_base_url, self.network_id)
    }
}

fn required_var(name: &'static str) -> Result<String, ApiError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::Config(name)),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("network_id", &self.network_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_TOKEN);
        std::env::remove_var(ENV_NETWORK_ID);
        std::env::remove_var(ENV_API_BASE_URL);
    }

    #[test]
    fn new_uses_default_base_url() {
        let config = Config::new("secret", "net-1");
        assert_eq!(config.api_base_url(), "https://cms.megaphone.fm/api");
        assert_eq!(config.network_url(), "https://cms.megaphone.fm/api/networks/net-1");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::new("secret", "net-1").with_api_base_url("http://localhost:3000/");
        assert_eq!(config.api_base_url(), "http://localhost:3000");
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("secret", "net-1"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("net-1"));
    }

    #[test]
    fn deserializes_with_default_base_url() {
        let config: Config =
            serde_json::from_str(r#"{"network_id":"net-1","token":"t"}"#).unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);

        let config: Config = serde_json::from_str(
            r#"{"api_base_url":"http://example.test/api/","network_id":"net-1","token":"t"}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url(), "http://example.test/api");
    }

    #[test]
    #[serial]
    fn from_env_reads_all_variables() {
        clear_env();
        std::env::set_var(ENV_TOKEN, "tok");
        std::env::set_var(ENV_NETWORK_ID, "net-9");
        std::env::set_var(ENV_API_BASE_URL, "http://127.0.0.1:9999/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.token(), "tok");
        assert_eq!(config.network_id(), "net-9");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:9999");
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_reports_missing_token() {
        clear_env();
        std::env::set_var(ENV_NETWORK_ID, "net-9");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(ENV_TOKEN)));
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_treats_empty_network_as_missing() {
        clear_env();
        std::env::set_var(ENV_TOKEN, "tok");
        std::env::set_var(ENV_NETWORK_ID, "");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(ENV_NETWORK_ID)));
        clear_env();
    }
}
