//! Client configuration.
//!
//! # Design
//! Everything the router and transport need is read once, at
//! construction, into an immutable `ClientConfig`; nothing consults the
//! environment afterwards. The timeout, the TLS-verification flag and the
//! content type are fixed per client and apply uniformly to every
//! request. The Basic auth header is precomputed so `headers()` is just
//! assembly.

use std::time::Duration;

use base64::Engine as _;

use crate::error::ConfigError;

/// Environment variable holding the target host, e.g.
/// `quarry.example.com` or `http://127.0.0.1:3000`.
pub const ENV_HOST: &str = "QUARRY_HOST";

/// Environment variable holding the credential string, `username:password`.
pub const ENV_AUTH: &str = "QUARRY_AUTH";

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed content type for request payloads.
pub const CONTENT_TYPE: &str = "application/json";

/// Basic-auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses a `username:password` string. The first colon splits; the
    /// password may itself contain colons.
    pub fn parse(auth: &str) -> Result<Self, ConfigError> {
        match auth.split_once(':') {
            Some((username, password)) if !username.is_empty() => {
                Ok(Self::new(username, password))
            }
            _ => Err(ConfigError::MalformedAuth),
        }
    }

    fn basic_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

/// Immutable per-client configuration: target host, the base URL derived
/// from it, and the fixed header bundle sent with every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    host: String,
    base_url: String,
    credentials: Credentials,
    auth_header: String,
    timeout: Duration,
    verify_tls: bool,
}

impl ClientConfig {
    /// Builds a config for `host`. A bare host gets an `https://` scheme;
    /// an explicit `http://` or `https://` prefix is kept. The API root
    /// `/api` is appended after trailing slashes are trimmed.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        let host = host.into();
        let base_url = derive_base_url(&host);
        let auth_header = credentials.basic_header();
        Self {
            host,
            base_url,
            credentials,
            auth_header,
            timeout: REQUEST_TIMEOUT,
            verify_tls: false,
        }
    }

    /// Reads `QUARRY_HOST` and `QUARRY_AUTH` once and builds a config.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = require_env(ENV_HOST)?;
        let auth = require_env(ENV_AUTH)?;
        let credentials = Credentials::parse(&auth)?;
        Ok(Self::new(host, credentials))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// TLS certificate verification is disabled for this product's
    /// self-signed deployments.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// The fixed header bundle attached to every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("authorization".to_string(), self.auth_header.clone()),
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
        ]
    }
}

fn require_env(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { var }),
    }
}

fn derive_base_url(host: &str) -> String {
    let qualified = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    format!("{}/api", qualified.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("admin", "changeme")
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        let config = ClientConfig::new("quarry.example.com", credentials());
        assert_eq!(config.base_url(), "https://quarry.example.com/api");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let config = ClientConfig::new("http://127.0.0.1:3000", credentials());
        assert_eq!(config.base_url(), "http://127.0.0.1:3000/api");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://quarry.example.com/", credentials());
        assert_eq!(config.base_url(), "https://quarry.example.com/api");
    }

    #[test]
    fn header_bundle_holds_basic_auth_and_content_type() {
        let config = ClientConfig::new("quarry.example.com", credentials());
        let headers = config.headers();
        assert_eq!(
            headers,
            vec![
                (
                    "authorization".to_string(),
                    "Basic YWRtaW46Y2hhbmdlbWU=".to_string()
                ),
                ("content-type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn fixed_values_apply() {
        let config = ClientConfig::new("quarry.example.com", credentials());
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(!config.verify_tls());
    }

    #[test]
    fn credentials_parse_splits_on_first_colon() {
        let creds = Credentials::parse("admin:cha:nge:me").unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "cha:nge:me");
    }

    #[test]
    fn credentials_parse_rejects_malformed_input() {
        assert_eq!(
            Credentials::parse("admin").unwrap_err(),
            crate::error::ConfigError::MalformedAuth
        );
        assert_eq!(
            Credentials::parse(":secret").unwrap_err(),
            crate::error::ConfigError::MalformedAuth
        );
    }

    #[test]
    fn from_env_reads_host_and_auth_once() {
        // Sequential on purpose: both cases touch the same variables.
        std::env::set_var(ENV_HOST, "quarry.example.com");
        std::env::set_var(ENV_AUTH, "admin:changeme");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.host(), "quarry.example.com");
        assert_eq!(config.credentials(), &credentials());

        std::env::remove_var(ENV_HOST);
        let err = ClientConfig::from_env().unwrap_err();
        assert_eq!(err, crate::error::ConfigError::MissingEnv { var: ENV_HOST });
        std::env::remove_var(ENV_AUTH);
    }
}
