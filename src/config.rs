use std::time::Duration;

use crate::error::PaystackError;

const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

pub struct ClientConfig {
    pub secret_key: String,
    pub base_url: String,
    pub http_client: Option<reqwest::Client>,
    pub timeout: Option<Duration>,
}

pub struct ClientConfigBuilder {
    secret_key: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            secret_key: None,
            base_url: None,
            http_client: None,
            timeout: None,
        }
    }

    /// Build a config from `PAYSTACK_SECRET_KEY` and the optional `PAYSTACK_BASE_URL`.
    pub fn from_env() -> Result<Self, PaystackError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaystackError> {
        let secret_key = lookup("PAYSTACK_SECRET_KEY").ok_or_else(|| {
            PaystackError::Config("PAYSTACK_SECRET_KEY environment variable is required".into())
        })?;

        let mut builder = Self::builder().secret_key(secret_key);
        if let Some(base_url) = lookup("PAYSTACK_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

impl ClientConfigBuilder {
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured reqwest client. `timeout` is ignored when this is set.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ClientConfig, PaystackError> {
        let secret_key = self
            .secret_key
            .ok_or_else(|| PaystackError::Config("secret_key is required".into()))?;

        if secret_key.trim().is_empty() {
            return Err(PaystackError::Config("secret_key must not be empty".into()));
        }

        let base_url = self
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PaystackError::Config(format!(
                "base_url must be an http(s) URL, got {base_url}"
            )));
        }

        Ok(ClientConfig {
            secret_key,
            base_url,
            http_client: self.http_client,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_requires_secret_key() {
        let err = ClientConfig::from_lookup(lookup_in(&[("PAYSTACK_BASE_URL", "http://localhost")]))
            .err()
            .unwrap();
        assert!(matches!(err, PaystackError::Config(ref m) if m.contains("PAYSTACK_SECRET_KEY")));
    }

    #[test]
    fn test_from_lookup_reads_base_url() {
        let config = ClientConfig::from_lookup(lookup_in(&[
            ("PAYSTACK_SECRET_KEY", "sk_test_env"),
            ("PAYSTACK_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.secret_key, "sk_test_env");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_from_lookup_defaults_base_url() {
        let config =
            ClientConfig::from_lookup(lookup_in(&[("PAYSTACK_SECRET_KEY", "sk_test_env")])).unwrap();
        assert_eq!(config.base_url, "https://api.paystack.co");
    }

    #[test]
    fn test_from_lookup_blank_secret_key() {
        let err = ClientConfig::from_lookup(lookup_in(&[("PAYSTACK_SECRET_KEY", "")]))
            .err()
            .unwrap();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_build_defaults_base_url() {
        let config = ClientConfig::builder().secret_key("sk_test_xxx").build().unwrap();
        assert_eq!(config.base_url, "https://api.paystack.co");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_build_missing_secret_key() {
        let err = ClientConfig::builder().build().err().unwrap();
        assert!(err.to_string().contains("secret_key is required"));
    }

    #[test]
    fn test_build_blank_secret_key() {
        let err = ClientConfig::builder().secret_key("  ").build().err().unwrap();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_build_trims_trailing_slash() {
        let config = ClientConfig::builder()
            .secret_key("sk_test_xxx")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_build_rejects_non_http_base_url() {
        let err = ClientConfig::builder()
            .secret_key("sk_test_xxx")
            .base_url("ftp://example.com")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PaystackError::Config(_)));
    }
}
