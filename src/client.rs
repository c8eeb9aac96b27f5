use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::PaystackError;
use crate::executor::{HttpExecutor, RequestExecutor};

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub struct PaystackClient {
    pub(crate) secret_key: String,
    executor: Arc<dyn RequestExecutor>,
}

impl PaystackClient {
    /// Create a client that talks to the gateway over HTTP.
    pub fn new(config: ClientConfig) -> Result<Self, PaystackError> {
        let executor = HttpExecutor::new(&config)?;
        Ok(Self {
            secret_key: config.secret_key,
            executor: Arc::new(executor),
        })
    }

    /// Create a client on top of a custom transport.
    ///
    /// `secret_key` is still needed to verify webhook signatures.
    pub fn with_executor(
        secret_key: impl Into<String>,
        executor: Arc<dyn RequestExecutor>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            executor,
        }
    }

    /// Send a POST with a JSON body and deserialize the response data.
    pub(crate) async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, PaystackError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let data = self.executor.execute(Method::POST, path, Some(body)).await?;
        serde_json::from_value(data).map_err(PaystackError::from)
    }

    /// Send a bodiless GET and deserialize the response data.
    pub(crate) async fn get<Resp>(&self, path: &str) -> Result<Resp, PaystackError>
    where
        Resp: DeserializeOwned,
    {
        let data = self.executor.execute(Method::GET, path, None).await?;
        serde_json::from_value(data).map_err(PaystackError::from)
    }
}

/// Percent-encode a string so it is safe to use in a URL path segment.
pub(crate) fn encode_path_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment_plain() {
        assert_eq!(encode_path_segment("ref42"), "ref42");
    }

    #[test]
    fn test_encode_path_segment_special_chars() {
        let encoded = encode_path_segment("a/b?c");
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('?'));
        assert!(encoded.contains("%2F"));
        assert!(encoded.contains("%3F"));
    }

    #[test]
    fn test_encode_path_segment_keeps_unreserved() {
        assert_eq!(encode_path_segment("ref_1-a.b~c"), "ref_1-a.b~c");
    }

    #[test]
    fn test_encode_path_segment_spaces() {
        assert_eq!(encode_path_segment("ref 1"), "ref%201");
    }

    #[test]
    fn test_encode_path_segment_empty() {
        assert_eq!(encode_path_segment(""), "");
    }

    #[test]
    fn test_new_with_http_executor() {
        let config = ClientConfig::builder().secret_key("sk_test_xxx").build().unwrap();
        let client = PaystackClient::new(config).unwrap();
        assert_eq!(client.secret_key, "sk_test_xxx");
    }
}
