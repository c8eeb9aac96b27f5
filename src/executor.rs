use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiEnvelope, ApiErrorResponse, PaystackError};

/// Carries one request to the gateway and hands back the response `data`.
///
/// Implementations own authentication, transport and the response envelope.
/// They must not retry: every error goes back to the caller as-is.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, PaystackError>;
}

/// Default executor: bearer-authenticated JSON over reqwest.
pub struct HttpExecutor {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl HttpExecutor {
    pub fn new(config: &ClientConfig) -> Result<Self, PaystackError> {
        let http = match (&config.http_client, config.timeout) {
            (Some(client), _) => client.clone(),
            (None, Some(timeout)) => reqwest::Client::builder().timeout(timeout).build()?,
            (None, None) => reqwest::Client::new(),
        };

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, PaystackError> {
        debug!(%method, path, "sending request");

        let mut req = self
            .http
            .request(method, self.endpoint_url(path))
            .bearer_auth(&self.secret_key)
            .header("Accept", "application/json")
            .header("User-Agent", "paystack-rust-sdk/0.1.0");

        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        unwrap_envelope(status, &text)
    }
}

/// Turn a raw gateway response into its `data` payload.
fn unwrap_envelope(status: StatusCode, body: &str) -> Result<Value, PaystackError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| body.to_string());
        warn!(status = status.as_u16(), %message, "gateway rejected request");
        return Err(PaystackError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_str(body)?;
    if !envelope.status {
        warn!(message = %envelope.message, "gateway reported failure");
        return Err(PaystackError::Api {
            status: status.as_u16(),
            message: envelope.message,
        });
    }

    Ok(envelope.data.unwrap_or(Value::Null))
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let body = r#"{"status":true,"message":"Charge attempted","data":{"status":"send_otp","reference":"ref_42"}}"#;
        let data = unwrap_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(data, json!({"status": "send_otp", "reference": "ref_42"}));
    }

    #[test]
    fn test_unwrap_envelope_status_false() {
        let body = r#"{"status":false,"message":"Invalid key"}"#;
        let err = unwrap_envelope(StatusCode::OK, body).unwrap_err();
        match err {
            PaystackError::Api { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Invalid key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unwrap_envelope_http_error_with_json_body() {
        let body = r#"{"status":false,"message":"Charge not found"}"#;
        let err = unwrap_envelope(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(matches!(
            err,
            PaystackError::Api { status: 404, ref message } if message == "Charge not found"
        ));
    }

    #[test]
    fn test_unwrap_envelope_http_error_with_plain_body() {
        let err = unwrap_envelope(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert!(matches!(
            err,
            PaystackError::Api { status: 502, ref message } if message == "upstream down"
        ));
    }

    #[test]
    fn test_unwrap_envelope_missing_data_is_null() {
        let body = r#"{"status":true,"message":"ok"}"#;
        assert_eq!(unwrap_envelope(StatusCode::OK, body).unwrap(), Value::Null);
    }

    #[test]
    fn test_unwrap_envelope_malformed_body() {
        let err = unwrap_envelope(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, PaystackError::Serialize(_)));
    }

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::builder()
            .secret_key("sk_test_xxx")
            .base_url("http://localhost:9000/")
            .build()
            .unwrap();
        let executor = HttpExecutor::new(&config).unwrap();
        assert_eq!(
            executor.endpoint_url("/charge/submit_pin"),
            "http://localhost:9000/charge/submit_pin"
        );
    }

    #[tokio::test]
    async fn test_timeout_applies_to_built_client() {
        // Accepts the connection but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let config = ClientConfig::builder()
            .secret_key("sk_test_xxx")
            .base_url(format!("http://{addr}"))
            .timeout(std::time::Duration::from_millis(200))
            .build()
            .unwrap();
        let executor = HttpExecutor::new(&config).unwrap();

        let err = executor
            .execute(Method::GET, "/charge/ref_42", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaystackError::Http(ref e) if e.is_timeout()));
        drop(listener);
    }

    #[test]
    fn test_supplied_http_client_is_used() {
        let config = ClientConfig::builder()
            .secret_key("sk_test_xxx")
            .http_client(reqwest::Client::new())
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        let executor = HttpExecutor::new(&config).unwrap();
        assert_eq!(
            executor.endpoint_url("/charge"),
            "https://api.paystack.co/charge"
        );
    }
}
