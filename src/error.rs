use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaystackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Paystack API error: status={status}, message={message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("webhook payload is not a valid {target}: {source}")]
    Decode {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("charge in status `{status}` cannot accept {attempted}")]
    InvalidTransition { status: String, attempted: String },

    #[error("charge in status `{status}` carries no reference to continue with")]
    MissingReference { status: String },

    #[error("Webhook signature error: {0}")]
    SignatureError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Outer `{status, message, data}` wrapper Paystack puts around every response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Error body returned alongside non-2xx HTTP statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub message: String,
}
