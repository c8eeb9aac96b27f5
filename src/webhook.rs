use tracing::{debug, warn};

use crate::client::PaystackClient;
use crate::crypto::verify::verify_signature;
use crate::error::PaystackError;
use crate::model::webhook::WebhookEnvelope;

/// Name of the header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

impl PaystackClient {
    /// Check a webhook body against its `x-paystack-signature` header.
    pub fn verify_webhook_signature(
        &self,
        signature: &str,
        body: &[u8],
    ) -> Result<bool, PaystackError> {
        verify_signature(&self.secret_key, body, signature)
    }

    /// Verify and parse a webhook.
    ///
    /// 1. Verifies the HMAC signature over the raw body
    /// 2. Deserializes the `WebhookEnvelope`, leaving `data` undecoded
    ///
    /// Pick one of the envelope's `as_*` methods afterwards, using
    /// `event` as the hint.
    pub fn parse_webhook(
        &self,
        signature: &str,
        body: &[u8],
    ) -> Result<WebhookEnvelope, PaystackError> {
        if !self.verify_webhook_signature(signature, body)? {
            warn!("webhook signature mismatch");
            return Err(PaystackError::SignatureError(
                "webhook signature verification failed".into(),
            ));
        }

        let envelope = WebhookEnvelope::from_slice(body)?;
        debug!(event = %envelope.event, "parsed webhook");
        Ok(envelope)
    }
}
