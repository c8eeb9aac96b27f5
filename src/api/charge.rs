use serde_json::Value;
use tracing::debug;

use crate::client::{PaystackClient, encode_path_segment};
use crate::error::PaystackError;
use crate::model::charge::{ChargeContinuation, ChargeRequest, ChargeResult, ChargeStatus, Factor};

impl PaystackClient {
    /// Start a charge with card, bank or authorization code details.
    ///
    /// POST /charge
    ///
    /// The returned status may ask for another factor or report the charge as
    /// pending. That is not an error: branch on `ChargeResult::next_step`.
    pub async fn charge(&self, req: &ChargeRequest) -> Result<ChargeResult, PaystackError> {
        let result: ChargeResult = self.post("/charge", req).await?;
        debug!(status = %result.status, reference = %result.reference, "charge initiated");
        result.ensure_continuable()
    }

    /// Tokenize a payment instrument before charging it.
    ///
    /// POST /charge/tokenize
    pub async fn tokenize(&self, req: &ChargeRequest) -> Result<Value, PaystackError> {
        self.post("/charge/tokenize", req).await
    }

    /// POST /charge/submit_pin
    pub async fn submit_pin(&self, pin: &str, reference: &str) -> Result<ChargeResult, PaystackError> {
        self.submit_continuation(&ChargeContinuation::new(Factor::Pin, pin, reference))
            .await
    }

    /// POST /charge/submit_otp
    pub async fn submit_otp(&self, otp: &str, reference: &str) -> Result<ChargeResult, PaystackError> {
        self.submit_continuation(&ChargeContinuation::new(Factor::Otp, otp, reference))
            .await
    }

    /// POST /charge/submit_phone
    pub async fn submit_phone(
        &self,
        phone: &str,
        reference: &str,
    ) -> Result<ChargeResult, PaystackError> {
        self.submit_continuation(&ChargeContinuation::new(Factor::Phone, phone, reference))
            .await
    }

    /// POST /charge/submit_birthday
    ///
    /// `birthday` is `YYYY-MM-DD`.
    pub async fn submit_birthday(
        &self,
        birthday: &str,
        reference: &str,
    ) -> Result<ChargeResult, PaystackError> {
        self.submit_continuation(&ChargeContinuation::new(Factor::Birthday, birthday, reference))
            .await
    }

    /// Submit one factor to the endpoint matching its kind.
    ///
    /// The gateway may chain factor requests, so the result can ask for yet
    /// another factor on the same reference.
    pub async fn submit_continuation(
        &self,
        continuation: &ChargeContinuation,
    ) -> Result<ChargeResult, PaystackError> {
        let result: ChargeResult = self.post(continuation.factor.path(), continuation).await?;
        debug!(
            factor = %continuation.factor,
            status = %result.status,
            reference = %continuation.reference,
            "charge continued"
        );
        result.ensure_continuable()
    }

    /// Check the status of a pending charge.
    ///
    /// GET /charge/{reference}
    ///
    /// Read-only on the gateway side. Wait at least
    /// [`PENDING_POLL_INTERVAL`](crate::model::charge::PENDING_POLL_INTERVAL)
    /// between calls, or most polls will come back pending again.
    ///
    /// A blank reference fails with `MissingReference` before any request is
    /// sent, since `GET /charge/` is not a charge lookup.
    pub async fn check_pending(&self, reference: &str) -> Result<ChargeResult, PaystackError> {
        if reference.trim().is_empty() {
            return Err(PaystackError::MissingReference {
                status: ChargeStatus::Pending.to_string(),
            });
        }
        let path = format!("/charge/{}", encode_path_segment(reference));
        let result: ChargeResult = self.get(&path).await?;
        debug!(status = %result.status, reference, "pending charge checked");
        result.ensure_continuable()
    }
}
