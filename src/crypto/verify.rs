use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::PaystackError;

type HmacSha512 = Hmac<Sha512>;

/// Hex-encoded HMAC-SHA512 of `body`, keyed with the secret key.
///
/// This is what the gateway puts in the `x-paystack-signature` header.
pub fn compute_signature(secret_key: &str, body: &[u8]) -> Result<String, PaystackError> {
    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .map_err(|e| PaystackError::SignatureError(format!("create hmac: {e}")))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a webhook `x-paystack-signature` header against the raw body.
///
/// - `secret_key`: the integration's secret key
/// - `body`: request body exactly as received
/// - `signature_hex`: header value (hex-encoded)
///
/// Returns `Ok(false)` on mismatch and `Err` when the header is not valid hex.
/// The comparison is constant-time.
pub fn verify_signature(
    secret_key: &str,
    body: &[u8],
    signature_hex: &str,
) -> Result<bool, PaystackError> {
    let expected = hex::decode(signature_hex.trim())
        .map_err(|e| PaystackError::SignatureError(format!("hex decode: {e}")))?;

    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .map_err(|e| PaystackError::SignatureError(format!("create hmac: {e}")))?;
    mac.update(body);

    Ok(mac.verify_slice(&expected).is_ok())
}
