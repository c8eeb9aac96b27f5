use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::value::RawValue;

use super::charge::ChargeStatus;
use super::common::{Authorization, Customer, id_string, null_default, opt_id_string};
use crate::error::PaystackError;

/// Raw webhook body: `{"event": "...", "data": {...}}`.
///
/// `data` is kept as undecoded JSON text. Each `as_*` method decodes a
/// fresh copy, so a failed attempt leaves the envelope usable for another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    pub data: Box<RawValue>,
}

impl WebhookEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, PaystackError> {
        serde_json::from_slice(body).map_err(|source| PaystackError::Decode {
            target: "WebhookEnvelope",
            source,
        })
    }

    /// Event name classified as a hint. It does not restrict which decode is allowed.
    pub fn kind(&self) -> WebhookEvent {
        WebhookEvent::from(self.event.as_str())
    }

    /// The payload exactly as received.
    pub fn raw_data(&self) -> &str {
        self.data.get()
    }

    pub fn as_customer_identification(&self) -> Result<CustomerIdentification, PaystackError> {
        self.decode("CustomerIdentification")
    }

    pub fn as_charge_notification(&self) -> Result<ChargeNotification, PaystackError> {
        self.decode("ChargeNotification")
    }

    pub fn as_transfer_notification(&self) -> Result<TransferNotification, PaystackError> {
        self.decode("TransferNotification")
    }

    fn decode<T: DeserializeOwned>(&self, target: &'static str) -> Result<T, PaystackError> {
        serde_json::from_str(self.data.get())
            .map_err(|source| PaystackError::Decode { target, source })
    }
}

impl FromStr for WebhookEnvelope {
    type Err = PaystackError;

    fn from_str(body: &str) -> Result<Self, Self::Err> {
        Self::from_slice(body.as_bytes())
    }
}

/// Event names the gateway is known to send.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    ChargeSuccess,
    TransferSuccess,
    TransferFailed,
    TransferReversed,
    CustomerIdentificationSuccess,
    CustomerIdentificationFailed,
    Other(String),
}

impl WebhookEvent {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEvent::ChargeSuccess => "charge.success",
            WebhookEvent::TransferSuccess => "transfer.success",
            WebhookEvent::TransferFailed => "transfer.failed",
            WebhookEvent::TransferReversed => "transfer.reversed",
            WebhookEvent::CustomerIdentificationSuccess => "customeridentification.success",
            WebhookEvent::CustomerIdentificationFailed => "customeridentification.failed",
            WebhookEvent::Other(s) => s,
        }
    }

    pub fn is_charge(&self) -> bool {
        self.as_str().starts_with("charge.")
    }

    pub fn is_transfer(&self) -> bool {
        self.as_str().starts_with("transfer.")
    }

    pub fn is_customer_identification(&self) -> bool {
        self.as_str().starts_with("customeridentification.")
    }
}

impl From<&str> for WebhookEvent {
    fn from(s: &str) -> Self {
        match s {
            "charge.success" => WebhookEvent::ChargeSuccess,
            "transfer.success" => WebhookEvent::TransferSuccess,
            "transfer.failed" => WebhookEvent::TransferFailed,
            "transfer.reversed" => WebhookEvent::TransferReversed,
            "customeridentification.success" => WebhookEvent::CustomerIdentificationSuccess,
            "customeridentification.failed" => WebhookEvent::CustomerIdentificationFailed,
            other => WebhookEvent::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---- Customer identification ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerIdentification {
    #[serde(deserialize_with = "id_string")]
    pub customer_id: String,
    pub customer_code: String,
    pub email: String,
    pub identification: Identification,
    /// Present on `customeridentification.failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

// ---- Charge ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeNotification {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub status: ChargeStatus,
    pub reference: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub message: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<ChargeLog>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub fees: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub plan: Value,
}

impl ChargeNotification {
    /// Typed view of `metadata`. `None` when the gateway sent no metadata object.
    pub fn typed_metadata(&self) -> Result<Option<ChargeMetadata>, PaystackError> {
        match &self.metadata {
            Value::Object(_) => serde_json::from_value(self.metadata.clone())
                .map(Some)
                .map_err(|source| PaystackError::Decode {
                    target: "ChargeMetadata",
                    source,
                }),
            _ => Ok(None),
        }
    }
}

/// Customer's authentication journey through the checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeLog {
    #[serde(default, deserialize_with = "null_default")]
    pub time_spent: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub attempts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub errors: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub mobile: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub input: Vec<Value>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub channel: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub history: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_bank: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub custom_fields: Vec<CustomField>,
    #[serde(default, deserialize_with = "null_default")]
    pub scheduled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    #[serde(default)]
    pub value: Value,
}

// ---- Transfer ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferNotification {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub status: String,
    pub reference: String,
    pub amount: u64,
    pub transfer_code: String,
    pub recipient: TransferRecipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub failures: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub source_details: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub titan_code: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferred_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<TransferSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecipient {
    pub recipient_code: String,
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub email: Value,
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub details: RecipientDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipientDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub account_name: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferSession {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub provider: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
}
