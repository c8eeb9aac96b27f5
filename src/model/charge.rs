use std::fmt;
use std::time::Duration;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::common::{Authorization, Customer, null_default};
use crate::error::PaystackError;

/// Advised minimum wait between two `check_pending` calls for the same charge.
pub const PENDING_POLL_INTERVAL: Duration = Duration::from_secs(30);

// ---- Request ----

#[derive(Debug, Clone, Default, Serialize)]
pub struct Card {
    #[serde(rename = "card_number")]
    pub number: String,
    #[serde(rename = "card_cvc")]
    pub cvv: String,
    pub expiry_month: String,
    pub expiry_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        cvv: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            cvv: cvv.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BankAccount {
    pub code: String,
    pub account_number: String,
}

/// Payload for `POST /charge`.
///
/// Exactly one of `card`, `bank` or `authorization_code` should name the
/// instrument. The gateway enforces that, not this type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChargeRequest {
    pub email: String,
    /// Amount in the currency's minor unit (kobo, pesewas, cents).
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ChargeRequest {
    pub fn new(email: impl Into<String>, amount: u64) -> Self {
        Self {
            email: email.into(),
            amount,
            ..Default::default()
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_bank(mut self, code: impl Into<String>, account_number: impl Into<String>) -> Self {
        self.bank = Some(BankAccount {
            code: code.into(),
            account_number: account_number.into(),
        });
        self
    }

    pub fn with_authorization_code(mut self, code: impl Into<String>) -> Self {
        self.authorization_code = Some(code.into());
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = Some(birthday.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Attach a fresh random reference so a resubmitted request is not charged twice.
    pub fn with_generated_reference(self) -> Self {
        let reference = uuid::Uuid::new_v4().simple().to_string();
        self.with_reference(reference)
    }
}

// ---- Status & transitions ----

/// Authentication factor the gateway may ask for mid-charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Pin,
    Otp,
    Phone,
    Birthday,
}

impl Factor {
    /// Body key the factor value is sent under.
    pub fn field(self) -> &'static str {
        match self {
            Factor::Pin => "pin",
            Factor::Otp => "otp",
            Factor::Phone => "phone",
            Factor::Birthday => "birthday",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Factor::Pin => "/charge/submit_pin",
            Factor::Otp => "/charge/submit_otp",
            Factor::Phone => "/charge/submit_phone",
            Factor::Birthday => "/charge/submit_birthday",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeStatus {
    Success,
    Failed,
    Pending,
    SendPin,
    SendOtp,
    SendPhone,
    SendBirthday,
    /// Any status this client does not model, kept verbatim.
    Other(String),
}

/// What the caller has to do after seeing a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Terminal: nothing more to submit.
    Done,
    SubmitFactor(Factor),
    /// Wait at least [`PENDING_POLL_INTERVAL`], then `check_pending`.
    CheckPending,
    /// Status not modelled here; inspect `gateway_response`/`display_text`.
    Unknown,
}

impl ChargeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChargeStatus::Success => "success",
            ChargeStatus::Failed => "failed",
            ChargeStatus::Pending => "pending",
            ChargeStatus::SendPin => "send_pin",
            ChargeStatus::SendOtp => "send_otp",
            ChargeStatus::SendPhone => "send_phone",
            ChargeStatus::SendBirthday => "send_birthday",
            ChargeStatus::Other(s) => s,
        }
    }

    pub fn next_step(&self) -> NextStep {
        match self {
            ChargeStatus::Success | ChargeStatus::Failed => NextStep::Done,
            ChargeStatus::Pending => NextStep::CheckPending,
            ChargeStatus::SendPin => NextStep::SubmitFactor(Factor::Pin),
            ChargeStatus::SendOtp => NextStep::SubmitFactor(Factor::Otp),
            ChargeStatus::SendPhone => NextStep::SubmitFactor(Factor::Phone),
            ChargeStatus::SendBirthday => NextStep::SubmitFactor(Factor::Birthday),
            ChargeStatus::Other(_) => NextStep::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_step() == NextStep::Done
    }

    /// The factor this status is waiting for, if any.
    pub fn awaited_factor(&self) -> Option<Factor> {
        match self.next_step() {
            NextStep::SubmitFactor(factor) => Some(factor),
            _ => None,
        }
    }

    /// Whether the charge can only move forward by quoting its reference.
    pub fn is_continuable(&self) -> bool {
        matches!(
            self.next_step(),
            NextStep::SubmitFactor(_) | NextStep::CheckPending
        )
    }
}

impl From<String> for ChargeStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => ChargeStatus::Success,
            "failed" => ChargeStatus::Failed,
            "pending" => ChargeStatus::Pending,
            "send_pin" => ChargeStatus::SendPin,
            "send_otp" => ChargeStatus::SendOtp,
            "send_phone" => ChargeStatus::SendPhone,
            "send_birthday" => ChargeStatus::SendBirthday,
            _ => ChargeStatus::Other(s),
        }
    }
}

impl From<&str> for ChargeStatus {
    fn from(s: &str) -> Self {
        ChargeStatus::from(s.to_string())
    }
}

impl From<ChargeStatus> for String {
    fn from(status: ChargeStatus) -> Self {
        match status {
            ChargeStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---- Result ----

/// Gateway response to any step of a charge.
///
/// Only `status` and `reference` drive the flow. Everything else is
/// informational, and fields this type does not name are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeResult {
    pub status: ChargeStatus,
    #[serde(default, deserialize_with = "null_default")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub transaction_date: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ussd_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_response: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub message: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub log: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub plan: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChargeResult {
    pub fn next_step(&self) -> NextStep {
        self.status.next_step()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Reference to poll with, only while the charge is pending.
    pub fn pending_poll(&self) -> Option<&str> {
        (self.status == ChargeStatus::Pending).then_some(self.reference.as_str())
    }

    /// Build the continuation this result asks for.
    pub fn continue_with(
        &self,
        factor: Factor,
        value: impl Into<String>,
    ) -> Result<ChargeContinuation, PaystackError> {
        ChargeContinuation::for_result(self, factor, value)
    }

    /// A result that must be continued has to carry a reference.
    pub(crate) fn ensure_continuable(self) -> Result<Self, PaystackError> {
        if self.status.is_continuable() && self.reference.trim().is_empty() {
            return Err(PaystackError::MissingReference {
                status: self.status.to_string(),
            });
        }
        Ok(self)
    }
}

// ---- Continuation ----

/// One extra factor submitted against an in-flight charge.
///
/// Serializes to the two-field wire body, e.g. `{"otp":"000000","reference":"ref_42"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeContinuation {
    pub factor: Factor,
    pub value: String,
    pub reference: String,
}

impl ChargeContinuation {
    /// Build a continuation without checking it against a prior result.
    pub fn new(factor: Factor, value: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            factor,
            value: value.into(),
            reference: reference.into(),
        }
    }

    /// Build a continuation for `result`, refusing factors it is not waiting for.
    pub fn for_result(
        result: &ChargeResult,
        factor: Factor,
        value: impl Into<String>,
    ) -> Result<Self, PaystackError> {
        if result.status.awaited_factor() != Some(factor) {
            return Err(PaystackError::InvalidTransition {
                status: result.status.to_string(),
                attempted: format!("submit_{factor}"),
            });
        }
        if result.reference.trim().is_empty() {
            return Err(PaystackError::MissingReference {
                status: result.status.to_string(),
            });
        }
        Ok(Self::new(factor, value, result.reference.clone()))
    }
}

impl Serialize for ChargeContinuation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.factor.field(), &self.value)?;
        map.serialize_entry("reference", &self.reference)?;
        map.end()
    }
}
