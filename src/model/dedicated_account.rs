use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Customer, id_string, null_default, opt_id_string};

#[derive(Debug, Clone, Default, Serialize)]
pub struct DedicatedAccountRequest {
    /// Customer code or id the account is assigned to.
    pub customer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_code: Option<String>,
}

impl DedicatedAccountRequest {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            ..Default::default()
        }
    }

    pub fn preferred_bank(mut self, bank: impl Into<String>) -> Self {
        self.preferred_bank = Some(bank.into());
        self
    }

    /// Settle payments into this subaccount.
    pub fn subaccount(mut self, code: impl Into<String>) -> Self {
        self.subaccount = Some(code.into());
        self
    }

    pub fn split_code(mut self, code: impl Into<String>) -> Self {
        self.split_code = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DedicatedAccount {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub bank: DedicatedBank,
    pub account_name: String,
    pub account_number: String,
    #[serde(default, deserialize_with = "null_default")]
    pub assigned: bool,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignment: Option<Assignment>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DedicatedBank {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub integration: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub assignee_type: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub expired: bool,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired_at: Value,
}
