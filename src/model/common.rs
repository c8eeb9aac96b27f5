use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payment instrument summary the gateway attaches to a charge.
///
/// Card charges fill the card fields; bank transfers fill the `sender_*`
/// and `receiver_*` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub reusable: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub signature: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_bank_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_bank_account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_bank: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(
        default,
        deserialize_with = "opt_id_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_action: Option<String>,
}

/// Reads an explicit `null` as the type's default, the same as a missing key.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Gateway ids arrive as JSON numbers on some payloads and strings on others.
/// Both forms land in a `String`.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Like [`id_string`] but tolerates `null` and missing values.
pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(
        Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(default, deserialize_with = "opt_id_string")]
        other: Option<String>,
    }

    #[test]
    fn test_id_from_number() {
        let v: WithId = serde_json::from_value(json!({"id": 302961})).unwrap();
        assert_eq!(v.id, "302961");
        assert!(v.other.is_none());
    }

    #[test]
    fn test_id_from_string() {
        let v: WithId = serde_json::from_value(json!({"id": "TRF_1", "other": 7})).unwrap();
        assert_eq!(v.id, "TRF_1");
        assert_eq!(v.other.as_deref(), Some("7"));
    }

    #[test]
    fn test_optional_id_null() {
        let v: WithId = serde_json::from_value(json!({"id": 1, "other": null})).unwrap();
        assert!(v.other.is_none());
    }

    #[test]
    fn test_authorization_null_reusable() {
        let auth: Authorization =
            serde_json::from_value(json!({"reusable": null, "signature": null, "bank": null}))
                .unwrap();
        assert!(!auth.reusable);
        assert!(auth.bank.is_none());
    }

    #[test]
    fn test_null_default_keeps_real_values() {
        let auth: Authorization = serde_json::from_value(json!({"reusable": true})).unwrap();
        assert!(auth.reusable);
        assert!(serde_json::from_value::<Authorization>(json!({"reusable": "yes"})).is_err());
    }

    #[test]
    fn test_id_rejects_bool() {
        assert!(serde_json::from_value::<WithId>(json!({"id": true})).is_err());
    }
}
