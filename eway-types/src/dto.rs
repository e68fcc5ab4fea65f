//! Wire payloads exchanged with the gateway.
//!
//! Field names follow the gateway's PascalCase JSON convention.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Amount, CustomerTitle, RequestMethod};
use crate::response_codes::{ResolvedCode, ResponseCodeTable};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`, `"True"`, `"false"`, `"False"` or `null`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(BoolOrString::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(BoolOrString::String(s)) => Err(serde::de::Error::custom(format!(
            "invalid transaction status: {s}"
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Customer section of an access code request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<CustomerTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One merchant-defined option slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

impl OptionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Payment section of an access code request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    /// Amount in minor units
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_reference: Option<String>,
}

/// Kind of transaction being requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Purchase,
}

/// Request to create an access code for the shared payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessCodeRequest {
    pub customer: Customer,
    /// Always three entries, in option1..option3 order
    pub options: Vec<OptionValue>,
    pub payment: Payment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_view: Option<String>,
    #[serde(rename = "CustomerIP", skip_serializing_if = "Option::is_none")]
    pub customer_ip: Option<String>,
    #[serde(rename = "PartnerID", skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub method: RequestMethod,
    pub transaction_type: TransactionType,
    pub customer_read_only: bool,
    pub verify_customer_phone: bool,
    pub verify_customer_email: bool,
}

/// Request to fetch the outcome of a shared page transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionResultRequest {
    pub access_code: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response to an access code request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessCodeResponse {
    /// Token identifying this transaction in later calls
    pub access_code: String,
    /// Where to send the customer to enter card details
    #[serde(default)]
    pub shared_payment_url: Option<String>,
    #[serde(default, rename = "FormActionURL")]
    pub form_action_url: Option<String>,
    #[serde(default)]
    pub customer: Option<serde_json::Value>,
    #[serde(default)]
    pub payment: Option<Payment>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of a transaction, looked up by access code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionResult {
    #[serde(default)]
    pub access_code: Option<String>,
    #[serde(default)]
    pub authorisation_code: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    /// Comma separated response codes
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_reference: Option<String>,
    /// Amount actually processed, in minor units
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: i64,
    #[serde(default, rename = "TransactionID")]
    pub transaction_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub transaction_status: Option<bool>,
    #[serde(default, rename = "TokenCustomerID")]
    pub token_customer_id: Option<serde_json::Value>,
    #[serde(default)]
    pub beagle_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionValue>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TransactionResult {
    /// True when the gateway reported the transaction as successful.
    pub fn is_approved(&self) -> bool {
        self.transaction_status == Some(true)
    }

    /// Resolves the `ResponseMessage` codes against the response code table.
    pub fn messages(&self) -> Vec<ResolvedCode> {
        self.response_message
            .as_deref()
            .map(|codes| ResponseCodeTable::global().resolve_list(codes))
            .unwrap_or_default()
    }
}
