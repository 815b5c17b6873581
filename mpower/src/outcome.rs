//! Gateway responses and the tagged transaction outcome.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decoded JSON body of a 200 gateway reply.
///
/// The gateway reports its own status in `response_code` (zero means the
/// operation was accepted) alongside a human-readable `response_text`.
/// Everything else — checkout tokens, invoice URLs, transaction ids — is
/// kept verbatim in [`fields`](Self::fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Gateway status code; zero on acceptance.
    #[serde(deserialize_with = "deserialize_response_code")]
    pub response_code: i64,

    /// Human-readable status message; present on rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,

    /// Remaining response fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GatewayResponse {
    /// Returns `true` when the gateway accepted the operation.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        self.response_code == 0
    }

    /// Looks up an extra response field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// The gateway emits `response_code` as either a JSON number or a
/// string-encoded integer (`"00"` in places); both map to the same integer.
fn deserialize_response_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom("response_code is not an integer")),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("response_code `{text}` is not an integer"))),
        other => Err(D::Error::custom(format!(
            "response_code must be an integer, got {other}"
        ))),
    }
}

/// Transport-level rejection: the gateway answered with a non-200 status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// HTTP status code of the reply.
    pub status: u16,
    /// Raw response body, kept for diagnostics.
    pub body: String,
}

/// Classified result of one transaction attempt.
///
/// Callers must branch on the variant; there is deliberately no boolean
/// view of a transaction result.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOutcome {
    /// HTTP 200 with `response_code == 0`; carries the full decoded body.
    Success(GatewayResponse),
    /// HTTP 200 with a non-zero `response_code`; carries the gateway's
    /// `response_text`.
    Failure(String),
    /// Non-200 HTTP status; the gateway never evaluated the operation.
    TransportFailure(TransportFailure),
}

impl TransactionOutcome {
    /// Classifies a decoded 200 body by its `response_code`.
    ///
    /// A rejection without `response_text` degrades to an empty reason
    /// rather than a decode failure.
    #[must_use]
    pub fn from_response(response: GatewayResponse) -> Self {
        if response.accepted() {
            Self::Success(response)
        } else {
            Self::Failure(response.response_text.unwrap_or_default())
        }
    }

    /// Returns `true` for [`TransactionOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Consumes the outcome, returning the gateway response on success.
    #[must_use]
    pub fn into_success(self) -> Option<GatewayResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failure(_) | Self::TransportFailure(_) => None,
        }
    }
}
