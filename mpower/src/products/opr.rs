//! Onsite payment requests.
//!
//! An OPR charges a payer's MPower account without leaving the merchant's
//! site. The flow is two-step: create a request for an account alias, which
//! sends the payer a confirmation token, then charge the request with the
//! gateway token plus that confirmation token.

use serde_json::{Value, json};

use crate::error::ValidationError;
use crate::operation::{Operation, Payload};
use crate::store::Store;

/// First step of the OPR flow: opens a payment request for an account
/// alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opr {
    account_alias: Option<String>,
    total_amount: Option<f64>,
    description: Option<String>,
    store: Option<Store>,
}

impl Opr {
    /// Creates an empty onsite payment request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payer's account alias.
    #[must_use]
    pub fn with_account_alias(mut self, account_alias: impl Into<String>) -> Self {
        self.account_alias = Some(account_alias.into());
        self
    }

    /// Sets the amount to request.
    #[must_use]
    pub const fn with_total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = Some(total_amount);
        self
    }

    /// Sets the description shown to the payer.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a store profile.
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }
}

impl Operation for Opr {
    fn resource(&self) -> String {
        "opr/create".to_owned()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.account_alias.is_none() {
            return Err(ValidationError::MissingField("account_alias"));
        }
        if self.total_amount.is_none() {
            return Err(ValidationError::MissingField("total_amount"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        let store = self.store.clone().unwrap_or_default();

        let mut payload = Payload::new();
        payload.insert(
            "invoice_data".to_owned(),
            json!({
                "invoice": {
                    "total_amount": self.total_amount,
                    "description": self.description,
                },
                "store": Value::Object(store.info()),
            }),
        );
        payload.insert(
            "opr_data".to_owned(),
            json!({ "account_alias": self.account_alias }),
        );
        payload
    }
}

/// Second step of the OPR flow: charges a confirmed payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OprCharge {
    token: String,
    confirm_token: String,
}

impl OprCharge {
    /// Charges the request identified by the gateway `token`, authorized by
    /// the payer's `confirm_token`.
    #[must_use]
    pub fn new(token: impl Into<String>, confirm_token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            confirm_token: confirm_token.into(),
        }
    }
}

impl Operation for OprCharge {
    fn resource(&self) -> String {
        "opr/charge".to_owned()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        if self.confirm_token.is_empty() {
            return Err(ValidationError::MissingField("confirm_token"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("token".to_owned(), json!(self.token));
        payload.insert("confirm_token".to_owned(), json!(self.confirm_token));
        payload
    }
}
