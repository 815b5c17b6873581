//! Direct account credits and direct card charges.

use serde_json::json;

use crate::error::ValidationError;
use crate::operation::{Operation, Payload};

/// Credits an MPower account directly, by account alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectPay {
    account_alias: Option<String>,
    amount: Option<f64>,
}

impl DirectPay {
    /// Credits `amount` to the account identified by `account_alias`.
    #[must_use]
    pub fn new(account_alias: impl Into<String>, amount: f64) -> Self {
        Self {
            account_alias: Some(account_alias.into()),
            amount: Some(amount),
        }
    }

    /// Sets the receiving account alias.
    #[must_use]
    pub fn with_account_alias(mut self, account_alias: impl Into<String>) -> Self {
        self.account_alias = Some(account_alias.into());
        self
    }

    /// Sets the amount to credit.
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Operation for DirectPay {
    fn resource(&self) -> String {
        "direct-pay/credit-account".to_owned()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.account_alias.is_none() {
            return Err(ValidationError::MissingField("account_alias"));
        }
        if self.amount.is_none() {
            return Err(ValidationError::MissingField("amount"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("account_alias".to_owned(), json!(self.account_alias));
        payload.insert("amount".to_owned(), json!(self.amount));
        payload
    }
}

/// Charges a payment card directly.
///
/// Card data is shaped into the gateway's schema and passed through
/// untouched; the client does not validate card numbers or expiry dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectCard {
    card_name: Option<String>,
    card_number: Option<String>,
    card_cvc: Option<String>,
    expiry_month: Option<u8>,
    expiry_year: Option<u16>,
    amount: Option<f64>,
}

impl DirectCard {
    /// Creates an empty card charge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the card holder name.
    #[must_use]
    pub fn with_card_name(mut self, card_name: impl Into<String>) -> Self {
        self.card_name = Some(card_name.into());
        self
    }

    /// Sets the card number.
    #[must_use]
    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    /// Sets the card verification code.
    #[must_use]
    pub fn with_card_cvc(mut self, card_cvc: impl Into<String>) -> Self {
        self.card_cvc = Some(card_cvc.into());
        self
    }

    /// Sets the card expiry month and year.
    #[must_use]
    pub const fn with_expiry(mut self, month: u8, year: u16) -> Self {
        self.expiry_month = Some(month);
        self.expiry_year = Some(year);
        self
    }

    /// Sets the amount to charge.
    #[must_use]
    pub const fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl Operation for DirectCard {
    fn resource(&self) -> String {
        "direct-card/processcard".to_owned()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.card_name.is_none() {
            return Err(ValidationError::MissingField("card_name"));
        }
        if self.card_number.is_none() {
            return Err(ValidationError::MissingField("card_number"));
        }
        if self.card_cvc.is_none() {
            return Err(ValidationError::MissingField("card_cvc"));
        }
        if self.expiry_month.is_none() {
            return Err(ValidationError::MissingField("expiry_month"));
        }
        if self.expiry_year.is_none() {
            return Err(ValidationError::MissingField("expiry_year"));
        }
        if self.amount.is_none() {
            return Err(ValidationError::MissingField("amount"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("card_name".to_owned(), json!(self.card_name));
        payload.insert("card_number".to_owned(), json!(self.card_number));
        payload.insert("card_cvc".to_owned(), json!(self.card_cvc));
        payload.insert(
            "card_expired_date_month".to_owned(),
            json!(self.expiry_month),
        );
        payload.insert("card_expired_date_year".to_owned(), json!(self.expiry_year));
        payload.insert("amount".to_owned(), json!(self.amount));
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_card() -> DirectCard {
        DirectCard::new()
            .with_card_name("Alice Mensah")
            .with_card_number("4242424242424242")
            .with_card_cvc("123")
            .with_expiry(9, 2027)
            .with_amount(150.0)
    }

    #[test]
    fn direct_pay_requires_alias_and_amount() {
        assert_eq!(
            DirectPay::default().validate(),
            Err(ValidationError::MissingField("account_alias"))
        );
        assert_eq!(
            DirectPay::default().with_account_alias("077XXXX").validate(),
            Err(ValidationError::MissingField("amount"))
        );
        assert!(DirectPay::new("077XXXX", 50.0).validate().is_ok());
    }

    #[test]
    fn direct_pay_payload_shape() {
        let payload = DirectPay::new("077XXXX", 50.0).payload();
        assert_eq!(payload["account_alias"], json!("077XXXX"));
        assert_eq!(payload["amount"], json!(50.0));
    }

    #[test]
    fn card_charge_reports_the_first_missing_field() {
        assert_eq!(
            DirectCard::new().validate(),
            Err(ValidationError::MissingField("card_name"))
        );
        assert_eq!(
            DirectCard::new()
                .with_card_name("Alice Mensah")
                .validate(),
            Err(ValidationError::MissingField("card_number"))
        );
        assert!(full_card().validate().is_ok());
    }

    #[test]
    fn card_payload_uses_the_gateway_field_names() {
        let payload = full_card().payload();
        assert_eq!(payload["card_name"], json!("Alice Mensah"));
        assert_eq!(payload["card_expired_date_month"], json!(9));
        assert_eq!(payload["card_expired_date_year"], json!(2027));
        assert_eq!(payload["amount"], json!(150.0));
    }
}
