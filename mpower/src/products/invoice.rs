//! Checkout invoices: creation and status lookup.
//!
//! Creating an invoice returns a checkout token and URL; the caller
//! redirects the payer there, then looks the invoice up by token to learn
//! whether it was paid.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ValidationError;
use crate::operation::{Operation, Payload};
use crate::store::Store;

/// A line item on a checkout invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Item display name.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: f64,
    /// Line total as shown on the invoice.
    pub total_price: f64,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InvoiceItem {
    /// Creates a line item.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
        total_price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            total_price,
            description: None,
        }
    }

    /// Sets the item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A tax line applied on top of the invoice items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTax {
    /// Tax display name, e.g. `VAT (15%)`.
    pub name: String,
    /// Tax amount.
    pub amount: f64,
}

impl InvoiceTax {
    /// Creates a tax line.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// A checkout invoice to be created on the gateway.
///
/// The gateway charges `total_amount`; line items and taxes are display
/// data and are not summed client-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    items: Vec<InvoiceItem>,
    taxes: Vec<InvoiceTax>,
    total_amount: Option<f64>,
    description: Option<String>,
    store: Option<Store>,
}

impl Invoice {
    /// Creates an empty invoice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line item.
    #[must_use]
    pub fn with_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a tax line.
    #[must_use]
    pub fn with_tax(mut self, tax: InvoiceTax) -> Self {
        self.taxes.push(tax);
        self
    }

    /// Sets the amount the gateway charges.
    #[must_use]
    pub fn with_total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = Some(total_amount);
        self
    }

    /// Sets the invoice description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a store profile shown on the checkout page.
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }
}

impl Operation for Invoice {
    fn resource(&self) -> String {
        "checkout-invoice/create".to_owned()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.total_amount.is_none() {
            return Err(ValidationError::MissingField("total_amount"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        // The gateway schema keys items and taxes as item_N / tax_N objects,
        // not arrays.
        let items: Payload = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (format!("item_{index}"), json!(item)))
            .collect();
        let taxes: Payload = self
            .taxes
            .iter()
            .enumerate()
            .map(|(index, tax)| (format!("tax_{index}"), json!(tax)))
            .collect();
        let store = self.store.clone().unwrap_or_default();

        let mut payload = Payload::new();
        payload.insert(
            "invoice".to_owned(),
            json!({
                "items": items,
                "taxes": taxes,
                "total_amount": self.total_amount,
                "description": self.description,
            }),
        );
        payload.insert("store".to_owned(), Value::Object(store.info()));
        payload
    }
}

/// Status lookup for a previously created invoice.
///
/// Carries an empty payload, which makes the transaction a GET against the
/// confirmation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceStatus {
    token: String,
}

impl InvoiceStatus {
    /// Looks up the invoice identified by the checkout `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Operation for InvoiceStatus {
    fn resource(&self) -> String {
        format!("checkout-invoice/confirm/{}", self.token)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        Ok(())
    }

    fn payload(&self) -> Payload {
        Payload::new()
    }
}
