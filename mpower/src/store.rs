//! Merchant store profile embedded into transaction payloads.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::operation::Payload;

/// Public identity of the merchant, attached to checkout payloads.
///
/// All fields are free-form descriptive strings shown to the payer on the
/// gateway's checkout pages; none are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Store display name.
    pub name: Option<String>,
    /// Short slogan shown under the name.
    pub tagline: Option<String>,
    /// Postal address.
    pub postal_address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Public website URL.
    pub website_url: Option<String>,
}

impl Store {
    /// Creates a store profile with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the tagline.
    #[must_use]
    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_postal_address(mut self, postal_address: impl Into<String>) -> Self {
        self.postal_address = Some(postal_address.into());
        self
    }

    /// Sets the contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the public website URL.
    #[must_use]
    pub fn with_website_url(mut self, website_url: impl Into<String>) -> Self {
        self.website_url = Some(website_url.into());
        self
    }

    /// Returns the store attributes as a JSON mapping for payload embedding.
    ///
    /// Absent attributes are kept as `null` so the gateway always sees the
    /// same shape.
    #[must_use]
    pub fn info(&self) -> Payload {
        let mut info = Payload::new();
        for (key, value) in [
            ("name", &self.name),
            ("tagline", &self.tagline),
            ("postal_address", &self.postal_address),
            ("phone", &self.phone),
            ("website_url", &self.website_url),
        ] {
            info.insert(key.to_owned(), json!(value));
        }
        info
    }
}
