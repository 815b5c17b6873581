//! The seam between payment product types and the transaction client.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// JSON payload sent to the gateway: a mapping of field names to values.
///
/// Built fresh for every transaction attempt. An empty payload makes the
/// transaction a GET against its resource; a non-empty one a POST.
pub type Payload = Map<String, Value>;

/// A gateway operation: a resource path plus the payload shape it expects.
///
/// Every payment product implements this trait, and the transaction client
/// funnels all of them through the same validate → payload → process path.
/// Implementations never perform HTTP or JSON I/O themselves.
pub trait Operation {
    /// Gateway endpoint segment for this operation, e.g.
    /// `checkout-invoice/create`.
    fn resource(&self) -> String;

    /// Checks that all mandatory fields are present.
    ///
    /// Runs before any payload is built or any request is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first missing or
    /// unusable field.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Serializes the operation into the payload shape the gateway expects.
    ///
    /// Called after [`validate`](Self::validate) has passed.
    fn payload(&self) -> Payload;
}
