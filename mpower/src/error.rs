//! Local validation errors, raised before any network I/O.

/// Caller input failed validation; nothing was sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A mandatory product field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but unusable.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField {
        /// Field name as exposed on the product type.
        field: &'static str,
        /// What made the value unusable.
        reason: String,
    },
}
