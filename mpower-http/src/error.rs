//! Error types for the HTTP transaction client.

use mpower::ValidationError;

/// Errors that can occur while executing a transaction.
///
/// Gateway rejections are not errors: a reachable gateway that answers 200
/// always produces a [`TransactionOutcome`](mpower::TransactionOutcome),
/// including the non-200 transport-failure case. Only conditions that keep
/// an outcome from being produced at all land here.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Caller input failed local validation; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A configured credential could not be encoded as a header value.
    #[error("{0}")]
    Header(#[from] InvalidHeader),

    /// Endpoint URL construction failed.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Network-level failure: DNS, connection, or timeout.
    #[error("transport error: {context}: {source}")]
    Transport {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body was not a valid gateway reply.
    #[error("failed to decode gateway response: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Failed to read the body of a non-200 response.
    #[error("failed to read response body: {context}: {source}")]
    BodyRead {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Rejected custom header input; existing headers are left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum InvalidHeader {
    /// The name is not a valid HTTP header name.
    #[error("invalid header name: {0}")]
    Name(#[from] http::header::InvalidHeaderName),

    /// The value contains bytes not allowed in an HTTP header value.
    #[error("invalid header value: {0}")]
    Value(#[from] http::header::InvalidHeaderValue),
}
