#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transaction client for the MPower Payments API.
//!
//! Every payment product in [`mpower`] reduces to the same exchange: build
//! a JSON payload, pick an endpoint under the live or sandbox base URL,
//! send once, and classify the gateway's `response_code` into a typed
//! outcome. [`TransactionClient`] owns that exchange; the product types
//! stay pure data and delegate here.
//!
//! # Modules
//!
//! - [`constants`] — fixed base URLs, credential header names, user agent
//! - [`error`] — transport-layer error types
//! - [`client`] — the transaction client
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation around transactions

pub mod client;
pub mod constants;
pub mod error;

pub use client::TransactionClient;
pub use error::{InvalidHeader, TransactionError};
