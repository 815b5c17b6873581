#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the MPower Payments client SDK.
//!
//! This crate provides the configuration, product, and outcome types used
//! throughout the SDK. It performs no I/O of its own: everything here
//! reduces a payment operation to plain data — a resource path plus a JSON
//! payload — which the HTTP transaction client in the companion
//! `mpower-http` crate sends and classifies.
//!
//! # Modules
//!
//! - [`config`] - Operating mode and API credential configuration
//! - [`error`] - Local validation errors
//! - [`operation`] - The operation seam between products and the client
//! - [`outcome`] - Gateway responses and transaction outcomes
//! - [`products`] - Payment product types (invoices, cards, account credits)
//! - [`store`] - Merchant store profile

pub mod config;
pub mod error;
pub mod operation;
pub mod outcome;
pub mod products;
pub mod store;

pub use config::{Config, Credentials, Mode};
pub use error::ValidationError;
pub use operation::{Operation, Payload};
pub use outcome::{GatewayResponse, TransactionOutcome, TransportFailure};
pub use store::Store;
