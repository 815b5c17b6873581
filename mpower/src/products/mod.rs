//! Payment product types.
//!
//! Each product is a record of product-specific fields plus a fixed gateway
//! resource path, implementing [`Operation`](crate::operation::Operation).
//! Products hold no transport state; they execute through the transaction
//! client in `mpower-http` and are built fresh per transaction attempt.

mod direct;
mod invoice;
mod opr;

pub use direct::{DirectCard, DirectPay};
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus, InvoiceTax};
pub use opr::{Opr, OprCharge};
